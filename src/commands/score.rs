//! Score a single lineup against one gameweek's statistics.
//!
//! Two sources are supported: a lineup already stored for a team
//! (`--team` + `--gameweek`) or one given on the command line
//! (`--players ...`). Statistics come from `--stats FILE` when given,
//! otherwise from the database.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::{
    cli::{types::Gameweek, LineupArgs},
    scoring::{Lineup, ScoredBreakdown},
    stats::{GameweekStats, StatLookup},
    FantasyError, Result,
};

use super::{common::format_breakdown, lineups::build_lineup, CommandContext};

/// Parameters for the score command
#[derive(Debug)]
pub struct ScoreParams {
    pub team: Option<String>,
    pub gameweek: Option<Gameweek>,
    pub lineup: LineupArgs,
    pub stats_path: Option<PathBuf>,
    pub as_json: bool,
}

fn load_stats(
    ctx: &CommandContext,
    stats_path: Option<&PathBuf>,
    gameweek: Option<Gameweek>,
) -> Result<GameweekStats> {
    if let Some(path) = stats_path {
        debug!(path = %path.display(), "scoring against stats file");
        return GameweekStats::load_json(path, gameweek);
    }

    let gameweek = gameweek.ok_or_else(|| FantasyError::InvalidLineup {
        reason: "--gameweek is required unless --stats is given".to_string(),
    })?;
    let stats = ctx.db.gameweek_stats(gameweek)?;
    if stats.is_empty() {
        return Err(FantasyError::NoStats {
            gameweek: gameweek.as_u16(),
        });
    }
    Ok(stats)
}

fn resolve_lineup(ctx: &CommandContext, params: ScoreParams) -> Result<(Lineup, GameweekStats)> {
    match params.team {
        Some(team) => {
            let gameweek = params.gameweek.ok_or_else(|| FantasyError::InvalidLineup {
                reason: "--gameweek is required with --team".to_string(),
            })?;
            let record = ctx
                .db
                .lineup(&team, gameweek)?
                .ok_or_else(|| FantasyError::LineupNotFound {
                    team: team.clone(),
                    gameweek: gameweek.as_u16(),
                })?;
            if !record.lineup.captain_in_lineup() {
                warn!(%team, %gameweek, "stored captain is not in the lineup");
            }
            let stats = load_stats(ctx, params.stats_path.as_ref(), Some(gameweek))?;
            Ok((record.lineup, stats))
        }
        None => {
            let lineup = build_lineup(params.lineup)?;
            let stats = load_stats(ctx, params.stats_path.as_ref(), params.gameweek)?;
            Ok((lineup, stats))
        }
    }
}

/// Score the requested lineup without printing anything
pub fn score_lineup(ctx: &CommandContext, params: ScoreParams) -> Result<ScoredBreakdown> {
    let (lineup, stats) = resolve_lineup(ctx, params)?;

    for number in &lineup.player_numbers {
        if stats.get(*number).is_none() {
            warn!(player = %number, gameweek = %stats.gameweek(), "no stats for player; scoring 0");
        }
    }

    Ok(ctx.engine.evaluate_lineup(&lineup, &stats))
}

/// Handle the score command
pub fn handle_score(ctx: &CommandContext, params: ScoreParams) -> Result<()> {
    let as_json = params.as_json;
    let breakdown = score_lineup(ctx, params)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        print!("{}", format_breakdown(&breakdown));
    }

    Ok(())
}
