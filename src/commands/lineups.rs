//! Lineup submission

use tracing::{info, warn};

use crate::{
    cli::{types::Gameweek, LineupArgs},
    scoring::{Lineup, LINEUP_SIZE},
    storage::LineupRecord,
    FantasyError, Result,
};

use super::CommandContext;

/// Turn command-line lineup flags into a [`Lineup`], rejecting anything
/// that isn't exactly five distinct squad numbers.
pub fn build_lineup(args: LineupArgs) -> Result<Lineup> {
    let lineup = Lineup::new(args.players, args.captain, args.coach);

    if !lineup.is_well_formed() {
        return Err(FantasyError::InvalidLineup {
            reason: format!(
                "expected {} players, got {}",
                LINEUP_SIZE,
                lineup.player_numbers.len()
            ),
        });
    }

    let mut seen = lineup.player_numbers.clone();
    seen.sort();
    seen.dedup();
    if seen.len() != lineup.player_numbers.len() {
        return Err(FantasyError::InvalidLineup {
            reason: "a player is listed more than once".to_string(),
        });
    }

    if !lineup.captain_in_lineup() {
        if let Some(captain) = lineup.captain {
            warn!(%captain, "captain is not in the lineup; no captain bonus will apply");
        }
    }

    Ok(lineup)
}

/// Store (or replace) a team's lineup for a gameweek
pub fn handle_submit_lineup(
    ctx: &mut CommandContext,
    team_name: &str,
    gameweek: Gameweek,
    args: LineupArgs,
) -> Result<LineupRecord> {
    let team_name = team_name.trim();
    if team_name.is_empty() {
        return Err(FantasyError::InvalidLineup {
            reason: "team name is empty".to_string(),
        });
    }

    let record = LineupRecord::new(team_name, gameweek, build_lineup(args)?);
    ctx.db.upsert_lineup(&record)?;
    info!(team = %record.team_name, %gameweek, "stored lineup");

    println!(
        "✓ Lineup for {} saved for gameweek {}",
        record.team_name, gameweek
    );
    if ctx.verbose {
        let numbers: Vec<String> = record
            .lineup
            .player_numbers
            .iter()
            .map(|n| n.to_string())
            .collect();
        println!("Players: {}", numbers.join(", "));
        if let Some(captain) = record.lineup.captain {
            println!("Captain: #{}", captain);
        }
        if let Some(coach) = &record.lineup.coach {
            println!("Coach: {}", coach);
        }
    }

    Ok(record)
}
