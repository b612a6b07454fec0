//! Gameweek statistics: import from file and leaderboard output

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::{cli::types::Gameweek, stats::GameweekStats, FantasyError, Result};

use super::CommandContext;

/// One leaderboard line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderRow {
    pub rank: usize,
    pub player_number: u32,
    pub display_name: String,
    pub performance_index: Option<f64>,
}

/// Load a stats file into the database, replacing rows for the same
/// squad numbers. Returns the gameweek and the number of rows written.
pub fn import_stats_file(
    ctx: &mut CommandContext,
    path: &Path,
    gameweek: Option<Gameweek>,
) -> Result<(Gameweek, usize)> {
    let stats = GameweekStats::load_json(path, gameweek)?;
    if stats.is_empty() {
        return Err(FantasyError::InvalidStats {
            reason: format!("{} contains no player rows", path.display()),
        });
    }

    let written = ctx.db.import_gameweek(&stats)?;
    info!(path = %path.display(), gameweek = %stats.gameweek(), rows = written, "imported stats file");
    Ok((stats.gameweek(), written))
}

/// Handle the import-stats command
pub fn handle_import_stats(
    ctx: &mut CommandContext,
    path: &Path,
    gameweek: Option<Gameweek>,
) -> Result<()> {
    if ctx.verbose {
        println!("Reading {}...", path.display());
    }
    let (gameweek, written) = import_stats_file(ctx, path, gameweek)?;
    println!("✓ Imported {} player rows for gameweek {}", written, gameweek);
    Ok(())
}

/// Top `top` performers of a stored gameweek
pub fn leaders(ctx: &CommandContext, gameweek: Gameweek, top: usize) -> Result<Vec<LeaderRow>> {
    let stats = ctx.db.gameweek_stats(gameweek)?;
    if stats.is_empty() {
        return Err(FantasyError::NoStats {
            gameweek: gameweek.as_u16(),
        });
    }

    Ok(stats
        .leaders(top)
        .into_iter()
        .enumerate()
        .map(|(index, row)| LeaderRow {
            rank: index + 1,
            player_number: row.player_number.as_u32(),
            display_name: row.display_name.clone(),
            performance_index: row.performance_index,
        })
        .collect())
}

/// Handle the stats command
pub fn handle_stats(ctx: &CommandContext, gameweek: Gameweek, top: usize, as_json: bool) -> Result<()> {
    let rows = leaders(ctx, gameweek, top)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Gameweek {} leaders", gameweek);
    for row in rows {
        let value = row
            .performance_index
            .map_or_else(|| "-".to_string(), |v| format!("{v:.1}"));
        println!(
            "{:>3}. #{:<3} {:<24} {:>6}",
            row.rank, row.player_number, row.display_name, value
        );
    }
    Ok(())
}
