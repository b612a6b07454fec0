//! Common utilities and helper functions shared across commands.
//!
//! This module contains shared functionality that would otherwise be duplicated
//! across different command implementations.

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::{
    cli::GlobalOpts,
    config::{load_trait_table, resolve_database_path},
    ranking::{GameweekResult, StatsByGameweek, TeamStanding},
    scoring::{ScoredBreakdown, ScoringEngine},
    storage::{LeagueDatabase, LineupRecord},
    Result,
};

/// Context containing common resources needed by most commands
pub struct CommandContext {
    pub db: LeagueDatabase,
    pub engine: ScoringEngine,
    pub verbose: bool,
}

impl CommandContext {
    /// Open the database and load the trait table
    pub fn new(opts: &GlobalOpts) -> Result<Self> {
        let path = resolve_database_path(opts.db.clone());
        if opts.verbose {
            println!("Connecting to database {}...", path.display());
        }
        let db = LeagueDatabase::open(&path)?;
        let engine = ScoringEngine::new(load_trait_table(opts.traits.as_deref())?);

        Ok(Self {
            db,
            engine,
            verbose: opts.verbose,
        })
    }

    /// Statistics for every gameweek the given lineups refer to
    pub fn stats_for(&self, lineups: &[LineupRecord]) -> Result<StatsByGameweek> {
        let gameweeks: BTreeSet<_> = lineups.iter().map(|r| r.gameweek).collect();
        let mut stats = StatsByGameweek::new();
        for gameweek in gameweeks {
            stats.insert(gameweek, self.db.gameweek_stats(gameweek)?);
        }
        Ok(stats)
    }
}

/// Render a breakdown as an aligned text table
pub fn format_breakdown(breakdown: &ScoredBreakdown) -> String {
    let mut out = String::new();
    for player in &breakdown.players {
        let name = if player.display_name.is_empty() {
            "(no stats)"
        } else {
            player.display_name.as_str()
        };
        let _ = write!(
            out,
            "#{:<3} {:<24} base {:>6.1}  final {:>6.1}",
            player.player_number, name, player.base_performance, player.final_score
        );
        if !player.applied_labels.is_empty() {
            let _ = write!(out, "  [{}]", player.applied_labels.join(", "));
        }
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "Total {:.1} (base {:.1}, bonus {:+.1})",
        breakdown.total_final_score, breakdown.total_base_performance, breakdown.total_bonus
    );
    out
}

pub fn format_standings(table: &[TeamStanding]) -> String {
    let mut out = String::new();
    for standing in table {
        let _ = writeln!(
            out,
            "{:>3}. {:<24} {:>8.1} pts  ({} gw, avg {:.1})",
            standing.rank,
            standing.team_name,
            standing.total_points,
            standing.gameweeks_played,
            standing.average_points
        );
    }
    out
}

pub fn format_history(team_name: &str, history: &[GameweekResult]) -> String {
    let mut out = format!("{team_name}\n");
    for result in history {
        let _ = writeln!(
            out,
            "  GW {:>2}: {:>7.1} pts  (bonus {:+.1}, running {:.1})",
            result.gameweek.as_u16(),
            result.breakdown.total_final_score,
            result.breakdown.total_bonus,
            result.cumulative_points
        );
    }
    out
}
