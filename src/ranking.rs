//! League standings and team history built from engine totals.
//!
//! Every lineup is scored independently, so the per-lineup work runs on the
//! rayon pool; results are folded back in input order and sorted.

use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::cli::types::Gameweek;
use crate::scoring::{ScoredBreakdown, ScoringEngine, TraitResolver};
use crate::stats::GameweekStats;
use crate::storage::LineupRecord;


/// Statistics for every gameweek being ranked
pub type StatsByGameweek = BTreeMap<Gameweek, GameweekStats>;

/// One row of the league table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    /// 1-based; equal totals share a rank
    pub rank: usize,
    pub team_name: String,
    pub total_points: f64,
    pub gameweeks_played: usize,
    pub average_points: f64,
}

/// One gameweek of a team's history
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameweekResult {
    pub gameweek: Gameweek,
    pub breakdown: ScoredBreakdown,
    /// Running total up to and including this gameweek
    pub cumulative_points: f64,
}

fn lineup_points<R>(engine: &ScoringEngine<R>, record: &LineupRecord, stats: &StatsByGameweek) -> f64
where
    R: TraitResolver,
{
    stats
        .get(&record.gameweek)
        .map_or(0.0, |gw| engine.total_points(&record.lineup, gw))
}

/// League table across all given lineups. A lineup whose gameweek has no
/// statistics counts as played with zero points.
pub fn standings<R>(
    engine: &ScoringEngine<R>,
    lineups: &[LineupRecord],
    stats: &StatsByGameweek,
) -> Vec<TeamStanding>
where
    R: TraitResolver + Sync,
{
    let scored: Vec<(&str, f64)> = lineups
        .par_iter()
        .map(|record| (record.team_name.as_str(), lineup_points(engine, record, stats)))
        .collect();

    let mut totals: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for (team, points) in scored {
        let entry = totals.entry(team).or_insert((0.0, 0));
        entry.0 += points;
        entry.1 += 1;
    }

    let mut table: Vec<TeamStanding> = totals
        .into_iter()
        .map(|(team, (total_points, gameweeks_played))| TeamStanding {
            rank: 0,
            team_name: team.to_string(),
            total_points,
            gameweeks_played,
            average_points: total_points / gameweeks_played as f64,
        })
        .collect();

    table.sort_by(|a, b| {
        b.total_points
            .total_cmp(&a.total_points)
            .then_with(|| a.team_name.cmp(&b.team_name))
    });

    let mut previous: Option<(f64, usize)> = None;
    for (index, standing) in table.iter_mut().enumerate() {
        standing.rank = match previous {
            Some((points, rank)) if points == standing.total_points => rank,
            _ => index + 1,
        };
        previous = Some((standing.total_points, standing.rank));
    }

    table
}

/// Per-gameweek breakdowns for one team, ascending by gameweek.
pub fn team_history<R>(
    engine: &ScoringEngine<R>,
    team_name: &str,
    lineups: &[LineupRecord],
    stats: &StatsByGameweek,
) -> Vec<GameweekResult>
where
    R: TraitResolver,
{
    let mut own: Vec<&LineupRecord> = lineups
        .iter()
        .filter(|record| record.team_name == team_name)
        .collect();
    own.sort_by_key(|record| record.gameweek);

    let mut cumulative_points = 0.0;
    own.into_iter()
        .map(|record| {
            let breakdown = stats
                .get(&record.gameweek)
                .map(|gw| engine.evaluate_lineup(&record.lineup, gw))
                .unwrap_or_default();
            cumulative_points += breakdown.total_final_score;
            GameweekResult {
                gameweek: record.gameweek,
                breakdown,
                cumulative_points,
            }
        })
        .collect()
}
