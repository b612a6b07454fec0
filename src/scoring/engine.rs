use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::traits::{ByDisplayName, TraitResolver, TraitTable};
use crate::cli::types::{CoachCode, PlayerNumber};
use crate::stats::StatLookup;


/// Number of slots in a well-formed lineup.
pub const LINEUP_SIZE: usize = 5;

static NO_COACH_TAGS: BTreeSet<String> = BTreeSet::new();

/// A team's selection for one gameweek.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lineup {
    #[serde(alias = "player_numbers", alias = "players")]
    pub player_numbers: Vec<PlayerNumber>,
    #[serde(default, alias = "captain_number", alias = "captainNumber")]
    pub captain: Option<PlayerNumber>,
    #[serde(default, alias = "coach_code", alias = "coachCode")]
    pub coach: Option<CoachCode>,
}

impl Lineup {
    pub fn new(
        player_numbers: Vec<PlayerNumber>,
        captain: Option<PlayerNumber>,
        coach: Option<CoachCode>,
    ) -> Self {
        Self {
            player_numbers,
            captain,
            coach,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.player_numbers.len() == LINEUP_SIZE
    }

    /// False only when a captain is set but isn't one of the slots.
    pub fn captain_in_lineup(&self) -> bool {
        self.captain
            .map_or(true, |captain| self.player_numbers.contains(&captain))
    }
}

/// Lineup-wide facts computed before any slot is scored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynergyContext<'t> {
    /// Tags the selected coach switches on (empty without a known coach)
    pub coach_tags: &'t BTreeSet<String>,
    /// Slots whose player carries the pairing tag
    pub pair_count: usize,
    pub has_pair_active: bool,
}

/// One slot of a scored lineup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredPlayer {
    pub player_number: PlayerNumber,
    /// Empty when the gameweek has no row for this number
    pub display_name: String,
    pub base_performance: f64,
    pub is_captain: bool,
    pub captain_multiplier: f64,
    pub synergy_multiplier: f64,
    /// Captain label first, then one entry per applied synergy
    pub applied_labels: Vec<String>,
    pub final_score: f64,
}

/// Full result of scoring one lineup against one gameweek.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredBreakdown {
    pub players: Vec<ScoredPlayer>,
    pub total_final_score: f64,
    pub total_base_performance: f64,
    /// `total_final_score - total_base_performance`
    pub total_bonus: f64,
}

impl ScoredBreakdown {
    fn from_players(players: Vec<ScoredPlayer>) -> Self {
        let total_final_score: f64 = players.iter().map(|p| p.final_score).sum();
        let total_base_performance: f64 = players.iter().map(|p| p.base_performance).sum();
        Self {
            players,
            total_final_score,
            total_base_performance,
            total_bonus: total_final_score - total_base_performance,
        }
    }
}

/// `2.0` -> "2", `1.5` -> "1.5"
fn format_multiplier(multiplier: f64) -> String {
    if multiplier.fract() == 0.0 {
        format!("{multiplier:.0}")
    } else {
        format!("{multiplier}")
    }
}

fn label(text: &str, multiplier: f64) -> String {
    format!("{} ×{}", text, format_multiplier(multiplier))
}

/// Lineup scorer. Holds only immutable configuration, so one engine can be
/// shared across threads and every call is independent of the others.
#[derive(Debug, Clone)]
pub struct ScoringEngine<R = ByDisplayName> {
    table: TraitTable,
    resolver: R,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(TraitTable::builtin())
    }
}

impl ScoringEngine {
    /// Engine that matches players to traits by display name.
    pub fn new(table: TraitTable) -> Self {
        Self {
            table,
            resolver: ByDisplayName,
        }
    }
}

impl<R: TraitResolver> ScoringEngine<R> {
    pub fn with_resolver(table: TraitTable, resolver: R) -> Self {
        Self { table, resolver }
    }

    pub fn table(&self) -> &TraitTable {
        &self.table
    }

    /// Resolve the coach's tag set and count pairing-tagged players.
    ///
    /// Slots with no stat row can't contribute to the pairing count because
    /// their traits can't be resolved.
    pub fn synergy_context<S>(&self, lineup: &Lineup, stats: &S) -> SynergyContext<'_>
    where
        S: StatLookup + ?Sized,
    {
        let coach_tags = lineup
            .coach
            .as_ref()
            .and_then(|code| self.table.coach_tags(code))
            .unwrap_or(&NO_COACH_TAGS);

        let pairing_tag = self.table.pairing_tag();
        let pair_count = lineup
            .player_numbers
            .iter()
            .filter_map(|&number| stats.get(number))
            .filter(|row| {
                self.resolver
                    .player_traits(&self.table, row)
                    .iter()
                    .any(|tag| tag == pairing_tag)
            })
            .count();

        SynergyContext {
            coach_tags,
            pair_count,
            has_pair_active: pair_count >= 2,
        }
    }

    /// Score a lineup against a gameweek's statistics.
    ///
    /// Never fails: a lineup without exactly [`LINEUP_SIZE`] slots scores an
    /// empty breakdown, and a slot with no stat row scores zero.
    pub fn evaluate_lineup<S>(&self, lineup: &Lineup, stats: &S) -> ScoredBreakdown
    where
        S: StatLookup + ?Sized,
    {
        if !lineup.is_well_formed() {
            return ScoredBreakdown::default();
        }

        // Pairing depends on the whole lineup, so it is settled before any slot.
        let context = self.synergy_context(lineup, stats);

        let players = lineup
            .player_numbers
            .iter()
            .map(|&number| self.score_slot(number, lineup.captain, stats, &context))
            .collect();

        ScoredBreakdown::from_players(players)
    }

    /// Scalar total for ranking; always `evaluate_lineup(..).total_final_score`.
    pub fn total_points<S>(&self, lineup: &Lineup, stats: &S) -> f64
    where
        S: StatLookup + ?Sized,
    {
        self.evaluate_lineup(lineup, stats).total_final_score
    }

    fn score_slot<S>(
        &self,
        number: PlayerNumber,
        captain: Option<PlayerNumber>,
        stats: &S,
        context: &SynergyContext<'_>,
    ) -> ScoredPlayer
    where
        S: StatLookup + ?Sized,
    {
        let row = stats.get(number);
        let base_performance = row.map_or(0.0, |r| r.base_performance());
        let traits: &[String] = match row {
            Some(r) => self.resolver.player_traits(&self.table, r),
            None => &[],
        };

        let is_captain = captain == Some(number);
        let captain_multiplier = if is_captain {
            self.table.captain_multiplier()
        } else {
            1.0
        };

        let mut applied_labels = Vec::new();
        if is_captain {
            applied_labels.push(label(self.table.captain_label(), captain_multiplier));
        }

        let mut synergy_multiplier = 1.0;
        for tag in traits {
            let Some(multiplier) = self.tag_multiplier(tag, context) else {
                continue;
            };
            // Tags without a multiplier entry are no-ops and stay unlabelled.
            if multiplier == 1.0 {
                continue;
            }
            synergy_multiplier *= multiplier;
            applied_labels.push(label(self.table.label_for(tag), multiplier));
        }

        ScoredPlayer {
            player_number: number,
            display_name: row.map(|r| r.display_name.clone()).unwrap_or_default(),
            base_performance,
            is_captain,
            captain_multiplier,
            synergy_multiplier,
            applied_labels,
            final_score: base_performance * captain_multiplier * synergy_multiplier,
        }
    }

    /// Multiplier a tag contributes in this lineup, or `None` if inactive.
    fn tag_multiplier(&self, tag: &str, context: &SynergyContext<'_>) -> Option<f64> {
        if tag == self.table.pairing_tag() {
            return context
                .has_pair_active
                .then(|| self.table.pairing_multiplier());
        }
        if !context.coach_tags.contains(tag) {
            return None;
        }
        if tag == self.table.boost_tag() {
            Some(self.table.boost_multiplier())
        } else {
            Some(self.table.multiplier_for(tag))
        }
    }
}
