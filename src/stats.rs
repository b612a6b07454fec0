//! Per-gameweek player statistics.
//!
//! Rows arrive already ingested (JSON files exported from the league's
//! spreadsheets, the local SQLite store, or the hosted REST service). The
//! scoring engine only ever reads them through [`StatLookup`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::cli::types::{Gameweek, PlayerNumber};
use crate::error::{FantasyError, Result};


/// Accept a number, a numeric string (`"12.5"` or `"12,5"`), or anything
/// else as "no value". Non-finite values are treated as missing too.
fn de_lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(lenient_f64(&raw))
}

pub(crate) fn lenient_f64(raw: &Value) -> Option<f64> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// One player's line for one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatRow {
    #[serde(alias = "player_number", alias = "number")]
    pub player_number: PlayerNumber,
    #[serde(alias = "display_name", alias = "name", default)]
    pub display_name: String,
    /// PIR / efficiency rating for the match; the base fantasy score
    #[serde(
        alias = "performance_index",
        alias = "pir",
        alias = "eff",
        default,
        deserialize_with = "de_lenient_f64"
    )]
    pub performance_index: Option<f64>,
    /// Counting stats the engine doesn't use (points, rebounds, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PlayerStatRow {
    pub fn new(
        player_number: PlayerNumber,
        display_name: impl Into<String>,
        performance_index: Option<f64>,
    ) -> Self {
        Self {
            player_number,
            display_name: display_name.into(),
            performance_index,
            extra: BTreeMap::new(),
        }
    }

    /// Base fantasy value: the performance index, or 0 when absent.
    pub fn base_performance(&self) -> f64 {
        self.performance_index.filter(|v| v.is_finite()).unwrap_or(0.0)
    }
}

/// Read access to a gameweek's rows, keyed by squad number.
pub trait StatLookup {
    fn get(&self, number: PlayerNumber) -> Option<&PlayerStatRow>;
}

impl StatLookup for BTreeMap<PlayerNumber, PlayerStatRow> {
    fn get(&self, number: PlayerNumber) -> Option<&PlayerStatRow> {
        BTreeMap::get(self, &number)
    }
}

impl StatLookup for HashMap<PlayerNumber, PlayerStatRow> {
    fn get(&self, number: PlayerNumber) -> Option<&PlayerStatRow> {
        HashMap::get(self, &number)
    }
}

/// On-disk shapes accepted for a stats file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StatsFile {
    /// `{ "gameweek": 3, "players": [...] }`
    Wrapped {
        gameweek: Option<Gameweek>,
        players: Vec<PlayerStatRow>,
    },
    /// Bare `[...]`; the gameweek must come from the caller
    Bare(Vec<PlayerStatRow>),
}

/// All rows for one gameweek.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameweekStats {
    gameweek: Gameweek,
    rows: BTreeMap<PlayerNumber, PlayerStatRow>,
}

impl GameweekStats {
    pub fn new(gameweek: Gameweek) -> Self {
        Self {
            gameweek,
            rows: BTreeMap::new(),
        }
    }

    /// Build from rows; a later row for the same number replaces an earlier one.
    pub fn from_rows(gameweek: Gameweek, rows: impl IntoIterator<Item = PlayerStatRow>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| (row.player_number, row))
            .collect();
        Self { gameweek, rows }
    }

    /// Parse a stats document. `gameweek` overrides whatever the document says.
    pub fn from_json_str(json: &str, gameweek: Option<Gameweek>) -> Result<Self> {
        match serde_json::from_str::<StatsFile>(json)? {
            StatsFile::Wrapped {
                gameweek: embedded,
                players,
            } => {
                let gameweek = gameweek.or(embedded).ok_or_else(|| FantasyError::InvalidStats {
                    reason: "gameweek missing from file and not given".to_string(),
                })?;
                Ok(Self::from_rows(gameweek, players))
            }
            StatsFile::Bare(players) => {
                let gameweek = gameweek.ok_or_else(|| FantasyError::InvalidStats {
                    reason: "bare row array needs an explicit gameweek".to_string(),
                })?;
                Ok(Self::from_rows(gameweek, players))
            }
        }
    }

    pub fn load_json(path: &Path, gameweek: Option<Gameweek>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents, gameweek)
    }

    pub fn gameweek(&self) -> Gameweek {
        self.gameweek
    }

    pub fn insert(&mut self, row: PlayerStatRow) {
        self.rows.insert(row.player_number, row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in squad-number order.
    pub fn rows(&self) -> impl Iterator<Item = &PlayerStatRow> {
        self.rows.values()
    }

    /// Top `n` rows by performance index, highest first. Rows without a
    /// value sort last; ties go to the lower squad number.
    pub fn leaders(&self, n: usize) -> Vec<&PlayerStatRow> {
        let mut sorted: Vec<&PlayerStatRow> = self.rows.values().collect();
        sorted.sort_by(|a, b| {
            let a_val = a.performance_index.unwrap_or(f64::NEG_INFINITY);
            let b_val = b.performance_index.unwrap_or(f64::NEG_INFINITY);
            b_val
                .total_cmp(&a_val)
                .then_with(|| a.player_number.cmp(&b.player_number))
        });
        sorted.truncate(n);
        sorted
    }
}

impl StatLookup for GameweekStats {
    fn get(&self, number: PlayerNumber) -> Option<&PlayerStatRow> {
        self.rows.get(&number)
    }
}
