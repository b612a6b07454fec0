//! Static trait tables: which players carry which tags, which tags each coach
//! switches on, and what every tag is worth.
//!
//! A [`TraitTable`] is plain immutable data handed to the engine when it is
//! built. The compiled-in league table is [`TraitTable::builtin`]; a JSON file
//! with the same shape can replace it (see [`TraitTable::from_json_str`]).

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use super::normalize::normalize_name;
use crate::cli::types::{CoachCode, PlayerNumber};
use crate::error::Result;
use crate::stats::PlayerStatRow;


/// Multiplier for generic tags activated by the selected coach.
pub const DEFAULT_MULTIPLIER: f64 = 1.5;
/// Multiplier for the coach-specific boost tag.
pub const BOOST_MULTIPLIER: f64 = 2.0;
/// Multiplier for the lineup-wide pairing tag.
pub const PAIRING_MULTIPLIER: f64 = 1.5;
pub const CAPTAIN_MULTIPLIER: f64 = 2.0;

pub const PAIRING_TAG: &str = "Cousins";
pub const BOOST_TAG: &str = "Coach's Favourite";
pub const CAPTAIN_LABEL: &str = "Captain";

/// Generic tag alphabet with display labels.
const GENERIC_TAGS: &[(&str, &str)] = &[
    ("Veteran", "Veteran Presence"),
    ("Young Prospect", "Young Gun"),
    ("Specialist", "Specialist"),
    ("Sharpshooter", "Hot Hand"),
    ("Rim Protector", "Paint Patrol"),
    ("Playmaker", "Floor General"),
    ("Hustler", "Hustle Play"),
];

const BUILTIN_PLAYERS: &[(&str, &[&str])] = &[
    ("Giorgos Papadakis", &["Veteran", "Playmaker"]),
    ("Dimitris Karras", &[PAIRING_TAG, "Sharpshooter"]),
    ("Kostas Karras", &[PAIRING_TAG, "Hustler"]),
    ("Nikos Kalamaras", &["Young Prospect"]),
    ("Thanasis Vlachos", &["Rim Protector", BOOST_TAG]),
    ("Stelios Mavridis", &["Specialist", "Sharpshooter"]),
    ("Panagiotis Zervos", &["Veteran", "Rim Protector"]),
    ("Alexandros Nikolaidis", &["Young Prospect", BOOST_TAG]),
    ("Manolis Tsiros", &["Hustler"]),
    ("Vasilis Oikonomou", &["Playmaker", "Specialist"]),
];

const BUILTIN_COACHES: &[(&str, &[&str])] = &[
    ("MK", &["Veteran", "Rim Protector", BOOST_TAG]),
    ("GP", &["Young Prospect", "Hustler"]),
    ("AT", &["Sharpshooter", "Playmaker", "Specialist"]),
];

fn de_normalized_players<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, Vec<String>> = Deserialize::deserialize(deserializer)?;
    let mut players = BTreeMap::new();
    for (name, tags) in raw {
        merge_tags(&mut players, normalize_name(&name), tags);
    }
    Ok(players)
}

/// Two spellings of one name collapse to one key; keep first-seen tag order.
fn merge_tags(players: &mut BTreeMap<String, Vec<String>>, key: String, tags: Vec<String>) {
    let entry: &mut Vec<String> = players.entry(key).or_default();
    for tag in tags {
        if !entry.contains(&tag) {
            entry.push(tag);
        }
    }
}

/// Trait assignment and multiplier configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TraitTable {
    pairing_tag: String,
    boost_tag: String,
    pairing_multiplier: f64,
    boost_multiplier: f64,
    captain_multiplier: f64,
    captain_label: String,
    /// Generic tag multipliers; a tag with no entry is worth 1.0
    multipliers: BTreeMap<String, f64>,
    labels: BTreeMap<String, String>,
    /// Normalized display name -> tags, in the order they were listed
    #[serde(deserialize_with = "de_normalized_players")]
    players: BTreeMap<String, Vec<String>>,
    coaches: BTreeMap<CoachCode, BTreeSet<String>>,
}

impl Default for TraitTable {
    /// Standard constants and tag alphabet, no players or coaches.
    fn default() -> Self {
        let mut multipliers = BTreeMap::new();
        let mut labels = BTreeMap::new();
        for (tag, label) in GENERIC_TAGS {
            multipliers.insert(tag.to_string(), DEFAULT_MULTIPLIER);
            labels.insert(tag.to_string(), label.to_string());
        }
        labels.insert(PAIRING_TAG.to_string(), "Cousins Connection".to_string());
        labels.insert(BOOST_TAG.to_string(), BOOST_TAG.to_string());

        Self {
            pairing_tag: PAIRING_TAG.to_string(),
            boost_tag: BOOST_TAG.to_string(),
            pairing_multiplier: PAIRING_MULTIPLIER,
            boost_multiplier: BOOST_MULTIPLIER,
            captain_multiplier: CAPTAIN_MULTIPLIER,
            captain_label: CAPTAIN_LABEL.to_string(),
            multipliers,
            labels,
            players: BTreeMap::new(),
            coaches: BTreeMap::new(),
        }
    }
}

impl TraitTable {
    /// Empty table with the standard constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// The league's compiled-in table.
    pub fn builtin() -> Self {
        let mut table = Self::default();
        for (name, tags) in BUILTIN_PLAYERS {
            table = table.with_player(name, tags);
        }
        for (code, tags) in BUILTIN_COACHES {
            table = table.with_coach(CoachCode::new(code), tags);
        }
        table
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn with_player(mut self, display_name: &str, tags: &[&str]) -> Self {
        merge_tags(
            &mut self.players,
            normalize_name(display_name),
            tags.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    pub fn with_coach(mut self, code: CoachCode, tags: &[&str]) -> Self {
        self.coaches
            .entry(code)
            .or_default()
            .extend(tags.iter().map(|t| t.to_string()));
        self
    }

    pub fn with_multiplier(mut self, tag: &str, multiplier: f64) -> Self {
        self.multipliers.insert(tag.to_string(), multiplier);
        self
    }

    pub fn with_label(mut self, tag: &str, label: &str) -> Self {
        self.labels.insert(tag.to_string(), label.to_string());
        self
    }

    pub fn pairing_tag(&self) -> &str {
        &self.pairing_tag
    }

    pub fn boost_tag(&self) -> &str {
        &self.boost_tag
    }

    pub fn pairing_multiplier(&self) -> f64 {
        self.pairing_multiplier
    }

    pub fn boost_multiplier(&self) -> f64 {
        self.boost_multiplier
    }

    pub fn captain_multiplier(&self) -> f64 {
        self.captain_multiplier
    }

    pub fn captain_label(&self) -> &str {
        &self.captain_label
    }

    /// Multiplier for a generic tag, 1.0 when the table has no entry.
    pub fn multiplier_for(&self, tag: &str) -> f64 {
        self.multipliers.get(tag).copied().unwrap_or(1.0)
    }

    /// Display label for a tag, falling back to the tag itself.
    pub fn label_for<'a>(&'a self, tag: &'a str) -> &'a str {
        self.labels.get(tag).map(String::as_str).unwrap_or(tag)
    }

    /// Tags the coach switches on; `None` for an unknown code.
    pub fn coach_tags(&self, code: &CoachCode) -> Option<&BTreeSet<String>> {
        self.coaches.get(code)
    }

    /// Tags listed under an already-normalized name.
    pub fn tags_for_key(&self, key: &str) -> &[String] {
        self.players.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn coach_codes(&self) -> impl Iterator<Item = &CoachCode> {
        self.coaches.keys()
    }
}

/// How a stat row is matched to its trait tags.
pub trait TraitResolver {
    /// Tags for the player behind `row`, in table order; empty if unknown.
    fn player_traits<'a>(&'a self, table: &'a TraitTable, row: &PlayerStatRow) -> &'a [String];
}

/// Match on the normalized display name (the league's historical behaviour).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByDisplayName;

impl TraitResolver for ByDisplayName {
    fn player_traits<'a>(&'a self, table: &'a TraitTable, row: &PlayerStatRow) -> &'a [String] {
        table.tags_for_key(&normalize_name(&row.display_name))
    }
}

/// Match on squad number, ignoring names and the table's player map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BySquadNumber {
    players: BTreeMap<PlayerNumber, Vec<String>>,
}

impl BySquadNumber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_player(mut self, number: PlayerNumber, tags: &[&str]) -> Self {
        self.players
            .insert(number, tags.iter().map(|t| t.to_string()).collect());
        self
    }
}

impl TraitResolver for BySquadNumber {
    fn player_traits<'a>(&'a self, _table: &'a TraitTable, row: &PlayerStatRow) -> &'a [String] {
        self.players
            .get(&row.player_number)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
