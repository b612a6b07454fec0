//! Data models for the storage layer

use crate::cli::types::Gameweek;
use crate::scoring::Lineup;
use serde::{Deserialize, Serialize};

/// A team's lineup for one gameweek, as stored in the lineup table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupRecord {
    #[serde(alias = "team_name", alias = "team")]
    pub team_name: String,
    pub gameweek: Gameweek,
    #[serde(flatten)]
    pub lineup: Lineup,
}

impl LineupRecord {
    pub fn new(team_name: impl Into<String>, gameweek: Gameweek, lineup: Lineup) -> Self {
        Self {
            team_name: team_name.into(),
            gameweek,
            lineup,
        }
    }
}
