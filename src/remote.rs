//! Client for the hosted league database's REST interface.
//!
//! Tables are read PostgREST-style: `GET {base}/rest/v1/{table}?gameweek=eq.N`.

use reqwest::{header::HeaderMap, Client};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::cli::types::Gameweek;
use crate::core::http::api_header_map;
use crate::stats::{GameweekStats, PlayerStatRow};
use crate::storage::LineupRecord;
use crate::Result;

#[cfg(test)]
mod tests;

pub const STATS_TABLE: &str = "player_stats";
pub const LINEUPS_TABLE: &str = "lineups";

/// Row bookkeeping columns that aren't player statistics
const BOOKKEEPING_COLUMNS: &[&str] = &["id", "gameweek", "created_at", "updated_at"];

pub struct RemoteClient {
    client: Client,
    base_url: String,
    headers: HeaderMap,
}

impl RemoteClient {
    pub fn new(base_url: &str, api_key: Option<&str>) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: api_header_map(api_key)?,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn get_rows<T: DeserializeOwned>(&self, table: &str, gameweek: Gameweek) -> Result<Vec<T>> {
        let url = self.table_url(table);
        let params = [
            ("select", "*".to_string()),
            ("gameweek", format!("eq.{}", gameweek)),
        ];
        debug!(%url, %gameweek, "fetching rows");

        let rows = self
            .client
            .get(&url)
            .headers(self.headers.clone())
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<T>>()
            .await?;

        Ok(rows)
    }

    /// Every player's stat line for a gameweek
    pub async fn fetch_gameweek_stats(&self, gameweek: Gameweek) -> Result<GameweekStats> {
        let mut rows: Vec<PlayerStatRow> = self.get_rows(STATS_TABLE, gameweek).await?;
        for row in &mut rows {
            for column in BOOKKEEPING_COLUMNS {
                row.extra.remove(*column);
            }
        }
        info!(%gameweek, rows = rows.len(), "fetched remote stats");
        Ok(GameweekStats::from_rows(gameweek, rows))
    }

    /// Every lineup submitted for a gameweek
    pub async fn fetch_lineups(&self, gameweek: Gameweek) -> Result<Vec<LineupRecord>> {
        let lineups: Vec<LineupRecord> = self.get_rows(LINEUPS_TABLE, gameweek).await?;
        info!(%gameweek, lineups = lineups.len(), "fetched remote lineups");
        Ok(lineups)
    }
}
