//! Database schema and connection management

use crate::cli::types::Gameweek;
use crate::core::cache::{default_database_path, MemoryCache};
use crate::stats::GameweekStats;
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

/// Decoded gameweeks kept in memory
const STATS_CACHE_CAPACITY: usize = 64;

/// Database connection manager for statistics and lineups
pub struct LeagueDatabase {
    pub(crate) conn: Connection,
    pub(crate) stats_cache: MemoryCache<Gameweek, GameweekStats>,
}

impl LeagueDatabase {
    /// Open the database at the default cache location
    pub fn new() -> Result<Self> {
        Self::open(&default_database_path())
    }

    /// Open (or create) a database file and ensure tables exist
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure the parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("opening database {}", path.display()))?;
        debug!(path = %path.display(), "opened league database");
        Self::from_connection(conn)
    }

    /// In-memory database, used by tests and one-off scoring
    pub fn new_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let mut db = Self {
            conn,
            stats_cache: MemoryCache::new(STATS_CACHE_CAPACITY),
        };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        // One row per player per gameweek; extra counting stats kept as JSON
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS player_stats (
                gameweek INTEGER NOT NULL,
                player_number INTEGER NOT NULL,
                display_name TEXT NOT NULL,
                performance_index REAL,
                extra_json TEXT NOT NULL DEFAULT '{}',
                updated_at INTEGER NOT NULL,
                PRIMARY KEY (gameweek, player_number)
            )",
            [],
        )?;

        // One lineup per team per gameweek; slots stored as a JSON array
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS lineups (
                team_name TEXT NOT NULL,
                gameweek INTEGER NOT NULL,
                player_numbers TEXT NOT NULL,
                captain_number INTEGER,
                coach_code TEXT,
                updated_at INTEGER NOT NULL,
                PRIMARY KEY (team_name, gameweek)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_lineups_gameweek
             ON lineups(gameweek)",
            [],
        )?;

        Ok(())
    }
}
