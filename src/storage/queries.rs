//! Basic database query operations

use super::{models::*, schema::LeagueDatabase};
use crate::cli::types::{CoachCode, Gameweek, PlayerNumber};
use crate::scoring::Lineup;
use crate::stats::{GameweekStats, PlayerStatRow};
use anyhow::Result;
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

const LINEUP_COLUMNS: &str =
    "team_name, gameweek, player_numbers, captain_number, coach_code";

fn now_secs() -> Result<i64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64)
}

fn write_stat_row(conn: &Connection, gameweek: Gameweek, row: &PlayerStatRow, now: i64) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO player_stats
         (gameweek, player_number, display_name, performance_index, extra_json, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)",
        params![
            gameweek.as_u16(),
            row.player_number.as_u32(),
            row.display_name,
            row.performance_index,
            serde_json::to_string(&row.extra)?,
            now
        ],
    )?;
    Ok(())
}

/// Map a `lineups` row (selected with `LINEUP_COLUMNS`) to a record
fn row_to_lineup(row: &Row) -> rusqlite::Result<LineupRecord> {
    let slots: String = row.get(2)?;
    let player_numbers: Vec<PlayerNumber> = serde_json::from_str(&slots)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
    let captain: Option<u32> = row.get(3)?;
    let coach: Option<String> = row.get(4)?;

    Ok(LineupRecord {
        team_name: row.get(0)?,
        gameweek: Gameweek::new(row.get(1)?),
        lineup: Lineup::new(
            player_numbers,
            captain.map(PlayerNumber::new),
            coach.map(CoachCode::new),
        ),
    })
}

impl LeagueDatabase {
    /// Insert or replace one player's stat line for a gameweek
    pub fn upsert_stat_row(&mut self, gameweek: Gameweek, row: &PlayerStatRow) -> Result<()> {
        write_stat_row(&self.conn, gameweek, row, now_secs()?)?;
        self.stats_cache.invalidate(&gameweek);
        Ok(())
    }

    /// Store every row of a gameweek in one transaction; returns rows written
    pub fn import_gameweek(&mut self, stats: &GameweekStats) -> Result<usize> {
        let now = now_secs()?;
        let tx = self.conn.transaction()?;
        let mut written = 0;
        for row in stats.rows() {
            write_stat_row(&tx, stats.gameweek(), row, now)?;
            written += 1;
        }
        tx.commit()?;

        self.stats_cache.invalidate(&stats.gameweek());
        debug!(gameweek = %stats.gameweek(), rows = written, "imported gameweek stats");
        Ok(written)
    }

    /// All stat rows for a gameweek (empty if none are stored)
    pub fn gameweek_stats(&self, gameweek: Gameweek) -> Result<GameweekStats> {
        if let Some(cached) = self.stats_cache.get(&gameweek) {
            return Ok(cached);
        }

        let mut stmt = self.conn.prepare(
            "SELECT player_number, display_name, performance_index, extra_json
             FROM player_stats
             WHERE gameweek = ?
             ORDER BY player_number",
        )?;
        let raw_rows = stmt.query_map(params![gameweek.as_u16()], |row| {
            Ok((
                row.get::<_, u32>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<f64>>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut stats = GameweekStats::new(gameweek);
        for raw in raw_rows {
            let (number, name, performance_index, extra_json) = raw?;
            let mut row = PlayerStatRow::new(PlayerNumber::new(number), name, performance_index);
            row.extra = serde_json::from_str(&extra_json)?;
            stats.insert(row);
        }

        self.stats_cache.put(gameweek, stats.clone());
        Ok(stats)
    }

    /// Gameweeks that have statistics stored, ascending
    pub fn gameweeks(&self) -> Result<Vec<Gameweek>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT gameweek FROM player_stats ORDER BY gameweek")?;
        let rows = stmt.query_map([], |row| row.get::<_, u16>(0))?;

        let mut gameweeks = Vec::new();
        for row in rows {
            gameweeks.push(Gameweek::new(row?));
        }
        Ok(gameweeks)
    }

    /// Insert or replace a team's lineup for its gameweek
    pub fn upsert_lineup(&mut self, record: &LineupRecord) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO lineups
             (team_name, gameweek, player_numbers, captain_number, coach_code, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                record.team_name,
                record.gameweek.as_u16(),
                serde_json::to_string(&record.lineup.player_numbers)?,
                record.lineup.captain.map(|c| c.as_u32()),
                record.lineup.coach.as_ref().map(|c| c.as_str().to_string()),
                now_secs()?
            ],
        )?;
        Ok(())
    }

    /// A team's lineup for one gameweek
    pub fn lineup(&self, team_name: &str, gameweek: Gameweek) -> Result<Option<LineupRecord>> {
        let sql = format!(
            "SELECT {LINEUP_COLUMNS} FROM lineups WHERE team_name = ? AND gameweek = ?"
        );
        let record = self
            .conn
            .query_row(&sql, params![team_name, gameweek.as_u16()], row_to_lineup)
            .optional()?;
        Ok(record)
    }

    /// Every lineup submitted for a gameweek, by team name
    pub fn lineups_for_gameweek(&self, gameweek: Gameweek) -> Result<Vec<LineupRecord>> {
        self.query_lineups(
            &format!("SELECT {LINEUP_COLUMNS} FROM lineups WHERE gameweek = ? ORDER BY team_name"),
            params![gameweek.as_u16()],
        )
    }

    /// Every lineup a team has submitted, by gameweek
    pub fn lineups_for_team(&self, team_name: &str) -> Result<Vec<LineupRecord>> {
        self.query_lineups(
            &format!("SELECT {LINEUP_COLUMNS} FROM lineups WHERE team_name = ? ORDER BY gameweek"),
            params![team_name],
        )
    }

    pub fn all_lineups(&self) -> Result<Vec<LineupRecord>> {
        self.query_lineups(
            &format!("SELECT {LINEUP_COLUMNS} FROM lineups ORDER BY gameweek, team_name"),
            params![],
        )
    }

    fn query_lineups(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<LineupRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(args, row_to_lineup)?;

        let mut lineups = Vec::new();
        for row in rows {
            lineups.push(row?);
        }
        Ok(lineups)
    }

    /// Clear all data from the database
    pub fn clear_all(&mut self) -> Result<()> {
        self.conn.execute("DELETE FROM lineups", [])?;
        self.conn.execute("DELETE FROM player_stats", [])?;
        self.stats_cache.clear();
        Ok(())
    }
}
