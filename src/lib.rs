//! Hoops Fantasy Library
//!
//! Scoring and league bookkeeping for a small basketball fantasy league.
//! Each team picks five players per gameweek, names a captain and a coach;
//! player traits and the coach's preferences multiply the players' match
//! performance index into fantasy points.
//!
//! ## Features
//!
//! - **Scoring Engine**: Pure, deterministic lineup evaluation with captain and trait synergies
//! - **Trait Tables**: Built-in league traits, or a JSON table supplied at runtime
//! - **Database Storage**: Local SQLite store for gameweek statistics and lineups
//! - **Standings**: League table and per-team history computed from stored lineups
//! - **Remote Sync**: Pull statistics and lineups from the league's hosted REST database
//!
//! ## Quick Start
//!
//! ```rust
//! use hoops_fantasy::{
//!     Gameweek, GameweekStats, Lineup, PlayerNumber, PlayerStatRow, ScoringEngine,
//! };
//!
//! let stats = GameweekStats::from_rows(
//!     Gameweek::new(1),
//!     (1..=5).map(|n| PlayerStatRow::new(PlayerNumber::new(n), format!("Player {n}"), Some(10.0))),
//! );
//! let lineup = Lineup::new(
//!     (1..=5).map(PlayerNumber::new).collect(),
//!     Some(PlayerNumber::new(1)),
//!     None,
//! );
//!
//! let engine = ScoringEngine::default();
//! assert_eq!(engine.total_points(&lineup, &stats), 60.0);
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export HOOPS_FANTASY_DB=~/league/league.db
//! export HOOPS_FANTASY_TRAITS=~/league/traits.json
//! export HOOPS_FANTASY_API_URL=https://league.example.com
//! export HOOPS_FANTASY_API_KEY=...
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod ranking;
pub mod remote;
pub mod scoring;
pub mod stats;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{CoachCode, Gameweek, PlayerNumber};
pub use error::{FantasyError, Result};
pub use scoring::{
    Lineup, ScoredBreakdown, ScoredPlayer, ScoringEngine, SynergyContext, TraitResolver,
    TraitTable,
};
pub use stats::{GameweekStats, PlayerStatRow, StatLookup};

pub const DB_PATH_ENV_VAR: &str = "HOOPS_FANTASY_DB";
pub const TRAITS_PATH_ENV_VAR: &str = "HOOPS_FANTASY_TRAITS";
pub const API_URL_ENV_VAR: &str = "HOOPS_FANTASY_API_URL";
pub const API_KEY_ENV_VAR: &str = "HOOPS_FANTASY_API_KEY";
