//! Error types for the hoops-fantasy CLI
//!
//! The scoring engine itself never fails; these errors come from the
//! collaborators around it (files, SQLite, the hosted REST service, CLI input).

use thiserror::Error;


pub type Result<T> = std::result::Result<T, FantasyError>;

#[derive(Error, Debug)]
pub enum FantasyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to parse number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("{what} not provided and {env_var} environment variable not set")]
    MissingConfig { what: String, env_var: String },

    #[error("No lineup for team '{team}' in gameweek {gameweek}")]
    LineupNotFound { team: String, gameweek: u16 },

    #[error("No lineups stored for team '{team}'")]
    TeamNotFound { team: String },

    #[error("No statistics stored for gameweek {gameweek}")]
    NoStats { gameweek: u16 },

    #[error("Invalid statistics data: {reason}")]
    InvalidStats { reason: String },

    #[error("Invalid lineup: {reason}")]
    InvalidLineup { reason: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl From<anyhow::Error> for FantasyError {
    fn from(err: anyhow::Error) -> Self {
        FantasyError::Storage {
            message: format!("{err:#}"),
        }
    }
}
