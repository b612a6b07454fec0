//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::{CoachCode, Gameweek, PlayerNumber};

/// Options shared by every command
#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// SQLite database file (or set `HOOPS_FANTASY_DB`).
    #[clap(long, global = true)]
    pub db: Option<PathBuf>,

    /// Trait table JSON replacing the built-in one (or set `HOOPS_FANTASY_TRAITS`).
    #[clap(long, global = true)]
    pub traits: Option<PathBuf>,

    /// Debug logging and extra progress output.
    #[clap(long, short, global = true)]
    pub verbose: bool,
}

/// Lineup given on the command line
#[derive(Debug, Args)]
pub struct LineupArgs {
    /// Five squad numbers, comma separated: `--players 4,7,8,11,15`.
    #[clap(long, short = 'p', value_delimiter = ',', num_args = 1..)]
    pub players: Vec<PlayerNumber>,

    /// Squad number of the captain (scores double).
    #[clap(long, short)]
    pub captain: Option<PlayerNumber>,

    /// Coach code, e.g. `MK`.
    #[clap(long)]
    pub coach: Option<CoachCode>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score a lineup and print the per-player breakdown.
    ///
    /// Either a stored lineup (`--team` + `--gameweek`) or an ad-hoc one
    /// (`--players ...` + `--stats FILE`).
    Score {
        /// Team whose stored lineup to score.
        #[clap(long, short, conflicts_with = "players")]
        team: Option<String>,

        /// Gameweek to score.
        #[clap(long, short)]
        gameweek: Option<Gameweek>,

        #[clap(flatten)]
        lineup: LineupArgs,

        /// Stats JSON file to score against instead of the database.
        #[clap(long)]
        stats: Option<PathBuf>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// League table: every stored lineup scored and summed per team.
    Standings {
        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// A team's gameweek-by-gameweek results.
    History {
        #[clap(long, short)]
        team: String,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Load a gameweek's statistics from a JSON file into the database.
    ImportStats {
        #[clap(long, short)]
        file: PathBuf,

        /// Gameweek, required when the file is a bare array of rows.
        #[clap(long, short)]
        gameweek: Option<Gameweek>,
    },

    /// Store (or replace) a team's lineup for a gameweek.
    SubmitLineup {
        #[clap(long, short)]
        team: String,

        #[clap(long, short)]
        gameweek: Gameweek,

        #[clap(flatten)]
        lineup: LineupArgs,
    },

    /// Pull statistics and lineups for a gameweek from the hosted database.
    Sync {
        #[clap(long, short)]
        gameweek: Gameweek,

        /// REST base URL (or set `HOOPS_FANTASY_API_URL`).
        #[clap(long)]
        api_url: Option<String>,

        /// API key (or set `HOOPS_FANTASY_API_KEY`).
        #[clap(long)]
        api_key: Option<String>,

        /// Only fetch statistics, leave lineups alone.
        #[clap(long)]
        stats_only: bool,
    },

    /// Top performers of a gameweek by performance index.
    Stats {
        #[clap(long, short)]
        gameweek: Gameweek,

        /// Number of players to show.
        #[clap(long, default_value_t = 10)]
        top: usize,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Print the active trait table as JSON.
    Traits,
}

#[derive(Debug, Parser)]
#[clap(name = "hoops-fantasy", about = "Basketball fantasy league scoring CLI")]
pub struct HoopsFantasy {
    #[clap(flatten)]
    pub global: GlobalOpts,

    #[clap(subcommand)]
    pub command: Commands,
}
