//! Command implementations for the hoops-fantasy CLI

pub mod common;
pub mod lineups;
pub mod score;
pub mod standings;
pub mod stats_data;
pub mod sync;
pub mod traits;

pub use common::CommandContext;
