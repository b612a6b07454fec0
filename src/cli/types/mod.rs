//! Type-safe wrappers for fantasy league identifiers.

pub mod ids;

pub use ids::{CoachCode, Gameweek, PlayerNumber};
