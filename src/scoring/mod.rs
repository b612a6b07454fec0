//! Fantasy lineup scoring.
//!
//! - `engine`: lineup evaluation and the scored breakdown
//! - `traits`: static trait tables and trait resolution
//! - `normalize`: display-name normalization for trait lookup

pub mod engine;
pub mod normalize;
pub mod traits;

pub use engine::{
    Lineup, ScoredBreakdown, ScoredPlayer, ScoringEngine, SynergyContext, LINEUP_SIZE,
};
pub use normalize::normalize_name;
pub use traits::{BySquadNumber, ByDisplayName, TraitResolver, TraitTable};
