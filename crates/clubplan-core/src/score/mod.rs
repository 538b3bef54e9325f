//! Score types for representing schedule quality
//!
//! Scores are used to compare schedules and guide the search.
//! They are immutable values with lexicographic ordering.

mod hard_soft;
mod level;
mod traits;


pub use hard_soft::HardSoftScore;
pub use level::ScoreLevel;
pub use traits::{ParseableScore, Score, ScoreParseError};
