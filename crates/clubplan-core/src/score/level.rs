use serde::{Deserialize, Serialize};

/// Score level representing different constraint priorities.
///
/// Maps to the semantic meaning of each level index within a [`Score`](super::Score).
/// Serialized as `HARD` / `SOFT` in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreLevel {
    /// Hard constraints - must be satisfied for feasibility.
    Hard,
    /// Soft constraints - optimization objectives.
    Soft,
}

impl std::fmt::Display for ScoreLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreLevel::Hard => f.pad("HARD"),
            ScoreLevel::Soft => f.pad("SOFT"),
        }
    }
}
