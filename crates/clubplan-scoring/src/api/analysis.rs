//! Score explanations: per-rule breakdowns and per-session indictments.

use std::collections::HashMap;

use clubplan_core::score::{Score, ScoreLevel};
use clubplan_core::ConstraintRef;

/// A session taking part in a match, by arena index and display id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityRef {
    pub index: usize,
    pub id: String,
}

impl EntityRef {
    pub fn new(index: usize, id: impl Into<String>) -> Self {
        Self {
            index,
            id: id.into(),
        }
    }
}

/// The sessions that caused a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintJustification {
    pub entities: Vec<EntityRef>,
}

impl ConstraintJustification {
    pub fn new(entities: Vec<EntityRef>) -> Self {
        Self { entities }
    }
}

/// One match of one rule and its score impact.
#[derive(Debug, Clone)]
pub struct DetailedConstraintMatch<Sc: Score> {
    pub constraint_ref: ConstraintRef,
    pub score: Sc,
    pub justification: ConstraintJustification,
}

impl<Sc: Score> DetailedConstraintMatch<Sc> {
    pub fn new(
        constraint_ref: ConstraintRef,
        score: Sc,
        justification: ConstraintJustification,
    ) -> Self {
        Self {
            constraint_ref,
            score,
            justification,
        }
    }

    /// Highest level on which this match's score is non-zero.
    pub fn level(&self) -> ScoreLevel {
        let levels = self.score.to_level_numbers();
        levels
            .iter()
            .position(|&v| v != 0)
            .and_then(Sc::level_label)
            .unwrap_or(ScoreLevel::Soft)
    }
}

/// One rule's total and its matches.
#[derive(Debug, Clone)]
pub struct ConstraintAnalysis<Sc: Score> {
    pub constraint_ref: ConstraintRef,
    /// Score of a single unit of match weight.
    pub weight: Sc,
    pub score: Sc,
    pub matches: Vec<DetailedConstraintMatch<Sc>>,
    pub is_hard: bool,
}

impl<Sc: Score> ConstraintAnalysis<Sc> {
    pub fn new(
        constraint_ref: ConstraintRef,
        weight: Sc,
        score: Sc,
        matches: Vec<DetailedConstraintMatch<Sc>>,
        is_hard: bool,
    ) -> Self {
        Self {
            constraint_ref,
            weight,
            score,
            matches,
            is_hard,
        }
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn name(&self) -> &str {
        &self.constraint_ref.name
    }

    pub fn level(&self) -> ScoreLevel {
        if self.is_hard {
            ScoreLevel::Hard
        } else {
            ScoreLevel::Soft
        }
    }
}

/// A total score with every rule's contribution, in rule order.
#[derive(Debug, Clone)]
pub struct ScoreExplanation<Sc: Score> {
    pub score: Sc,
    pub constraint_analyses: Vec<ConstraintAnalysis<Sc>>,
}

impl<Sc: Score> ScoreExplanation<Sc> {
    pub fn new(score: Sc, constraint_analyses: Vec<ConstraintAnalysis<Sc>>) -> Self {
        Self {
            score,
            constraint_analyses,
        }
    }

    pub fn total_match_count(&self) -> usize {
        self.constraint_analyses.iter().map(|a| a.match_count()).sum()
    }

    /// Rules that move the score, in rule order.
    pub fn non_zero_constraints(&self) -> impl Iterator<Item = &ConstraintAnalysis<Sc>> {
        self.constraint_analyses
            .iter()
            .filter(|a| a.score != Sc::zero())
    }

    pub fn constraint(&self, name: &str) -> Option<&ConstraintAnalysis<Sc>> {
        self.constraint_analyses.iter().find(|a| a.name() == name)
    }

    /// Every match, charged to each session it names.
    pub fn indictments(&self) -> IndictmentMap<Sc> {
        IndictmentMap::from_matches(
            self.constraint_analyses
                .iter()
                .flat_map(|a| a.matches.iter().cloned()),
        )
    }
}

/// The matches one session takes part in.
#[derive(Debug, Clone)]
pub struct Indictment<Sc: Score> {
    pub entity: EntityRef,
    /// Sum of the scores of all matches below.
    pub score: Sc,
    pub constraint_matches: HashMap<ConstraintRef, Vec<DetailedConstraintMatch<Sc>>>,
}

impl<Sc: Score> Indictment<Sc> {
    pub fn new(entity: EntityRef) -> Self {
        Self {
            entity,
            score: Sc::zero(),
            constraint_matches: HashMap::new(),
        }
    }

    pub fn add_match(&mut self, constraint_match: DetailedConstraintMatch<Sc>) {
        self.score = self.score + constraint_match.score;
        self.constraint_matches
            .entry(constraint_match.constraint_ref.clone())
            .or_default()
            .push(constraint_match);
    }

    /// Matched rules, sorted by package and name.
    pub fn violated_constraints(&self) -> Vec<&ConstraintRef> {
        let mut refs: Vec<_> = self.constraint_matches.keys().collect();
        refs.sort();
        refs
    }
}

/// Indictments keyed by session index.
#[derive(Debug, Clone)]
pub struct IndictmentMap<Sc: Score> {
    pub indictments: HashMap<usize, Indictment<Sc>>,
}

impl<Sc: Score> IndictmentMap<Sc> {
    /// A match naming several sessions is recorded in full against each.
    pub fn from_matches(matches: impl IntoIterator<Item = DetailedConstraintMatch<Sc>>) -> Self {
        let mut indictments: HashMap<usize, Indictment<Sc>> = HashMap::new();
        for m in matches {
            for entity in &m.justification.entities {
                indictments
                    .entry(entity.index)
                    .or_insert_with(|| Indictment::new(entity.clone()))
                    .add_match(m.clone());
            }
        }
        Self { indictments }
    }

    pub fn get(&self, index: usize) -> Option<&Indictment<Sc>> {
        self.indictments.get(&index)
    }
}
