//! HardSoftScore - Two-level score with hard and soft constraints

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::traits::{ParseableScore, Score, ScoreParseError};
use super::ScoreLevel;

/// A score with separate hard and soft constraint levels.
///
/// Hard constraints must be satisfied for a schedule to be feasible.
/// Soft constraints are optimization objectives.
///
/// When comparing scores:
/// 1. Hard scores are compared first
/// 2. Soft scores are only compared when hard scores are equal
///
/// # Examples
///
/// ```
/// use clubplan_core::HardSoftScore;
///
/// let broken = HardSoftScore::of(-1, 0);
/// let poor = HardSoftScore::of(0, -1000);
///
/// // Feasible schedules are always better than infeasible ones
/// assert!(poor > broken);
///
/// let better = HardSoftScore::of(0, -50);
/// assert!(better > poor);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HardSoftScore {
    hard: i64,
    soft: i64,
}

impl HardSoftScore {
    /// The zero score.
    pub const ZERO: HardSoftScore = HardSoftScore { hard: 0, soft: 0 };

    /// One hard constraint unit.
    pub const ONE_HARD: HardSoftScore = HardSoftScore { hard: 1, soft: 0 };

    /// One soft constraint unit.
    pub const ONE_SOFT: HardSoftScore = HardSoftScore { hard: 0, soft: 1 };

    /// Creates a new HardSoftScore.
    #[inline]
    pub const fn of(hard: i64, soft: i64) -> Self {
        HardSoftScore { hard, soft }
    }

    /// Creates a score with only a hard component.
    #[inline]
    pub const fn of_hard(hard: i64) -> Self {
        HardSoftScore { hard, soft: 0 }
    }

    /// Creates a score with only a soft component.
    #[inline]
    pub const fn of_soft(soft: i64) -> Self {
        HardSoftScore { hard: 0, soft }
    }

    /// Returns the hard score component.
    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    /// Returns the soft score component.
    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }

    /// Scales both levels by an integer weight.
    #[inline]
    pub const fn times(&self, factor: i64) -> Self {
        HardSoftScore::of(self.hard * factor, self.soft * factor)
    }
}

impl Score for HardSoftScore {
    #[inline]
    fn is_feasible(&self) -> bool {
        self.hard >= 0
    }

    #[inline]
    fn zero() -> Self {
        HardSoftScore::ZERO
    }

    #[inline]
    fn levels_count() -> usize {
        2
    }

    fn to_level_numbers(&self) -> Vec<i64> {
        vec![self.hard, self.soft]
    }

    fn from_level_numbers(levels: &[i64]) -> Self {
        let hard = levels.first().copied().unwrap_or(0);
        let soft = levels.get(1).copied().unwrap_or(0);
        HardSoftScore::of(hard, soft)
    }

    fn level_label(index: usize) -> Option<ScoreLevel> {
        match index {
            0 => Some(ScoreLevel::Hard),
            1 => Some(ScoreLevel::Soft),
            _ => None,
        }
    }
}

impl Ord for HardSoftScore {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.hard.cmp(&other.hard) {
            Ordering::Equal => self.soft.cmp(&other.soft),
            other => other,
        }
    }
}

impl PartialOrd for HardSoftScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for HardSoftScore {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        HardSoftScore::of(self.hard + other.hard, self.soft + other.soft)
    }
}

impl AddAssign for HardSoftScore {
    fn add_assign(&mut self, other: Self) {
        self.hard += other.hard;
        self.soft += other.soft;
    }
}

impl Sub for HardSoftScore {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        HardSoftScore::of(self.hard - other.hard, self.soft - other.soft)
    }
}

impl SubAssign for HardSoftScore {
    fn sub_assign(&mut self, other: Self) {
        self.hard -= other.hard;
        self.soft -= other.soft;
    }
}

impl Neg for HardSoftScore {
    type Output = Self;

    fn neg(self) -> Self {
        HardSoftScore::of(-self.hard, -self.soft)
    }
}

impl std::iter::Sum for HardSoftScore {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(HardSoftScore::ZERO, Add::add)
    }
}

impl fmt::Debug for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HardSoftScore({}, {})", self.hard, self.soft)
    }
}

impl fmt::Display for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}soft", self.hard, self.soft)
    }
}

impl ParseableScore for HardSoftScore {
    fn parse(s: &str) -> Result<Self, ScoreParseError> {
        let s = s.trim();
        let (hard_part, soft_part) = s.split_once('/').ok_or_else(|| ScoreParseError {
            message: format!("Invalid HardSoftScore format '{s}': expected 2 parts separated by '/'"),
        })?;
        let hard = parse_level(hard_part, "hard")?;
        let soft = parse_level(soft_part, "soft")?;
        Ok(HardSoftScore::of(hard, soft))
    }

    fn to_string_repr(&self) -> String {
        self.to_string()
    }
}

fn parse_level(part: &str, suffix: &str) -> Result<i64, ScoreParseError> {
    let part = part.trim();
    let num_str = part.strip_suffix(suffix).ok_or_else(|| ScoreParseError {
        message: format!("{suffix} part '{part}' must end with '{suffix}'"),
    })?;
    num_str.parse::<i64>().map_err(|e| ScoreParseError {
        message: format!("Invalid {suffix} score '{num_str}': {e}"),
    })
}

impl FromStr for HardSoftScore {
    type Err = ScoreParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <HardSoftScore as ParseableScore>::parse(s)
    }
}

impl Serialize for HardSoftScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HardSoftScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
