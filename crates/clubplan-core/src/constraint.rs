//! Constraint identity and impact direction.
//!
//! Every scoring rule is addressed by a [`ConstraintRef`]; reports group
//! matches by it and indictments key their breakdown on it.

use serde::{Deserialize, Serialize};

/// Package shared by all built-in scheduling rules.
pub const CONSTRAINT_PACKAGE: &str = "clubplan";

/// Reference to a constraint for identification.
///
/// # Example
///
/// ```
/// use clubplan_core::ConstraintRef;
///
/// let cr = ConstraintRef::new("clubplan", "Team conflict");
/// assert_eq!(cr.full_name(), "clubplan/Team conflict");
///
/// let bare = ConstraintRef::new("", "Field capacity");
/// assert_eq!(bare.full_name(), "Field capacity");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConstraintRef {
    /// Package/module containing the constraint.
    pub package: String,
    /// Name of the constraint.
    pub name: String,
}

impl ConstraintRef {
    /// Creates a new constraint reference.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Creates a reference in the built-in rule package.
    pub fn builtin(name: impl Into<String>) -> Self {
        Self::new(CONSTRAINT_PACKAGE, name)
    }

    /// Returns the fully qualified name.
    pub fn full_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.package, self.name)
        }
    }
}

/// Type of impact a constraint has on the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImpactType {
    /// Penalize (subtract from score).
    Penalty,
    /// Reward (add to score).
    Reward,
}

impl ImpactType {
    /// Sign applied to a rule's raw match weight.
    pub fn sign(self) -> i64 {
        match self {
            ImpactType::Penalty => -1,
            ImpactType::Reward => 1,
        }
    }
}
