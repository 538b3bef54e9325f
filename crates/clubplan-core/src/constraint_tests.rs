//! Tests for constraint types

use super::constraint::*;

#[test]
fn test_constraint_ref_full_name() {
    let cr = ConstraintRef::new("club.rules", "Trainer conflict");
    assert_eq!(cr.full_name(), "club.rules/Trainer conflict");
}

#[test]
fn test_constraint_ref_empty_package() {
    let cr = ConstraintRef::new("", "Simple");
    assert_eq!(cr.full_name(), "Simple");
}

#[test]
fn test_builtin_package() {
    let cr = ConstraintRef::builtin("Field capacity");
    assert_eq!(cr.package, CONSTRAINT_PACKAGE);
    assert_eq!(cr.full_name(), "clubplan/Field capacity");
}

#[test]
fn test_impact_sign() {
    assert_ne!(ImpactType::Penalty, ImpactType::Reward);
    assert_eq!(ImpactType::Penalty.sign(), -1);
    assert_eq!(ImpactType::Reward.sign(), 1);
}
