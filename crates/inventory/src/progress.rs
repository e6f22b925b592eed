//! Folding delivered totals back into requirements.

use std::collections::BTreeSet;

use serde::Serialize;

use supplyrecon_core::{Requirement, TypeId};

use crate::totals::DeliveryTotals;

/// A requirement after this run's deliveries were folded in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementProgress {
    pub requirement: Requirement,
    /// Quantity this run contributed (zero when nothing matched).
    pub delivered_now: i64,
}

impl RequirementProgress {
    pub fn type_id(&self) -> TypeId {
        self.requirement.type_id()
    }

    pub fn remaining(&self) -> i64 {
        self.requirement.remaining()
    }

    pub fn surplus(&self) -> i64 {
        self.requirement.surplus()
    }

    pub fn is_fulfilled(&self) -> bool {
        self.requirement.is_fulfilled()
    }
}

/// Distinct type ids referenced by `requirements`.
pub fn required_type_ids(requirements: &[Requirement]) -> BTreeSet<TypeId> {
    requirements.iter().map(Requirement::type_id).collect()
}

/// Add each type's total onto the matching requirement(s).
///
/// Requirements keep their input order. Totals for types nobody requires are
/// ignored.
pub fn fold_totals(requirements: &[Requirement], totals: &DeliveryTotals) -> Vec<RequirementProgress> {
    requirements
        .iter()
        .map(|r| {
            let delivered_now = totals.get(&r.type_id()).copied().unwrap_or(0);
            RequirementProgress {
                requirement: r.with_delivered(delivered_now),
                delivered_now,
            }
        })
        .collect()
}
