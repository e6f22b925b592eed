//! Bill-of-materials requirements.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::TypeId;

/// One `(item type, quantity)` line of a project's bill of materials.
///
/// `quantity_delivered` is a running total owned by the caller; the core only
/// ever returns a new value with more deliveries folded in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRequirement")]
pub struct Requirement {
    type_id: TypeId,
    quantity_required: i64,
    quantity_delivered: i64,
}

impl Requirement {
    pub fn new(type_id: TypeId, quantity_required: i64, quantity_delivered: i64) -> DomainResult<Self> {
        if quantity_required <= 0 {
            return Err(DomainError::validation(format!(
                "quantity_required must be positive for type {type_id} (got {quantity_required})"
            )));
        }
        if quantity_delivered < 0 {
            return Err(DomainError::validation(format!(
                "quantity_delivered cannot be negative for type {type_id} (got {quantity_delivered})"
            )));
        }
        Ok(Self {
            type_id,
            quantity_required,
            quantity_delivered,
        })
    }

    /// A requirement with nothing delivered yet.
    pub fn outstanding(type_id: TypeId, quantity_required: i64) -> DomainResult<Self> {
        Self::new(type_id, quantity_required, 0)
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn quantity_required(&self) -> i64 {
        self.quantity_required
    }

    pub fn quantity_delivered(&self) -> i64 {
        self.quantity_delivered
    }

    /// Quantity still missing; zero once fulfilled or over-delivered.
    pub fn remaining(&self) -> i64 {
        (self.quantity_required - self.quantity_delivered).max(0)
    }

    /// Quantity delivered beyond the requirement.
    pub fn surplus(&self) -> i64 {
        (self.quantity_delivered - self.quantity_required).max(0)
    }

    pub fn is_fulfilled(&self) -> bool {
        self.quantity_delivered >= self.quantity_required
    }

    /// New requirement with `additional` folded into the delivered total.
    ///
    /// Negative amounts are ignored; over-delivery is kept as-is.
    pub fn with_delivered(self, additional: i64) -> Self {
        Self {
            quantity_delivered: self.quantity_delivered.saturating_add(additional.max(0)),
            ..self
        }
    }
}

#[derive(Deserialize)]
struct RawRequirement {
    type_id: TypeId,
    quantity_required: i64,
    #[serde(default)]
    quantity_delivered: i64,
}

impl TryFrom<RawRequirement> for Requirement {
    type Error = DomainError;

    fn try_from(raw: RawRequirement) -> Result<Self, Self::Error> {
        Self::new(raw.type_id, raw.quantity_required, raw.quantity_delivered)
    }
}
