//! Point verification of a single delivery claim.

use serde::{Deserialize, Serialize};

use supplyrecon_core::{CharacterId, Subdivision, TimeWindow, TypeId};
use supplyrecon_events::{Event, MovementAction, MovementLogEntry};

/// "Character X delivered N of type T into subdivision S during W."
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeliveryClaim {
    pub type_id: TypeId,
    pub quantity: i64,
    pub character_id: CharacterId,
    pub subdivision: Subdivision,
    pub window: TimeWindow,
}

impl DeliveryClaim {
    pub fn new(
        type_id: TypeId,
        quantity: i64,
        character_id: CharacterId,
        subdivision: Subdivision,
        window: TimeWindow,
    ) -> Self {
        Self {
            type_id,
            quantity,
            character_id,
            subdivision,
            window,
        }
    }

    /// Whether one log entry on its own substantiates this claim.
    pub fn is_satisfied_by(&self, entry: &MovementLogEntry) -> bool {
        entry.action == MovementAction::Add
            && entry.type_id == self.type_id
            && entry.quantity == self.quantity
            && entry.character_id == self.character_id
            && self.subdivision.matches_flag(&entry.location_flag)
            && self.window.contains(entry.occurred_at())
    }
}

/// First log entry that substantiates `claim`, if any.
///
/// This is stricter than extraction: quantity and actor must match a single
/// line exactly. A delivery split over two smaller lines does not verify even
/// when the parts sum to the claimed quantity.
pub fn find_delivery<'a, I>(logs: I, claim: &DeliveryClaim) -> Option<&'a MovementLogEntry>
where
    I: IntoIterator<Item = &'a MovementLogEntry>,
{
    logs.into_iter().find(|e| claim.is_satisfied_by(e))
}

pub fn verify_delivery<'a, I>(logs: I, claim: &DeliveryClaim) -> bool
where
    I: IntoIterator<Item = &'a MovementLogEntry>,
{
    find_delivery(logs, claim).is_some()
}
