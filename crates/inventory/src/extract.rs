//! Delivery extraction: audit log -> deliveries into one subdivision.

use std::collections::HashSet;

use supplyrecon_core::{Subdivision, TypeId};
use supplyrecon_events::{MovementAction, MovementLogEntry};

use crate::delivery::DeliveryRecord;

/// Select the log entries that are deliveries of required item types into
/// `subdivision`.
///
/// An entry qualifies when ALL hold:
/// - `action == add`
/// - `location_flag` equals the subdivision tag exactly (the universal inbound
///   area does not count)
/// - `type_id` is one of `required_type_ids`
///
/// Quantity does not gate selection. Output keeps input order, one record per
/// matching entry, each marked verified.
pub fn extract_deliveries<'a, I>(
    logs: I,
    subdivision: Subdivision,
    required_type_ids: impl IntoIterator<Item = TypeId>,
) -> Vec<DeliveryRecord>
where
    I: IntoIterator<Item = &'a MovementLogEntry>,
{
    let required: HashSet<TypeId> = required_type_ids.into_iter().collect();
    if required.is_empty() {
        return Vec::new();
    }

    let tag = subdivision.tag();
    logs.into_iter()
        .filter(|e| e.action == MovementAction::Add)
        .filter(|e| e.location_flag == tag)
        .filter(|e| required.contains(&e.type_id))
        .map(DeliveryRecord::observed)
        .collect()
}
