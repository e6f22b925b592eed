//! Delivery reconciliation domain module.
//!
//! This crate contains the matching engine that turns a container audit log
//! into deliveries and compares them against a bill of materials. Everything
//! here is deterministic domain logic (no IO, no HTTP, no storage); callers
//! hand in logs and asset snapshots that were already fetched.

pub mod asset;
pub mod delivery;
pub mod extract;
pub mod progress;
pub mod snapshot;
pub mod totals;
pub mod verify;

#[cfg(test)]
mod fixtures;

#[cfg(feature = "simulation")]
pub mod simulate;

pub use asset::InventoryItem;
pub use delivery::{DeliveryRecord, DeliverySource};
pub use extract::extract_deliveries;
pub use progress::{RequirementProgress, fold_totals, required_type_ids};
pub use snapshot::current_contents;
pub use totals::{DeliveryTotals, aggregate, merge_totals};
pub use verify::{DeliveryClaim, find_delivery, verify_delivery};
