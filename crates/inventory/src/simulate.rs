//! Synthetic deliveries for demos and tests without a live data source.
//!
//! Output is shaped exactly like real deliveries. Every record is marked
//! [`DeliverySource::Simulated`](crate::DeliverySource::Simulated) and
//! unverified; do not fold it into real reconciliation state.

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use rand::Rng;

use supplyrecon_core::{CharacterId, LocationId, Requirement, Subdivision};

use crate::delivery::DeliveryRecord;

/// Chance that an open requirement receives a delivery in one call.
pub const PROCEED_PROBABILITY: f64 = 0.7;

/// Plausible range of real actor ids.
pub const SIMULATED_ACTOR_IDS: RangeInclusive<i64> = 90_000_000..=98_000_000;

/// Facility every simulated delivery lands in.
pub const SIMULATED_FACILITY_ID: LocationId = LocationId::new(1_035_466_617_946);

/// Simulate deliveries arriving now.
pub fn simulate<R: Rng + ?Sized>(
    requirements: &[Requirement],
    subdivision: Subdivision,
    rng: &mut R,
) -> Vec<DeliveryRecord> {
    simulate_at(requirements, subdivision, Utc::now(), rng)
}

/// Simulate deliveries with an explicit timestamp.
///
/// For each requirement still short, proceed with [`PROCEED_PROBABILITY`] and
/// emit one delivery of `1..=max(1, remaining / 2)` units.
pub fn simulate_at<R: Rng + ?Sized>(
    requirements: &[Requirement],
    subdivision: Subdivision,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<DeliveryRecord> {
    let tag = subdivision.tag();
    requirements
        .iter()
        .filter(|r| r.quantity_delivered() < r.quantity_required())
        .filter_map(|r| {
            if !rng.gen_bool(PROCEED_PROBABILITY) {
                return None;
            }
            let upper = (r.remaining() / 2).max(1);
            let quantity = rng.gen_range(1..=upper);
            let actor = CharacterId::new(rng.gen_range(SIMULATED_ACTOR_IDS));
            Some(DeliveryRecord::simulated(
                r.type_id(),
                quantity,
                actor,
                now,
                SIMULATED_FACILITY_ID,
                tag.clone(),
            ))
        })
        .collect()
}
