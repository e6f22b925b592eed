//! Per-type delivered quantity totals.

use std::collections::BTreeMap;

use supplyrecon_core::TypeId;

use crate::delivery::DeliveryRecord;

/// Delivered quantity per item type. An absent key means zero.
pub type DeliveryTotals = BTreeMap<TypeId, i64>;

/// Sum `quantity` per distinct type across `deliveries`.
///
/// Order-independent and additive. No clamping against requirements:
/// over-delivery is reported as-is. Sums saturate at `i64::MAX`.
pub fn aggregate<'a, I>(deliveries: I) -> DeliveryTotals
where
    I: IntoIterator<Item = &'a DeliveryRecord>,
{
    let mut totals = DeliveryTotals::new();
    for d in deliveries {
        let total = totals.entry(d.type_id()).or_insert(0);
        *total = total.saturating_add(d.quantity());
    }
    totals
}

/// Key-wise sum of two totals maps.
pub fn merge_totals(mut left: DeliveryTotals, right: &DeliveryTotals) -> DeliveryTotals {
    for (type_id, qty) in right {
        let total = left.entry(*type_id).or_insert(0);
        *total = total.saturating_add(*qty);
    }
    left
}
