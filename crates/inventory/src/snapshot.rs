//! Current on-hand contents from an asset snapshot.

use supplyrecon_core::Subdivision;

use crate::asset::InventoryItem;
use crate::totals::DeliveryTotals;

/// Sum on-hand quantity per type for assets in `subdivision`.
///
/// Unlike extraction, goods still sitting in the universal inbound area count
/// as part of the subdivision's contents. Sums saturate at `i64::MAX`.
pub fn current_contents<'a, I>(assets: I, subdivision: Subdivision) -> DeliveryTotals
where
    I: IntoIterator<Item = &'a InventoryItem>,
{
    let mut totals = DeliveryTotals::new();
    for item in assets
        .into_iter()
        .filter(|a| subdivision.holds_flag(&a.location_flag))
    {
        let total = totals.entry(item.type_id).or_insert(0);
        *total = total.saturating_add(item.quantity);
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FACILITY;
    use supplyrecon_core::{ItemId, TypeId};

    fn asset(item_id: i64, type_id: i32, quantity: i64, flag: &str) -> InventoryItem {
        InventoryItem {
            item_id: ItemId::new(item_id),
            type_id: TypeId::new(type_id),
            location_id: FACILITY,
            location_flag: flag.to_string(),
            quantity,
            is_singleton: false,
            is_blueprint_copy: None,
        }
    }

    #[test]
    fn sums_own_tag_and_inbound_area() {
        let assets = vec![
            asset(1, 34, 300, "CorpSAG2"),
            asset(2, 34, 50, "CorpDeliveries"),
            asset(3, 35, 10, "CorpSAG2"),
            asset(4, 34, 1_000, "CorpSAG1"),
            asset(5, 34, 7, "Hangar"),
        ];

        let totals = current_contents(&assets, Subdivision::new(2).unwrap());

        assert_eq!(
            totals,
            DeliveryTotals::from([(TypeId::new(34), 350), (TypeId::new(35), 10)])
        );
    }

    #[test]
    fn result_ignores_asset_order() {
        let mut assets = vec![
            asset(1, 34, 300, "CorpSAG4"),
            asset(2, 36, 5, "CorpDeliveries"),
            asset(3, 34, 20, "CorpSAG4"),
        ];
        let sag4 = Subdivision::new(4).unwrap();
        let forward = current_contents(&assets, sag4);
        assets.reverse();
        assert_eq!(forward, current_contents(&assets, sag4));
    }

    #[test]
    fn oversized_stacks_saturate() {
        let assets = vec![
            asset(1, 34, i64::MAX, "CorpSAG2"),
            asset(2, 34, 1, "CorpDeliveries"),
        ];
        let totals = current_contents(&assets, Subdivision::new(2).unwrap());
        assert_eq!(totals[&TypeId::new(34)], i64::MAX);
    }

    #[test]
    fn empty_snapshot_is_empty() {
        assert!(current_contents(&Vec::<InventoryItem>::new(), Subdivision::new(1).unwrap()).is_empty());
    }
}
