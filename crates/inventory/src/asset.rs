use serde::{Deserialize, Serialize};

use supplyrecon_core::{Entity, ItemId, LocationId, TypeId};

/// Current-state asset record (one stack or singleton at a location).
///
/// Owned by the data source; the core only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub item_id: ItemId,
    pub type_id: TypeId,
    pub location_id: LocationId,
    pub location_flag: String,
    pub quantity: i64,
    pub is_singleton: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_blueprint_copy: Option<bool>,
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.item_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_asset_records() {
        let json = r#"[
            {"item_id": 1, "type_id": 34, "location_id": 99, "location_flag": "CorpSAG2",
             "quantity": 500, "is_singleton": false},
            {"item_id": 2, "type_id": 2046, "location_id": 99, "location_flag": "CorpDeliveries",
             "quantity": 1, "is_singleton": true, "is_blueprint_copy": true}
        ]"#;
        let items: Vec<InventoryItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id(), &ItemId::new(1));
        assert_eq!(items[0].is_blueprint_copy, None);
        assert_eq!(items[1].is_blueprint_copy, Some(true));
    }
}
