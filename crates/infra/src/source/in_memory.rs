use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use supplyrecon_core::{LocationId, TypeId};
use supplyrecon_events::MovementLogEntry;
use supplyrecon_inventory::InventoryItem;

use super::{EventSource, SourceError};

/// In-memory event source.
///
/// Intended for tests/dev. Applies the same facility and `since` filtering a
/// real source would, and can be switched into a failing state to exercise
/// the degrade path.
#[derive(Debug, Default)]
pub struct InMemoryEventSource {
    assets: RwLock<Vec<InventoryItem>>,
    logs: RwLock<Vec<MovementLogEntry>>,
    type_names: RwLock<BTreeMap<TypeId, String>>,
    failure: RwLock<Option<SourceError>>,
}

impl InMemoryEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assets(self, assets: impl IntoIterator<Item = InventoryItem>) -> Self {
        self.push_assets(assets);
        self
    }

    pub fn with_logs(self, logs: impl IntoIterator<Item = MovementLogEntry>) -> Self {
        self.append_logs(logs);
        self
    }

    pub fn with_type_name(self, type_id: TypeId, name: impl Into<String>) -> Self {
        if let Ok(mut names) = self.type_names.write() {
            names.insert(type_id, name.into());
        }
        self
    }

    /// Append-only, like the real log.
    pub fn append_logs(&self, logs: impl IntoIterator<Item = MovementLogEntry>) {
        if let Ok(mut inner) = self.logs.write() {
            inner.extend(logs);
        }
    }

    pub fn push_assets(&self, assets: impl IntoIterator<Item = InventoryItem>) {
        if let Ok(mut inner) = self.assets.write() {
            inner.extend(assets);
        }
    }

    /// Make every subsequent call fail with `error` (until cleared).
    pub fn fail_with(&self, error: SourceError) {
        if let Ok(mut failure) = self.failure.write() {
            *failure = Some(error);
        }
    }

    pub fn clear_failure(&self) {
        if let Ok(mut failure) = self.failure.write() {
            *failure = None;
        }
    }

    fn check_failure(&self) -> Result<(), SourceError> {
        match self.failure.read() {
            Ok(failure) => match failure.as_ref() {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            },
            Err(_) => Err(SourceError::Unavailable("in-memory source lock poisoned".to_string())),
        }
    }
}

#[async_trait::async_trait]
impl EventSource for InMemoryEventSource {
    async fn fetch_asset_snapshot(
        &self,
        facility_id: LocationId,
    ) -> Result<Vec<InventoryItem>, SourceError> {
        self.check_failure()?;
        let assets = self
            .assets
            .read()
            .map_err(|_| SourceError::Unavailable("in-memory source lock poisoned".to_string()))?;
        Ok(assets
            .iter()
            .filter(|a| a.location_id == facility_id)
            .cloned()
            .collect())
    }

    async fn fetch_movement_log(
        &self,
        facility_id: LocationId,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<MovementLogEntry>, SourceError> {
        self.check_failure()?;
        let logs = self
            .logs
            .read()
            .map_err(|_| SourceError::Unavailable("in-memory source lock poisoned".to_string()))?;
        Ok(logs
            .iter()
            .filter(|e| e.location_id == facility_id)
            .filter(|e| since.is_none_or(|s| e.logged_at >= s))
            .cloned()
            .collect())
    }

    async fn resolve_type_names(
        &self,
        type_ids: &BTreeSet<TypeId>,
    ) -> Result<BTreeMap<TypeId, String>, SourceError> {
        self.check_failure()?;
        let names = self
            .type_names
            .read()
            .map_err(|_| SourceError::Unavailable("in-memory source lock poisoned".to_string()))?;
        Ok(type_ids
            .iter()
            .filter_map(|id| names.get(id).map(|n| (*id, n.clone())))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use supplyrecon_core::CharacterId;
    use supplyrecon_events::MovementAction;

    fn entry(facility: i64, at: DateTime<Utc>) -> MovementLogEntry {
        MovementLogEntry {
            logged_at: at,
            character_id: CharacterId::new(1),
            location_id: LocationId::new(facility),
            location_flag: "CorpSAG1".to_string(),
            action: MovementAction::Add,
            type_id: TypeId::new(34),
            quantity: 1,
            old_config_bitmask: None,
            new_config_bitmask: None,
            password_type: None,
        }
    }

    #[tokio::test]
    async fn since_bound_is_inclusive_and_facility_scoped() {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let source = InMemoryEventSource::new().with_logs([
            entry(1, t0 - Duration::seconds(1)),
            entry(1, t0),
            entry(1, t0 + Duration::hours(1)),
            entry(2, t0),
        ]);

        let logs = source.fetch_movement_log(LocationId::new(1), Some(t0)).await.unwrap();
        assert_eq!(logs.len(), 2);
        assert!(logs.iter().all(|e| e.logged_at >= t0));

        let all = source.fetch_movement_log(LocationId::new(1), None).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn failure_mode_applies_until_cleared() {
        let source = InMemoryEventSource::new();
        source.fail_with(SourceError::Unavailable("down".to_string()));
        assert!(source.fetch_asset_snapshot(LocationId::new(1)).await.is_err());

        source.clear_failure();
        assert!(source.fetch_asset_snapshot(LocationId::new(1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_type_names_are_absent() {
        let source = InMemoryEventSource::new().with_type_name(TypeId::new(34), "Tritanium");
        let ids = BTreeSet::from([TypeId::new(34), TypeId::new(35)]);
        let names = source.resolve_type_names(&ids).await.unwrap();
        assert_eq!(names.len(), 1);
        assert_eq!(names[&TypeId::new(34)], "Tritanium");
    }
}
