use chrono::{DateTime, Utc};
use serde::Serialize;

use supplyrecon_core::{CharacterId, LocationId, TypeId};
use supplyrecon_events::MovementLogEntry;

/// Where a delivery record came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliverySource {
    /// Derived from a real audit-log entry.
    Observed,
    /// Fabricated by the simulation generator.
    Simulated,
}

/// A delivery derived from one audit-log entry.
///
/// Records are transient: built per reconciliation call, never mutated.
/// Construction is restricted to this crate so every record is either
/// backed by a matching log entry or visibly marked as simulated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryRecord {
    type_id: TypeId,
    quantity: i64,
    character_id: CharacterId,
    timestamp: DateTime<Utc>,
    location_id: LocationId,
    location_flag: String,
    verified: bool,
    source: DeliverySource,
}

impl DeliveryRecord {
    /// Record for a log entry that already passed the extraction predicate.
    pub(crate) fn observed(entry: &MovementLogEntry) -> Self {
        Self {
            type_id: entry.type_id,
            quantity: entry.quantity,
            character_id: entry.character_id,
            timestamp: entry.logged_at,
            location_id: entry.location_id,
            location_flag: entry.location_flag.clone(),
            verified: true,
            source: DeliverySource::Observed,
        }
    }

    #[cfg(feature = "simulation")]
    pub(crate) fn simulated(
        type_id: TypeId,
        quantity: i64,
        character_id: CharacterId,
        timestamp: DateTime<Utc>,
        location_id: LocationId,
        location_flag: String,
    ) -> Self {
        Self {
            type_id,
            quantity,
            character_id,
            timestamp,
            location_id,
            location_flag,
            verified: false,
            source: DeliverySource::Simulated,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn character_id(&self) -> CharacterId {
        self.character_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn location_id(&self) -> LocationId {
        self.location_id
    }

    pub fn location_flag(&self) -> &str {
        &self.location_flag
    }

    pub fn verified(&self) -> bool {
        self.verified
    }

    pub fn source(&self) -> DeliverySource {
        self.source
    }

    pub fn is_simulated(&self) -> bool {
        self.source == DeliverySource::Simulated
    }
}

