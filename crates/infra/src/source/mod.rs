//! Event Source Adapter boundary.
//!
//! The only impure step of a reconciliation: fetching the asset snapshot and
//! the container audit log from wherever they live. Implementations own
//! paging and authentication; the reconciler treats each call as
//! atomic-or-failed and never sees partial data.

pub mod http;
pub mod in_memory;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use supplyrecon_core::{LocationId, TypeId};
use supplyrecon_events::MovementLogEntry;
use supplyrecon_inventory::InventoryItem;

pub use http::HttpEventSource;
pub use in_memory::InMemoryEventSource;

/// Why a fetch produced no data.
///
/// - **Unavailable**: transport failure (connect, timeout, TLS)
/// - **Http**: the API answered with a non-success status
/// - **Parse**: the body did not have the expected shape
/// - **MissingContext**: the caller did not configure what to fetch
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("data source unavailable: {0}")]
    Unavailable(String),

    #[error("data source returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("malformed data source response: {0}")]
    Parse(String),

    #[error("missing context: {0}")]
    MissingContext(String),
}

/// Read-only access to the upstream inventory system.
#[async_trait::async_trait]
pub trait EventSource: Send + Sync {
    /// Current asset records at `facility_id`.
    async fn fetch_asset_snapshot(
        &self,
        facility_id: LocationId,
    ) -> Result<Vec<InventoryItem>, SourceError>;

    /// Audit-log entries at `facility_id`, optionally bounded below by
    /// `since` (inclusive). Order is not guaranteed.
    async fn fetch_movement_log(
        &self,
        facility_id: LocationId,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<MovementLogEntry>, SourceError>;

    /// Display names for item types. Best effort: ids the source cannot
    /// resolve are simply absent.
    async fn resolve_type_names(
        &self,
        type_ids: &BTreeSet<TypeId>,
    ) -> Result<BTreeMap<TypeId, String>, SourceError>;
}

#[async_trait::async_trait]
impl<S> EventSource for Arc<S>
where
    S: EventSource + ?Sized,
{
    async fn fetch_asset_snapshot(
        &self,
        facility_id: LocationId,
    ) -> Result<Vec<InventoryItem>, SourceError> {
        (**self).fetch_asset_snapshot(facility_id).await
    }

    async fn fetch_movement_log(
        &self,
        facility_id: LocationId,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<MovementLogEntry>, SourceError> {
        (**self).fetch_movement_log(facility_id, since).await
    }

    async fn resolve_type_names(
        &self,
        type_ids: &BTreeSet<TypeId>,
    ) -> Result<BTreeMap<TypeId, String>, SourceError> {
        (**self).resolve_type_names(type_ids).await
    }
}
