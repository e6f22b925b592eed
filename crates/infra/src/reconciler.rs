//! Reconciliation handle: fetch -> extract -> aggregate / verify.
//!
//! Outward calls never fail. A fetch failure degrades to an empty result,
//! but unlike a bare empty collection the result carries a [`SourceStatus`]
//! (or [`Verification::SourceUnavailable`]) so callers can tell "nothing was
//! delivered" from "we could not look".

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use supplyrecon_core::{LocationId, ProcessId, Requirement, Subdivision, TypeId};
use supplyrecon_events::{Event, MovementLogEntry};
use supplyrecon_inventory::{
    DeliveryClaim, DeliveryRecord, DeliveryTotals, RequirementProgress, aggregate, current_contents,
    extract_deliveries, find_delivery, fold_totals, required_type_ids,
};

use crate::notifier::{NoopNotifier, SyncNotifier};
use crate::source::{EventSource, SourceError};

/// Whether the data behind a result was actually fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceStatus {
    Available,
    Unavailable { reason: String },
}

impl SourceStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, SourceStatus::Available)
    }

    fn from_error(err: &SourceError) -> Self {
        SourceStatus::Unavailable {
            reason: err.to_string(),
        }
    }
}

/// Outcome of one requirement-matching run for a subdivision.
#[derive(Debug, Clone, Serialize)]
pub struct Reconciliation {
    pub process_id: ProcessId,
    pub subdivision: Subdivision,
    pub deliveries: Vec<DeliveryRecord>,
    pub totals: DeliveryTotals,
    pub progress: Vec<RequirementProgress>,
    pub source: SourceStatus,
}

impl Reconciliation {
    /// True when every requirement is met. A run whose fetch failed is never
    /// complete unless the requirements were already met going in.
    pub fn is_complete(&self) -> bool {
        self.progress.iter().all(RequirementProgress::is_fulfilled)
    }

    pub fn outstanding(&self) -> impl Iterator<Item = &RequirementProgress> {
        self.progress.iter().filter(|p| !p.is_fulfilled())
    }
}

/// Outcome of a point verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// The log line that substantiates the claim.
    Verified(MovementLogEntry),
    NotFound,
    SourceUnavailable(String),
}

impl Verification {
    pub fn is_verified(&self) -> bool {
        matches!(self, Verification::Verified(_))
    }
}

/// On-hand contents of a subdivision at fetch time.
#[derive(Debug, Clone, Serialize)]
pub struct ContentsSnapshot {
    pub subdivision: Subdivision,
    pub contents: DeliveryTotals,
    pub source: SourceStatus,
}

/// Explicit handle over one data source and one facility.
///
/// Built once at startup and passed to call sites. Holds no mutable state,
/// so calls for different subdivisions may run concurrently.
#[derive(Debug)]
pub struct Reconciler<S, N = NoopNotifier> {
    source: S,
    notifier: N,
    facility_id: Option<LocationId>,
}

impl<S> Reconciler<S, NoopNotifier>
where
    S: EventSource,
{
    pub fn new(source: S, facility_id: Option<LocationId>) -> Self {
        Self {
            source,
            notifier: NoopNotifier,
            facility_id,
        }
    }
}

impl<S, N> Reconciler<S, N>
where
    S: EventSource,
    N: SyncNotifier,
{
    pub fn with_notifier<M: SyncNotifier>(self, notifier: M) -> Reconciler<S, M> {
        Reconciler {
            source: self.source,
            notifier,
            facility_id: self.facility_id,
        }
    }

    pub fn facility_id(&self) -> Option<LocationId> {
        self.facility_id
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn require_facility(&self) -> Result<LocationId, SourceError> {
        self.facility_id
            .ok_or_else(|| SourceError::MissingContext("no facility configured".to_string()))
    }

    async fn fetch_logs(&self, since: Option<DateTime<Utc>>) -> Result<Vec<MovementLogEntry>, SourceError> {
        let facility = self.require_facility()?;
        self.source.fetch_movement_log(facility, since).await
    }

    fn fail(&self, process_id: ProcessId, err: &SourceError) {
        tracing::warn!(%process_id, error = %err, "fetch failed; degrading to empty result");
        self.notifier.on_sync_error(process_id, &err.to_string());
    }

    fn complete(&self, process_id: ProcessId, started: Instant, items: usize) {
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.notifier.on_sync_complete(process_id, duration_ms, Some(items));
    }

    /// Deliveries of `required_type_ids` into `subdivision`, or the reason
    /// none could be fetched.
    pub async fn deliveries(
        &self,
        subdivision: Subdivision,
        required_type_ids: impl IntoIterator<Item = TypeId>,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<DeliveryRecord>, SourceError> {
        let logs = self.fetch_logs(since).await?;
        Ok(extract_deliveries(&logs, subdivision, required_type_ids))
    }

    /// Match the log against `requirements` for one subdivision.
    ///
    /// Notifies: start (before fetch), progress after extraction, progress
    /// after aggregation, then complete, or error if the fetch failed.
    pub async fn reconcile(
        &self,
        subdivision: Subdivision,
        requirements: &[Requirement],
        since: Option<DateTime<Utc>>,
    ) -> Reconciliation {
        let process_id = ProcessId::new();
        let started = Instant::now();
        self.notifier.on_sync_start(process_id);

        let logs = match self.fetch_logs(since).await {
            Ok(logs) => logs,
            Err(err) => {
                self.fail(process_id, &err);
                return Reconciliation {
                    process_id,
                    subdivision,
                    deliveries: Vec::new(),
                    totals: DeliveryTotals::new(),
                    progress: fold_totals(requirements, &DeliveryTotals::new()),
                    source: SourceStatus::from_error(&err),
                };
            }
        };

        if tracing::enabled!(tracing::Level::DEBUG) {
            let mut by_type: HashMap<&'static str, usize> = HashMap::new();
            for e in &logs {
                *by_type.entry(e.event_type()).or_insert(0) += 1;
            }
            tracing::debug!(%process_id, ?by_type, "movement log fetched");
        }

        let required = required_type_ids(requirements);
        let deliveries = extract_deliveries(&logs, subdivision, required.iter().copied());
        self.notifier.on_sync_progress(process_id, 50, "extracted deliveries");

        let totals = aggregate(&deliveries);
        self.notifier.on_sync_progress(process_id, 90, "aggregated deliveries");

        let progress = fold_totals(requirements, &totals);

        tracing::info!(
            %process_id,
            %subdivision,
            entries = logs.len(),
            matched = deliveries.len(),
            "reconciliation complete"
        );
        self.complete(process_id, started, logs.len());

        Reconciliation {
            process_id,
            subdivision,
            deliveries,
            totals,
            progress,
            source: SourceStatus::Available,
        }
    }

    /// Look for one log line that substantiates `claim`.
    ///
    /// The log is fetched with `since = claim.window.start()`.
    pub async fn verify(&self, claim: &DeliveryClaim) -> Verification {
        let process_id = ProcessId::new();
        let started = Instant::now();
        self.notifier.on_sync_start(process_id);

        let logs = match self.fetch_logs(Some(claim.window.start())).await {
            Ok(logs) => logs,
            Err(err) => {
                self.fail(process_id, &err);
                return Verification::SourceUnavailable(err.to_string());
            }
        };

        let outcome = match find_delivery(&logs, claim) {
            Some(entry) => Verification::Verified(entry.clone()),
            None => Verification::NotFound,
        };

        tracing::info!(
            %process_id,
            type_id = %claim.type_id,
            character_id = %claim.character_id,
            verified = outcome.is_verified(),
            "delivery verification"
        );
        self.complete(process_id, started, logs.len());
        outcome
    }

    /// Yes/no form of [`Reconciler::verify`]; a failed fetch answers `false`.
    pub async fn verify_delivery(&self, claim: &DeliveryClaim) -> bool {
        self.verify(claim).await.is_verified()
    }

    /// On-hand quantity per type in `subdivision`, counting the universal
    /// inbound area.
    pub async fn current_contents(&self, subdivision: Subdivision) -> ContentsSnapshot {
        let process_id = ProcessId::new();
        let started = Instant::now();
        self.notifier.on_sync_start(process_id);

        let fetched = match self.require_facility() {
            Ok(facility) => self.source.fetch_asset_snapshot(facility).await,
            Err(err) => Err(err),
        };

        match fetched {
            Ok(assets) => {
                let contents = current_contents(&assets, subdivision);
                self.complete(process_id, started, assets.len());
                ContentsSnapshot {
                    subdivision,
                    contents,
                    source: SourceStatus::Available,
                }
            }
            Err(err) => {
                self.fail(process_id, &err);
                ContentsSnapshot {
                    subdivision,
                    contents: DeliveryTotals::new(),
                    source: SourceStatus::from_error(&err),
                }
            }
        }
    }

    /// Display names for presentation. Failures yield an empty map.
    pub async fn type_names(&self, type_ids: &BTreeSet<TypeId>) -> BTreeMap<TypeId, String> {
        match self.source.resolve_type_names(type_ids).await {
            Ok(names) => names,
            Err(err) => {
                tracing::warn!(error = %err, requested = type_ids.len(), "type name resolution failed");
                BTreeMap::new()
            }
        }
    }
}
