//! Sync-status notifications.
//!
//! The reconciler reports progress through [`SyncNotifier`]; persisting that
//! status or fanning it out to listeners is the implementor's business.

use std::sync::Mutex;

use supplyrecon_core::ProcessId;

/// Receiver of sync lifecycle callbacks.
///
/// Called synchronously from the reconciler; implementations should return
/// quickly and must not fail.
pub trait SyncNotifier: Send + Sync {
    fn on_sync_start(&self, process_id: ProcessId);

    /// `percent` is in `0..=100`.
    fn on_sync_progress(&self, process_id: ProcessId, percent: u8, step_label: &str);

    fn on_sync_complete(&self, process_id: ProcessId, duration_ms: u64, items_processed: Option<usize>);

    fn on_sync_error(&self, process_id: ProcessId, message: &str);
}

impl<N> SyncNotifier for std::sync::Arc<N>
where
    N: SyncNotifier + ?Sized,
{
    fn on_sync_start(&self, process_id: ProcessId) {
        (**self).on_sync_start(process_id)
    }

    fn on_sync_progress(&self, process_id: ProcessId, percent: u8, step_label: &str) {
        (**self).on_sync_progress(process_id, percent, step_label)
    }

    fn on_sync_complete(&self, process_id: ProcessId, duration_ms: u64, items_processed: Option<usize>) {
        (**self).on_sync_complete(process_id, duration_ms, items_processed)
    }

    fn on_sync_error(&self, process_id: ProcessId, message: &str) {
        (**self).on_sync_error(process_id, message)
    }
}

/// Discards every notification.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoopNotifier;

impl SyncNotifier for NoopNotifier {
    fn on_sync_start(&self, _process_id: ProcessId) {}

    fn on_sync_progress(&self, _process_id: ProcessId, _percent: u8, _step_label: &str) {}

    fn on_sync_complete(&self, _process_id: ProcessId, _duration_ms: u64, _items_processed: Option<usize>) {}

    fn on_sync_error(&self, _process_id: ProcessId, _message: &str) {}
}

/// Emits each notification as a structured log line.
#[derive(Debug, Default, Copy, Clone)]
pub struct TracingNotifier;

impl SyncNotifier for TracingNotifier {
    fn on_sync_start(&self, process_id: ProcessId) {
        tracing::info!(%process_id, "sync started");
    }

    fn on_sync_progress(&self, process_id: ProcessId, percent: u8, step_label: &str) {
        tracing::debug!(%process_id, percent, step = step_label, "sync progress");
    }

    fn on_sync_complete(&self, process_id: ProcessId, duration_ms: u64, items_processed: Option<usize>) {
        tracing::info!(%process_id, duration_ms, ?items_processed, "sync complete");
    }

    fn on_sync_error(&self, process_id: ProcessId, message: &str) {
        tracing::warn!(%process_id, error = message, "sync failed");
    }
}

/// One recorded callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncNotification {
    Started(ProcessId),
    Progress {
        process_id: ProcessId,
        percent: u8,
        step: String,
    },
    Completed {
        process_id: ProcessId,
        duration_ms: u64,
        items_processed: Option<usize>,
    },
    Failed {
        process_id: ProcessId,
        message: String,
    },
}

/// In-memory notifier for tests/dev.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    inner: Mutex<Vec<SyncNotification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<SyncNotification> {
        self.inner.lock().map(|v| v.clone()).unwrap_or_default()
    }

    fn record(&self, n: SyncNotification) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.push(n);
        }
    }
}

impl SyncNotifier for RecordingNotifier {
    fn on_sync_start(&self, process_id: ProcessId) {
        self.record(SyncNotification::Started(process_id));
    }

    fn on_sync_progress(&self, process_id: ProcessId, percent: u8, step_label: &str) {
        self.record(SyncNotification::Progress {
            process_id,
            percent,
            step: step_label.to_string(),
        });
    }

    fn on_sync_complete(&self, process_id: ProcessId, duration_ms: u64, items_processed: Option<usize>) {
        self.record(SyncNotification::Completed {
            process_id,
            duration_ms,
            items_processed,
        });
    }

    fn on_sync_error(&self, process_id: ProcessId, message: &str) {
        self.record(SyncNotification::Failed {
            process_id,
            message: message.to_string(),
        });
    }
}
