//! Infrastructure layer: data-source adapters, sync notifications, config,
//! and the reconciliation handle that ties them to the domain crate.

pub mod config;
pub mod notifier;
pub mod reconciler;
pub mod source;


pub use config::{ConfigError, SourceConfig};
pub use notifier::{NoopNotifier, RecordingNotifier, SyncNotification, SyncNotifier, TracingNotifier};
pub use reconciler::{ContentsSnapshot, Reconciler, Reconciliation, SourceStatus, Verification};
pub use source::{EventSource, HttpEventSource, InMemoryEventSource, SourceError};
