//! `supplyrecon-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the subdivision tag convention, time windows and
//! bill-of-materials requirements.

pub mod entity;
pub mod error;
pub mod id;
pub mod requirement;
pub mod subdivision;
pub mod window;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CharacterId, ItemId, LocationId, ProcessId, TypeId};
pub use requirement::Requirement;
pub use subdivision::{Subdivision, UNIVERSAL_INBOUND_TAG, tag_for};
pub use window::TimeWindow;
