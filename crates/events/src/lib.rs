//! Container audit-log vocabulary.
//!
//! The upstream system records every inventory-affecting action on a
//! container as an immutable, append-only log line. This crate models those
//! lines; it does not produce or store them.

pub mod event;
pub mod movement;

pub use event::Event;
pub use movement::{MovementAction, MovementLogEntry, PasswordType, UnknownAction};
