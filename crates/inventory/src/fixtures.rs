//! Shared builders for unit tests.

use chrono::{DateTime, TimeZone, Utc};

use supplyrecon_core::{CharacterId, LocationId, TypeId};
use supplyrecon_events::{MovementAction, MovementLogEntry};

pub(crate) const FACILITY: LocationId = LocationId::new(1_030_000_000_000);

pub(crate) fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

pub(crate) fn log(
    action: MovementAction,
    type_id: i32,
    quantity: i64,
    character: i64,
    flag: &str,
    at: DateTime<Utc>,
) -> MovementLogEntry {
    MovementLogEntry {
        logged_at: at,
        character_id: CharacterId::new(character),
        location_id: FACILITY,
        location_flag: flag.to_string(),
        action,
        type_id: TypeId::new(type_id),
        quantity,
        old_config_bitmask: None,
        new_config_bitmask: None,
        password_type: None,
    }
}

pub(crate) fn add(type_id: i32, quantity: i64, flag: &str) -> MovementLogEntry {
    log(MovementAction::Add, type_id, quantity, 123, flag, t0())
}
