use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use supplyrecon_core::{CharacterId, LocationId, TypeId};

use crate::event::Event;

/// What happened to a container.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementAction {
    Add,
    Remove,
    Configure,
    Lock,
    Unlock,
    PasswordConfigure,
    PasswordCheck,
}

impl MovementAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementAction::Add => "add",
            MovementAction::Remove => "remove",
            MovementAction::Configure => "configure",
            MovementAction::Lock => "lock",
            MovementAction::Unlock => "unlock",
            MovementAction::PasswordConfigure => "password_configure",
            MovementAction::PasswordCheck => "password_check",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown movement action: {0}")]
pub struct UnknownAction(pub String);

impl core::str::FromStr for MovementAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(MovementAction::Add),
            "remove" => Ok(MovementAction::Remove),
            "configure" => Ok(MovementAction::Configure),
            "lock" => Ok(MovementAction::Lock),
            "unlock" => Ok(MovementAction::Unlock),
            "password_configure" => Ok(MovementAction::PasswordConfigure),
            "password_check" => Ok(MovementAction::PasswordCheck),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

impl core::fmt::Display for MovementAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which container password a `password_*` entry refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordType {
    Config,
    General,
}

/// One immutable line of the container audit log.
///
/// Field names follow the upstream wire format so the type deserializes
/// straight from API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementLogEntry {
    pub logged_at: DateTime<Utc>,
    pub character_id: CharacterId,
    pub location_id: LocationId,
    pub location_flag: String,
    pub action: MovementAction,
    /// Absent for actions that don't move goods (lock, configure, ...).
    #[serde(default = "unset_type_id")]
    pub type_id: TypeId,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_config_bitmask: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_config_bitmask: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_type: Option<PasswordType>,
}

fn unset_type_id() -> TypeId {
    TypeId::new(0)
}

impl MovementLogEntry {
    /// Whether this line could describe goods arriving. Only `add` entries
    /// with a positive quantity qualify.
    pub fn is_inbound(&self) -> bool {
        self.action == MovementAction::Add && self.quantity > 0
    }
}

impl Event for MovementLogEntry {
    fn event_type(&self) -> &'static str {
        match self.action {
            MovementAction::Add => "container.log.add",
            MovementAction::Remove => "container.log.remove",
            MovementAction::Configure => "container.log.configure",
            MovementAction::Lock => "container.log.lock",
            MovementAction::Unlock => "container.log.unlock",
            MovementAction::PasswordConfigure => "container.log.password_configure",
            MovementAction::PasswordCheck => "container.log.password_check",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.logged_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(action: MovementAction, quantity: i64, minute: u32) -> MovementLogEntry {
        MovementLogEntry {
            logged_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, minute, 0).unwrap(),
            character_id: CharacterId::new(123),
            location_id: LocationId::new(1_000),
            location_flag: "CorpSAG2".to_string(),
            action,
            type_id: TypeId::new(34),
            quantity,
            old_config_bitmask: None,
            new_config_bitmask: None,
            password_type: None,
        }
    }

    #[test]
    fn action_names_round_trip_through_from_str() {
        for action in [
            MovementAction::Add,
            MovementAction::Remove,
            MovementAction::Configure,
            MovementAction::Lock,
            MovementAction::Unlock,
            MovementAction::PasswordConfigure,
            MovementAction::PasswordCheck,
        ] {
            assert_eq!(action.as_str().parse::<MovementAction>().unwrap(), action);
        }
        assert!("assemble".parse::<MovementAction>().is_err());
    }

    #[test]
    fn deserializes_upstream_wire_format() {
        let json = r#"{
            "logged_at": "2024-03-01T12:00:00Z",
            "character_id": 2112625428,
            "location_id": 1030000000000,
            "location_flag": "CorpSAG2",
            "action": "add",
            "type_id": 34,
            "quantity": 200
        }"#;
        let e: MovementLogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(e.action, MovementAction::Add);
        assert_eq!(e.quantity, 200);
        assert_eq!(e.character_id, CharacterId::new(2112625428));
        assert_eq!(e.password_type, None);
        assert!(e.is_inbound());
    }

    #[test]
    fn lock_entries_without_goods_deserialize() {
        let json = r#"{
            "logged_at": "2024-03-01T12:00:00Z",
            "character_id": 1,
            "location_id": 2,
            "location_flag": "CorpSAG1",
            "action": "password_check",
            "password_type": "general"
        }"#;
        let e: MovementLogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(e.type_id, TypeId::new(0));
        assert_eq!(e.password_type, Some(PasswordType::General));
        assert!(!e.is_inbound());
    }

    #[test]
    fn only_positive_adds_are_inbound() {
        assert!(entry(MovementAction::Add, 1, 0).is_inbound());
        assert!(!entry(MovementAction::Add, 0, 0).is_inbound());
        assert!(!entry(MovementAction::Remove, 50, 0).is_inbound());
    }

    #[test]
    fn event_type_names_the_action() {
        assert_eq!(entry(MovementAction::Add, 1, 0).event_type(), "container.log.add");
        assert_eq!(
            entry(MovementAction::PasswordCheck, 0, 0).event_type(),
            "container.log.password_check"
        );
        let e = entry(MovementAction::Remove, 2, 7);
        assert_eq!(e.occurred_at(), e.logged_at);
    }
}
