//! Hangar subdivisions and their location-flag tags.
//!
//! The tag strings are a bit-exact contract with the upstream inventory API:
//! division `n` is reported as `"CorpSAG{n}"`, and freshly delivered goods
//! that have not been sorted yet sit under `"CorpDeliveries"`.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Prefix of every subdivision location flag.
pub const SUBDIVISION_TAG_PREFIX: &str = "CorpSAG";

/// Location flag of the universal inbound (unsorted deliveries) area.
pub const UNIVERSAL_INBOUND_TAG: &str = "CorpDeliveries";

/// Lowest and highest hangar division numbers.
pub const MIN_DIVISION: u8 = 1;
pub const MAX_DIVISION: u8 = 7;

/// One of the named storage divisions of a facility.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Subdivision(u8);

impl Subdivision {
    pub fn new(division: u8) -> DomainResult<Self> {
        if !(MIN_DIVISION..=MAX_DIVISION).contains(&division) {
            return Err(DomainError::validation(format!(
                "subdivision must be within {MIN_DIVISION}..={MAX_DIVISION} (got {division})"
            )));
        }
        Ok(Self(division))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Location flag for this division, e.g. `CorpSAG3`.
    pub fn tag(self) -> String {
        format!("{SUBDIVISION_TAG_PREFIX}{}", self.0)
    }

    /// Exact tag equality. The universal inbound tag never matches here.
    pub fn matches_flag(self, flag: &str) -> bool {
        // Divisions are single digits, so the suffix is exactly one byte.
        flag.strip_prefix(SUBDIVISION_TAG_PREFIX)
            .is_some_and(|suffix| suffix.as_bytes() == [b'0' + self.0])
    }

    /// Snapshot-reader predicate: own tag OR the universal inbound tag.
    pub fn holds_flag(self, flag: &str) -> bool {
        self.matches_flag(flag) || flag == UNIVERSAL_INBOUND_TAG
    }

    /// All divisions in ascending order.
    pub fn all() -> impl Iterator<Item = Subdivision> {
        (MIN_DIVISION..=MAX_DIVISION).map(Subdivision)
    }
}

impl TryFrom<u8> for Subdivision {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Subdivision> for u8 {
    fn from(value: Subdivision) -> Self {
        value.0
    }
}

impl core::fmt::Display for Subdivision {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{SUBDIVISION_TAG_PREFIX}{}", self.0)
    }
}

/// Location flag for a division number.
pub fn tag_for(subdivision: Subdivision) -> String {
    subdivision.tag()
}
