//! Inclusive time windows.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// `[start, end]`, inclusive on both ends.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Self> {
        if start > end {
            return Err(DomainError::validation(format!(
                "time window start ({start}) is after end ({end})"
            )));
        }
        Ok(Self { start, end })
    }

    /// Window of `half_width` on each side of `center`.
    ///
    /// Fails if either bound falls outside the representable date range.
    pub fn around(center: DateTime<Utc>, half_width: Duration) -> DomainResult<Self> {
        let half_width = half_width.abs();
        let out_of_range =
            || DomainError::validation(format!("time window of {half_width} around {center} is out of range"));
        let start = center.checked_sub_signed(half_width).ok_or_else(out_of_range)?;
        let end = center.checked_add_signed(half_width).ok_or_else(out_of_range)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

#[derive(Deserialize)]
struct RawWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawWindow> for TimeWindow {
    type Error = DomainError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}
