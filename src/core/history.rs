//! Shift attempt history tracking.
//!
//! Provides immutable tracking of every shift attempt a transmission
//! handles, applied or rejected, in the order they were made.

use super::status::ShiftStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The four shift requests a transmission accepts.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ShiftRequest {
    IncreaseSpeed,
    DecreaseSpeed,
    IncreaseGear,
    DecreaseGear,
}

impl ShiftRequest {
    /// Get the request's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::IncreaseSpeed => "IncreaseSpeed",
            Self::DecreaseSpeed => "DecreaseSpeed",
            Self::IncreaseGear => "IncreaseGear",
            Self::DecreaseGear => "DecreaseGear",
        }
    }
}

/// Record of a single shift attempt.
///
/// Records are immutable values. `speed` and `gear` are the values after
/// the attempt; for a rejected attempt they equal the values before it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// The request that was made
    pub request: ShiftRequest,
    /// The outcome of the attempt
    pub status: ShiftStatus,
    /// Speed after the attempt
    pub speed: u32,
    /// Gear after the attempt
    pub gear: usize,
    /// When the attempt was handled
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of shift attempts.
///
/// History is immutable: `record` returns a new history with the record
/// appended, leaving the original untouched.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use driveline::{ShiftHistory, ShiftRecord, ShiftRequest, ShiftStatus};
///
/// let history = ShiftHistory::new();
/// let history = history.record(ShiftRecord {
///     request: ShiftRequest::IncreaseSpeed,
///     status: ShiftStatus::Ok,
///     speed: 1,
///     gear: 1,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.records().len(), 1);
/// assert_eq!(history.trace(), vec![(1, 1)]);
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct ShiftHistory {
    records: Vec<ShiftRecord>,
}

impl ShiftHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record an attempt, returning a new history.
    pub fn record(&self, record: ShiftRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// All recorded attempts in order.
    pub fn records(&self) -> &[ShiftRecord] {
        &self.records
    }

    /// The `(speed, gear)` pair after each attempt, in order.
    pub fn trace(&self) -> Vec<(u32, usize)> {
        self.records
            .iter()
            .map(|record| (record.speed, record.gear))
            .collect()
    }

    /// Elapsed time between the first and last attempt.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }
}
