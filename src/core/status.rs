//! Shift outcome statuses.
//!
//! Every transition attempt produces exactly one `ShiftStatus`. A status
//! is a state-machine outcome, not an error: a rejected shift is a valid
//! result that reports which guard refused the request.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of the most recent shift attempt.
///
/// The three `OK:` outcomes mean the requested change was applied; the
/// remaining eight mean the machine refused it and say why, either an
/// absolute limit (`MaxSpeedReached`, `MinGearReached`, ...) or a
/// cross-field dependency (`IncreaseGearFirst`, `DecreaseSpeedFirst`, ...).
///
/// # Example
///
/// ```rust
/// use driveline::ShiftStatus;
///
/// assert!(ShiftStatus::MayIncreaseGear.is_ok());
/// assert!(ShiftStatus::IncreaseGearFirst.is_rejection());
/// assert_eq!(
///     ShiftStatus::MaxSpeedReached.to_string(),
///     "Cannot increase speed. Reached maximum speed."
/// );
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ShiftStatus {
    /// The change was applied with nothing further to report
    Ok,
    /// Speed was raised into the next gear's band; an upshift is now legal
    MayIncreaseGear,
    /// Speed was lowered into the previous gear's band; a downshift is now legal
    MayDecreaseGear,
    /// Speed is at the top gear's high bound
    MaxSpeedReached,
    /// Speed is at the current gear's high bound but not the global maximum
    IncreaseGearFirst,
    /// Speed is already 0
    MinSpeedReached,
    /// Speed is at the current gear's low bound
    DecreaseGearFirst,
    /// Already in the top gear
    MaxGearReached,
    /// Speed has not reached the next gear's low bound
    IncreaseSpeedFirst,
    /// Already in gear 1
    MinGearReached,
    /// Speed still exceeds the previous gear's high bound
    DecreaseSpeedFirst,
}

impl ShiftStatus {
    /// The fixed user-facing message for this outcome.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Ok => "OK: everything is OK.",
            Self::MayIncreaseGear => "OK: you may increase the gear.",
            Self::MayDecreaseGear => "OK: you may decrease the gear.",
            Self::MaxSpeedReached => "Cannot increase speed. Reached maximum speed.",
            Self::IncreaseGearFirst => "Cannot increase speed, increase gear first.",
            Self::MinSpeedReached => "Cannot decrease speed. Reached minimum speed.",
            Self::DecreaseGearFirst => "Cannot decrease speed, decrease gear first.",
            Self::MaxGearReached => "Cannot increase gear. Reached maximum gear.",
            Self::IncreaseSpeedFirst => "Cannot increase gear, increase speed first.",
            Self::MinGearReached => "Cannot decrease gear. Reached minimum gear.",
            Self::DecreaseSpeedFirst => "Cannot decrease gear, decrease speed first.",
        }
    }

    /// Whether the requested change was applied.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok | Self::MayIncreaseGear | Self::MayDecreaseGear)
    }

    /// Whether the requested change was refused.
    pub fn is_rejection(&self) -> bool {
        !self.is_ok()
    }
}

impl fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
