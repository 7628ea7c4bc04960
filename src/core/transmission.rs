//! The manual transmission state machine.
//!
//! A transmission couples two fields, speed and gear, that constrain
//! each other through the gear table: speed can only move within the
//! current gear's band, and the gear can only move when the speed lies
//! inside the neighboring gear's band. Requests that would break the
//! coupling are refused and reported through the status, never through
//! an error.

use super::history::{ShiftHistory, ShiftRecord, ShiftRequest};
use super::status::ShiftStatus;
use super::table::{GearBand, GearTable, GearTableError};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Operations for simulating a manual transmission vehicle.
///
/// The four transitions are total: they always return the machine, with
/// the outcome of the attempt readable via [`status`](Self::status).
/// Each consumes and returns `Self`, so attempts chain naturally.
pub trait ManualTransmission: Sized {
    /// The current speed of the vehicle.
    fn speed(&self) -> u32;

    /// The current gear of the vehicle, numbered from 1.
    fn gear(&self) -> usize;

    /// The outcome of the most recent shift attempt.
    fn status(&self) -> ShiftStatus;

    /// Increase the speed by 1 if the current gear allows it.
    fn increase_speed(self) -> Self;

    /// Decrease the speed by 1 if the current gear allows it.
    fn decrease_speed(self) -> Self;

    /// Shift up by one gear if the speed has reached the next gear's band.
    fn increase_gear(self) -> Self;

    /// Shift down by one gear if the speed has dropped into the previous
    /// gear's band.
    fn decrease_gear(self) -> Self;
}

/// A manual transmission where speed changes by 1 at a time.
///
/// The machine starts at rest: speed 0, gear 1, status [`ShiftStatus::Ok`].
/// Every shift attempt, applied or rejected, is appended to an internal
/// [`ShiftHistory`].
///
/// # Example
///
/// ```rust
/// use driveline::{ManualTransmission, RegularTransmission, ShiftStatus};
///
/// let t = RegularTransmission::new(0, 4, 2, 7, 5, 10, 8, 14, 12, 18).unwrap();
///
/// let t = t.increase_speed().increase_speed();
/// assert_eq!(t.speed(), 2);
/// assert_eq!(t.status(), ShiftStatus::MayIncreaseGear);
///
/// let t = t.increase_gear();
/// assert_eq!(t.gear(), 2);
/// assert_eq!(t.status(), ShiftStatus::Ok);
///
/// // Shifting up again is refused until the speed reaches gear 3's band.
/// let t = t.increase_gear();
/// assert_eq!(t.gear(), 2);
/// assert_eq!(t.status(), ShiftStatus::IncreaseSpeedFirst);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegularTransmission {
    table: GearTable,
    speed: u32,
    gear: usize,
    status: ShiftStatus,
    history: ShiftHistory,
}

impl RegularTransmission {
    /// Build a five-gear transmission from each gear's low and high speed.
    ///
    /// Fails with the first violated table clause; see
    /// [`GearTable::new`] for the clauses and their order.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        l1: u32,
        h1: u32,
        l2: u32,
        h2: u32,
        l3: u32,
        h3: u32,
        l4: u32,
        h4: u32,
        l5: u32,
        h5: u32,
    ) -> Result<Self, GearTableError> {
        let table = GearTable::new(vec![
            GearBand::new(l1, h1),
            GearBand::new(l2, h2),
            GearBand::new(l3, h3),
            GearBand::new(l4, h4),
            GearBand::new(l5, h5),
        ])?;
        Ok(Self::with_table(table))
    }

    /// Build a transmission over an already-validated table of any size.
    pub fn with_table(table: GearTable) -> Self {
        Self {
            table,
            speed: 0,
            gear: 1,
            status: ShiftStatus::Ok,
            history: ShiftHistory::new(),
        }
    }

    /// The gear table the machine was built with.
    pub fn table(&self) -> &GearTable {
        &self.table
    }

    /// Every shift attempt handled so far.
    pub fn history(&self) -> &ShiftHistory {
        &self.history
    }

    // Bands indexed by 1-based gear number; the gear field is kept in
    // 1..=N, so these lookups cannot miss.
    fn band(&self, gear: usize) -> &GearBand {
        &self.table.bands()[gear - 1]
    }

    fn current_band(&self) -> &GearBand {
        self.band(self.gear)
    }

    fn finish(mut self, request: ShiftRequest, status: ShiftStatus) -> Self {
        self.status = status;
        self.history = self.history.record(ShiftRecord {
            request,
            status,
            speed: self.speed,
            gear: self.gear,
            timestamp: Utc::now(),
        });
        self
    }
}

impl ManualTransmission for RegularTransmission {
    fn speed(&self) -> u32 {
        self.speed
    }

    fn gear(&self) -> usize {
        self.gear
    }

    fn status(&self) -> ShiftStatus {
        self.status
    }

    fn increase_speed(self) -> Self {
        if self.speed == self.table.top_speed() {
            return self.finish(ShiftRequest::IncreaseSpeed, ShiftStatus::MaxSpeedReached);
        }
        if self.speed + 1 > self.current_band().high {
            return self.finish(ShiftRequest::IncreaseSpeed, ShiftStatus::IncreaseGearFirst);
        }

        let mut next = self;
        next.speed += 1;
        let status = if next.gear < next.table.gear_count()
            && next.speed >= next.band(next.gear + 1).low
        {
            ShiftStatus::MayIncreaseGear
        } else {
            ShiftStatus::Ok
        };
        next.finish(ShiftRequest::IncreaseSpeed, status)
    }

    fn decrease_speed(self) -> Self {
        if self.speed == 0 {
            return self.finish(ShiftRequest::DecreaseSpeed, ShiftStatus::MinSpeedReached);
        }
        if self.speed - 1 < self.current_band().low {
            return self.finish(ShiftRequest::DecreaseSpeed, ShiftStatus::DecreaseGearFirst);
        }

        let mut next = self;
        next.speed -= 1;
        let status = if next.gear > 1 && next.speed <= next.band(next.gear - 1).high {
            ShiftStatus::MayDecreaseGear
        } else {
            ShiftStatus::Ok
        };
        next.finish(ShiftRequest::DecreaseSpeed, status)
    }

    fn increase_gear(self) -> Self {
        if self.gear == self.table.gear_count() {
            return self.finish(ShiftRequest::IncreaseGear, ShiftStatus::MaxGearReached);
        }
        if self.speed < self.band(self.gear + 1).low {
            return self.finish(ShiftRequest::IncreaseGear, ShiftStatus::IncreaseSpeedFirst);
        }

        let mut next = self;
        next.gear += 1;
        next.finish(ShiftRequest::IncreaseGear, ShiftStatus::Ok)
    }

    fn decrease_gear(self) -> Self {
        if self.gear == 1 {
            return self.finish(ShiftRequest::DecreaseGear, ShiftStatus::MinGearReached);
        }
        if self.speed > self.band(self.gear - 1).high {
            return self.finish(ShiftRequest::DecreaseGear, ShiftStatus::DecreaseSpeedFirst);
        }

        let mut next = self;
        next.gear -= 1;
        next.finish(ShiftRequest::DecreaseGear, ShiftStatus::Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RegularTransmission {
        RegularTransmission::new(0, 4, 2, 7, 5, 10, 8, 14, 12, 18).unwrap()
    }

    // Table from the overlapping-band scenario: gears (0,1) (1,3) (2,5)
    // (4,7) (6,9), top speed 9.
    fn tight() -> RegularTransmission {
        RegularTransmission::new(0, 1, 1, 3, 2, 5, 4, 7, 6, 9).unwrap()
    }

    #[test]
    fn new_transmission_starts_at_rest() {
        let t = sample();

        assert_eq!(t.speed(), 0);
        assert_eq!(t.gear(), 1);
        assert_eq!(t.status(), ShiftStatus::Ok);
        assert!(t.history().records().is_empty());
    }

    #[test]
    fn construction_rejects_inverted_first_gear() {
        let err = RegularTransmission::new(5, 3, 6, 9, 7, 12, 8, 14, 9, 18).unwrap_err();

        assert_eq!(
            err,
            GearTableError::LowAboveHigh {
                gear: 1,
                low: 5,
                high: 3
            }
        );
    }

    #[test]
    fn construction_rejects_first_gear_not_starting_at_zero() {
        let err = RegularTransmission::new(1, 4, 2, 7, 5, 10, 8, 14, 12, 18).unwrap_err();

        assert_eq!(err, GearTableError::FirstGearNotZero { low: 1 });
    }

    #[test]
    fn decrease_speed_at_rest_is_rejected() {
        let t = sample().decrease_speed();

        assert_eq!(t.status(), ShiftStatus::MinSpeedReached);
        assert_eq!(t.speed(), 0);
        assert_eq!(t.gear(), 1);
    }

    #[test]
    fn decrease_gear_in_first_gear_is_rejected() {
        let t = sample().decrease_gear();

        assert_eq!(t.status(), ShiftStatus::MinGearReached);
        assert_eq!(t.speed(), 0);
        assert_eq!(t.gear(), 1);
    }

    #[test]
    fn increase_speed_stays_ok_below_the_next_band() {
        let t = sample().increase_speed();

        assert_eq!(t.speed(), 1);
        assert_eq!(t.status(), ShiftStatus::Ok);
    }

    #[test]
    fn increase_speed_flags_the_upshift_window() {
        // Gear 2 starts at 2, so the second increase enters its band.
        let t = sample().increase_speed().increase_speed();

        assert_eq!(t.speed(), 2);
        assert_eq!(t.status(), ShiftStatus::MayIncreaseGear);
    }

    #[test]
    fn increase_speed_at_gear_ceiling_requires_an_upshift() {
        let mut t = sample();
        for _ in 0..4 {
            t = t.increase_speed();
        }
        assert_eq!(t.speed(), 4);

        let t = t.increase_speed();

        assert_eq!(t.status(), ShiftStatus::IncreaseGearFirst);
        assert_eq!(t.speed(), 4);
        assert_eq!(t.gear(), 1);
    }

    #[test]
    fn increase_gear_before_the_next_band_is_rejected() {
        let t = sample().increase_speed().increase_gear();

        assert_eq!(t.status(), ShiftStatus::IncreaseSpeedFirst);
        assert_eq!(t.gear(), 1);
        assert_eq!(t.speed(), 1);
    }

    #[test]
    fn increase_gear_applies_inside_the_next_band() {
        let t = sample().increase_speed().increase_speed().increase_gear();

        assert_eq!(t.gear(), 2);
        assert_eq!(t.status(), ShiftStatus::Ok);
        assert_eq!(t.speed(), 2);
    }

    #[test]
    fn decrease_speed_at_band_floor_requires_a_downshift() {
        // Gear 2 at its low bound of 2.
        let t = sample().increase_speed().increase_speed().increase_gear();

        let t = t.decrease_speed();

        assert_eq!(t.status(), ShiftStatus::DecreaseGearFirst);
        assert_eq!(t.speed(), 2);
        assert_eq!(t.gear(), 2);
    }

    #[test]
    fn decrease_gear_above_previous_band_is_rejected() {
        // Reach gear 2 at speed 5, above gear 1's high of 4.
        let mut t = sample().increase_speed().increase_speed().increase_gear();
        for _ in 0..3 {
            t = t.increase_speed();
        }
        assert_eq!(t.speed(), 5);

        let t = t.decrease_gear();

        assert_eq!(t.status(), ShiftStatus::DecreaseSpeedFirst);
        assert_eq!(t.gear(), 2);
    }

    #[test]
    fn decrease_speed_flags_the_downshift_window() {
        // Gear 2 at speed 5, then slow to 4 = gear 1's high bound.
        let mut t = sample().increase_speed().increase_speed().increase_gear();
        for _ in 0..3 {
            t = t.increase_speed();
        }

        let t = t.decrease_speed();

        assert_eq!(t.speed(), 4);
        assert_eq!(t.status(), ShiftStatus::MayDecreaseGear);

        let t = t.decrease_gear();
        assert_eq!(t.gear(), 1);
        assert_eq!(t.status(), ShiftStatus::Ok);
    }

    #[test]
    fn climb_through_all_gears_reaches_top_speed() {
        let t = tight();

        // 0 -> 1 enters gear 2's band immediately.
        let t = t.increase_speed();
        assert_eq!((t.speed(), t.status()), (1, ShiftStatus::MayIncreaseGear));
        let t = t.increase_gear();
        assert_eq!((t.gear(), t.status()), (2, ShiftStatus::Ok));

        let t = t.increase_speed();
        assert_eq!((t.speed(), t.status()), (2, ShiftStatus::MayIncreaseGear));
        let t = t.increase_gear();
        assert_eq!(t.gear(), 3);

        let t = t.increase_speed();
        assert_eq!((t.speed(), t.status()), (3, ShiftStatus::Ok));
        let t = t.increase_speed();
        assert_eq!((t.speed(), t.status()), (4, ShiftStatus::MayIncreaseGear));
        let t = t.increase_gear();
        assert_eq!(t.gear(), 4);

        let t = t.increase_speed();
        assert_eq!((t.speed(), t.status()), (5, ShiftStatus::Ok));
        let t = t.increase_speed();
        assert_eq!((t.speed(), t.status()), (6, ShiftStatus::MayIncreaseGear));
        let t = t.increase_gear();
        assert_eq!(t.gear(), 5);

        let t = t.increase_speed().increase_speed().increase_speed();
        assert_eq!(t.speed(), 9);
        assert_eq!(t.gear(), 5);
        assert_eq!(t.status(), ShiftStatus::Ok);

        // One more is refused at the global maximum.
        let t = t.increase_speed();
        assert_eq!(t.status(), ShiftStatus::MaxSpeedReached);
        assert_eq!(t.speed(), 9);
        assert_eq!(t.gear(), 5);
    }

    #[test]
    fn increase_gear_in_top_gear_is_rejected() {
        let table = GearTable::new(vec![GearBand::new(0, 2), GearBand::new(1, 3)]).unwrap();
        let t = RegularTransmission::with_table(table)
            .increase_speed()
            .increase_gear();
        assert_eq!(t.gear(), 2);

        let t = t.increase_gear();

        assert_eq!(t.status(), ShiftStatus::MaxGearReached);
        assert_eq!(t.gear(), 2);
    }

    #[test]
    fn single_gear_table_runs_between_its_bounds() {
        let table = GearTable::new(vec![GearBand::new(0, 2)]).unwrap();
        let t = RegularTransmission::with_table(table);

        let t = t.increase_speed().increase_speed();
        assert_eq!((t.speed(), t.status()), (2, ShiftStatus::Ok));

        let t = t.increase_speed();
        assert_eq!(t.status(), ShiftStatus::MaxSpeedReached);

        let t = t.increase_gear();
        assert_eq!(t.status(), ShiftStatus::MaxGearReached);

        let t = t.decrease_gear();
        assert_eq!(t.status(), ShiftStatus::MinGearReached);
    }

    #[test]
    fn every_attempt_lands_in_the_history() {
        let t = sample()
            .decrease_speed() // rejected
            .increase_speed()
            .increase_speed()
            .increase_gear();

        let records = t.history().records();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].request, ShiftRequest::DecreaseSpeed);
        assert_eq!(records[0].status, ShiftStatus::MinSpeedReached);
        assert_eq!(
            t.history().trace(),
            vec![(0, 1), (1, 1), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn rejected_attempts_leave_state_untouched() {
        let before = sample().increase_speed();
        let (speed, gear) = (before.speed(), before.gear());

        let after = before.increase_gear(); // speed 1 < gear 2's low of 2

        assert_eq!(after.status(), ShiftStatus::IncreaseSpeedFirst);
        assert_eq!(after.speed(), speed);
        assert_eq!(after.gear(), gear);
    }

    #[test]
    fn transmission_serializes_correctly() {
        let t = sample().increase_speed().increase_speed().increase_gear();

        let json = serde_json::to_string(&t).unwrap();
        let deserialized: RegularTransmission = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.speed(), t.speed());
        assert_eq!(deserialized.gear(), t.gear());
        assert_eq!(deserialized.status(), t.status());
        assert_eq!(deserialized.table(), t.table());
        assert_eq!(deserialized.history(), t.history());
    }
}
