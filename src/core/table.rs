//! Gear-speed range table and its construction-time validation.
//!
//! A transmission is configured by a `GearTable`: one inclusive speed
//! band per gear. All invariants are enforced once, when the table is
//! built; a table that exists is always valid.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inclusive speed range within which a single gear is legal.
///
/// # Example
///
/// ```rust
/// use driveline::GearBand;
///
/// let band = GearBand::new(2, 7);
/// assert!(band.contains(2));
/// assert!(band.contains(7));
/// assert!(!band.contains(8));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GearBand {
    /// Lowest speed at which the gear is legal
    pub low: u32,
    /// Highest speed at which the gear is legal
    pub high: u32,
}

impl GearBand {
    /// Create a band from its bounds.
    ///
    /// Bands are not validated individually; `GearTable::new` checks
    /// every clause across the whole table.
    pub fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    /// Check whether a speed falls inside the band (inclusive).
    pub fn contains(&self, speed: u32) -> bool {
        self.low <= speed && speed <= self.high
    }
}

/// Errors reported when a gear table fails validation.
///
/// Clauses are checked per gear in ascending index order; the first
/// violation is returned. Gear numbers in the variants are 1-based.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GearTableError {
    #[error("a gear table requires at least one gear")]
    Empty,

    #[error("gear {gear}: low speed {low} is greater than high speed {high}")]
    LowAboveHigh { gear: usize, low: u32, high: u32 },

    #[error("gear {gear}: low speed {low} does not exceed the previous gear's low speed {prev_low}")]
    NonIncreasingLow {
        gear: usize,
        low: u32,
        prev_low: u32,
    },

    #[error("gear {gear}: low speed {low} leaves a gap above the previous gear's high speed {prev_high}")]
    RangeGap {
        gear: usize,
        low: u32,
        prev_high: u32,
    },

    #[error("the first gear's low speed must be 0, got {low}")]
    FirstGearNotZero { low: u32 },
}

/// Ordered, validated sequence of gear bands.
///
/// Gears are numbered 1..=N, in ascending order of their low bounds.
/// Adjacent bands overlap or touch, so every speed from 0 up to the top
/// gear's high bound is covered by at least one gear.
///
/// # Example
///
/// ```rust
/// use driveline::{GearBand, GearTable, GearTableError};
///
/// let table = GearTable::new(vec![
///     GearBand::new(0, 4),
///     GearBand::new(3, 9),
/// ]).unwrap();
///
/// assert_eq!(table.gear_count(), 2);
/// assert_eq!(table.top_speed(), 9);
///
/// // Gear 2 must start above gear 1's low bound.
/// let err = GearTable::new(vec![
///     GearBand::new(0, 4),
///     GearBand::new(0, 9),
/// ]).unwrap_err();
/// assert_eq!(err, GearTableError::NonIncreasingLow { gear: 2, low: 0, prev_low: 0 });
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GearTable {
    bands: Vec<GearBand>,
}

impl GearTable {
    /// Validate and build a table from bands in gear order.
    ///
    /// The clauses, checked in this order for each gear:
    /// the band is non-inverted (`low <= high`); its low strictly
    /// exceeds the previous gear's low; its low does not exceed the
    /// previous gear's high (no unreachable speeds between gears).
    /// Finally, gear 1 must start at speed 0.
    pub fn new(bands: Vec<GearBand>) -> Result<Self, GearTableError> {
        if bands.is_empty() {
            return Err(GearTableError::Empty);
        }

        for (index, band) in bands.iter().enumerate() {
            let gear = index + 1;
            if band.low > band.high {
                return Err(GearTableError::LowAboveHigh {
                    gear,
                    low: band.low,
                    high: band.high,
                });
            }
            if index > 0 {
                let prev = &bands[index - 1];
                if band.low <= prev.low {
                    return Err(GearTableError::NonIncreasingLow {
                        gear,
                        low: band.low,
                        prev_low: prev.low,
                    });
                }
                if band.low > prev.high {
                    return Err(GearTableError::RangeGap {
                        gear,
                        low: band.low,
                        prev_high: prev.high,
                    });
                }
            }
        }

        if bands[0].low != 0 {
            return Err(GearTableError::FirstGearNotZero { low: bands[0].low });
        }

        Ok(Self { bands })
    }

    /// Number of gears in the table.
    pub fn gear_count(&self) -> usize {
        self.bands.len()
    }

    /// All bands in gear order.
    pub fn bands(&self) -> &[GearBand] {
        &self.bands
    }

    /// Band for a 1-based gear number, if the gear exists.
    pub fn band(&self, gear: usize) -> Option<&GearBand> {
        if gear == 0 {
            return None;
        }
        self.bands.get(gear - 1)
    }

    /// The highest legal speed: the top gear's high bound.
    pub fn top_speed(&self) -> u32 {
        self.bands.last().map_or(0, |band| band.high)
    }
}
