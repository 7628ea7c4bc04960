//! Builder for constructing transmissions.

use crate::builder::error::BuildError;
use crate::core::{GearBand, GearTable, RegularTransmission};

/// Builder for constructing transmissions with a fluent API.
///
/// Gears are declared lowest first; `build` validates the whole table.
///
/// # Example
///
/// ```rust
/// use driveline::{ManualTransmission, TransmissionBuilder};
///
/// let t = TransmissionBuilder::new()
///     .gear(0, 4)
///     .gear(3, 9)
///     .gear(7, 15)
///     .build()
///     .unwrap();
///
/// assert_eq!(t.gear(), 1);
/// assert_eq!(t.table().gear_count(), 3);
/// ```
pub struct TransmissionBuilder {
    gears: Vec<GearBand>,
}

impl TransmissionBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self { gears: Vec::new() }
    }

    /// Add the next gear's speed range.
    pub fn gear(mut self, low: u32, high: u32) -> Self {
        self.gears.push(GearBand::new(low, high));
        self
    }

    /// Build the transmission.
    /// Returns an error if no gears were added or the table is invalid.
    pub fn build(self) -> Result<RegularTransmission, BuildError> {
        if self.gears.is_empty() {
            return Err(BuildError::NoGears);
        }

        let table = GearTable::new(self.gears)?;
        Ok(RegularTransmission::with_table(table))
    }
}

impl Default for TransmissionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
