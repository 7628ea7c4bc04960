//! Driveline: a manual transmission simulator
//!
//! Driveline models a vehicle's coupled speed/gear state as a bounded,
//! synchronous state machine. Speed moves by 1 at a time within the
//! current gear's configured band, gears move by 1 when the speed lies
//! inside the neighboring band, and every request that would break the
//! coupling is refused with a status saying why rather than an error.
//!
//! # Core Concepts
//!
//! - **Gear table**: one validated `[low, high]` speed band per gear
//! - **Status**: the enumerated outcome of the last shift attempt
//! - **History**: immutable tracking of shift attempts over time
//!
//! # Example
//!
//! ```rust
//! use driveline::{ManualTransmission, RegularTransmission, ShiftStatus};
//!
//! let t = RegularTransmission::new(0, 4, 2, 7, 5, 10, 8, 14, 12, 18).unwrap();
//!
//! // Speed up into gear 2's band, then shift.
//! let t = t.increase_speed().increase_speed();
//! assert_eq!(t.status(), ShiftStatus::MayIncreaseGear);
//!
//! let t = t.increase_gear();
//! assert_eq!((t.speed(), t.gear()), (2, 2));
//!
//! // Slowing below the band is refused, not an error.
//! let t = t.decrease_speed();
//! assert_eq!(t.status(), ShiftStatus::DecreaseGearFirst);
//! assert_eq!((t.speed(), t.gear()), (2, 2));
//! ```

pub mod builder;
pub mod core;

// Re-export commonly used types
pub use builder::{BuildError, TransmissionBuilder};
pub use core::{
    GearBand, GearTable, GearTableError, ManualTransmission, RegularTransmission, ShiftHistory,
    ShiftRecord, ShiftRequest, ShiftStatus,
};
