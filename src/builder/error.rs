//! Build errors for the transmission builder.

use crate::core::GearTableError;
use thiserror::Error;

/// Errors that can occur when building a transmission.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("No gear ranges defined. Call .gear(low, high) at least once before .build()")]
    NoGears,

    #[error(transparent)]
    InvalidTable(#[from] GearTableError),
}
