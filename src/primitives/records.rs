//! Long-format activity observations.
//!
//! One `ActivityRecord` is one (region, sector, year, value) observation as
//! delivered by the geocoding layer. The pipeline pivots these into an
//! `ActivityMatrix` per year.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;

/// A single geocoded activity observation.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord<T> {
    /// Region identifier (matrix row label).
    pub region_id: String,

    /// Sector identifier (matrix column label).
    pub sector_id: String,

    /// Observation year.
    pub year: i32,

    /// Activity measure.
    pub value: T,
}

impl<T> ActivityRecord<T> {
    /// Create a new record.
    pub fn new(region_id: impl Into<String>, sector_id: impl Into<String>, year: i32, value: T) -> Self {
        Self {
            region_id: region_id.into(),
            sector_id: sector_id.into(),
            year,
            value,
        }
    }
}
