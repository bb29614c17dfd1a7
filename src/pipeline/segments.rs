//! Regrouping sectors into coarser segments.
//!
//! ## Purpose
//!
//! This module aggregates the sector columns of an activity matrix into
//! segment columns using a many-to-one sector → segment lookup supplied by
//! reference data.
//!
//! ## Design notes
//!
//! * **Aggregation**: Segment value is the sum of its sectors' values.
//! * **Lookup keys**: Sector labels are matched after trimming surrounding
//!   whitespace.
//! * **Unmapped sectors**: Rejected with `UnmappedSector` unless dropping was
//!   requested, in which case their columns are discarded.
//! * **Order**: Segment columns follow the first mapped sector of each segment.
//!
//! ## Invariants
//!
//! * Row labels and order are unchanged.
//! * Total activity is preserved when no sector is dropped.
//!
//! ## Non-goals
//!
//! * This module does not load the lookup from files.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};
#[cfg(feature = "std")]
use std::collections::BTreeMap;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::ComplexityError;
use crate::primitives::matrix::{ActivityMatrix, Axis};

// ============================================================================
// Segment Map
// ============================================================================

/// Many-to-one sector → segment lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SegmentMap {
    lookup: BTreeMap<String, String>,
}

impl SegmentMap {
    /// Empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(sector_id, segment_id)` pairs.
    ///
    /// A sector listed twice is rejected with `DuplicateLabel`.
    pub fn from_pairs<I, S, G>(pairs: I) -> Result<Self, ComplexityError>
    where
        I: IntoIterator<Item = (S, G)>,
        S: Into<String>,
        G: Into<String>,
    {
        let mut map = Self::new();
        for (sector, segment) in pairs {
            map.insert(sector, segment)?;
        }
        Ok(map)
    }

    /// Add one mapping.
    pub fn insert(
        &mut self,
        sector: impl Into<String>,
        segment: impl Into<String>,
    ) -> Result<(), ComplexityError> {
        let sector = sector.into().trim().to_string();
        if self.lookup.contains_key(&sector) {
            return Err(ComplexityError::DuplicateLabel {
                axis: Axis::Column,
                label: sector,
            });
        }
        self.lookup.insert(sector, segment.into());
        Ok(())
    }

    /// Segment of a sector.
    pub fn segment(&self, sector: &str) -> Option<&str> {
        self.lookup.get(sector.trim()).map(String::as_str)
    }

    /// Number of mapped sectors.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    /// True when no sector is mapped.
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Sum the columns of `x` into segment columns.
    pub fn regroup<T: Float>(
        &self,
        x: &ActivityMatrix<T>,
        drop_unmapped: bool,
    ) -> Result<ActivityMatrix<T>, ComplexityError> {
        // Step 1: Column -> segment position
        let mut segments: Vec<String> = Vec::new();
        let mut target: Vec<Option<usize>> = Vec::with_capacity(x.n_cols());
        for sector in x.col_labels() {
            match self.segment(sector) {
                Some(segment) => {
                    let pos = match segments.iter().position(|s| s == segment) {
                        Some(pos) => pos,
                        None => {
                            segments.push(segment.to_string());
                            segments.len() - 1
                        }
                    };
                    target.push(Some(pos));
                }
                None if drop_unmapped => target.push(None),
                None => return Err(ComplexityError::UnmappedSector(sector.clone())),
            }
        }

        if segments.is_empty() {
            return Err(ComplexityError::EmptyInput);
        }

        // Step 2: Sum
        let n_seg = segments.len();
        let mut data = vec![T::zero(); x.n_rows() * n_seg];
        for r in 0..x.n_rows() {
            for (&v, t) in x.row(r).iter().zip(&target) {
                if let Some(s) = *t {
                    data[r * n_seg + s] = data[r * n_seg + s] + v;
                }
            }
        }

        Ok(ActivityMatrix::from_parts(
            x.row_labels().to_vec(),
            segments,
            data,
            false,
        ))
    }
}
