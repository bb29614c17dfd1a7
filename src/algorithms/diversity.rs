//! Simple diversity measures.
//!
//! ## Purpose
//!
//! Two counts per region: the number of sectors with any activity, and the
//! number of sectors in which the region holds revealed comparative
//! advantage.
//!
//! ## Invariants
//!
//! * `rca_count <= active_count` when RCA is derived from the same matrix
//!   with a non-negative threshold.
//! * Rows come out in the order of the input matrix.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, string::String, vec::Vec};

// External dependencies
use core::fmt;
use num_traits::Float;

// Internal dependencies
use crate::algorithms::location_quotient::LocationQuotient;
use crate::primitives::errors::ComplexityError;
use crate::primitives::matrix::ActivityMatrix;

// ============================================================================
// Diversity Table
// ============================================================================

/// Diversity counts for one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiversityRow {
    /// Region identifier.
    pub region_id: String,

    /// Sectors with activity > 0.
    pub active_count: usize,

    /// Sectors with LQ above the threshold.
    pub rca_count: usize,
}

/// Diversity counts for every region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiversityTable {
    /// One row per region, in matrix order.
    pub rows: Vec<DiversityRow>,
}

impl DiversityTable {
    /// Counts for one region.
    pub fn get(&self, region_id: &str) -> Option<&DiversityRow> {
        self.rows.iter().find(|r| r.region_id == region_id)
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table holds no regions.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for DiversityTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>14} {:>14} {:>14}", "region_id", "div_n_active", "div_n_RCA")?;
        writeln!(f, "  {}", "-".repeat(42))?;
        for row in &self.rows {
            writeln!(
                f,
                "{:>14} {:>14} {:>14}",
                row.region_id, row.active_count, row.rca_count
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// Diversity Estimator
// ============================================================================

/// Diversity estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diversity<T> {
    /// RCA threshold applied to the location quotient.
    pub threshold: T,
}

impl<T: Float> Default for Diversity<T> {
    fn default() -> Self {
        Self { threshold: T::one() }
    }
}

impl<T: Float> Diversity<T> {
    /// Estimator with the conventional threshold of 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the RCA threshold.
    pub fn threshold(mut self, threshold: T) -> Self {
        self.threshold = threshold;
        self
    }

    /// Diversity of `x`, deriving RCA from its location quotients.
    pub fn compute(&self, x: &ActivityMatrix<T>) -> DiversityTable {
        let rca = LocationQuotient::new().threshold(self.threshold).rca(x);
        tabulate(x, &rca)
    }

    /// Diversity of `x` using a precomputed RCA matrix.
    ///
    /// `rca` is taken as already thresholded, so `self.threshold` is not
    /// applied. Fails with `ShapeMismatch` unless `rca` has the labels of `x`,
    /// and with `InvalidNumericValue` if it holds anything other than 0 and 1.
    pub fn compute_with_rca(
        &self,
        x: &ActivityMatrix<T>,
        rca: &ActivityMatrix<T>,
    ) -> Result<DiversityTable, ComplexityError> {
        x.ensure_aligned(rca)?;
        if !rca.is_binary() {
            if let Some(i) = rca.values().iter().position(|&v| v != T::zero() && v != T::one()) {
                let (r, c) = (i / rca.n_cols(), i % rca.n_cols());
                return Err(ComplexityError::InvalidNumericValue(format!(
                    "rca[{}, {}]={} is not binary",
                    rca.row_labels()[r],
                    rca.col_labels()[c],
                    rca.values()[i].to_f64().unwrap_or(f64::NAN)
                )));
            }
        }
        Ok(tabulate(x, rca))
    }
}

fn tabulate<T: Float>(x: &ActivityMatrix<T>, rca: &ActivityMatrix<T>) -> DiversityTable {
    let rows = x
        .row_labels()
        .iter()
        .enumerate()
        .map(|(r, label)| DiversityRow {
            region_id: label.clone(),
            active_count: x.row(r).iter().filter(|&&v| v > T::zero()).count(),
            rca_count: rca.row(r).iter().filter(|&&v| v > T::zero()).count(),
        })
        .collect();
    DiversityTable { rows }
}
