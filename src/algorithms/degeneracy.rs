//! Removal of zero-activity regions and sectors.
//!
//! ## Purpose
//!
//! Fitness and ECI divide by row and column sums. This module drops every
//! region and sector with zero total activity, and provides the strict check
//! those estimators run before dividing.
//!
//! ## Design notes
//!
//! * **Order**: Rows are checked and dropped first; columns are then checked
//!   on the remaining matrix, so a column emptied by row removal is caught.
//! * **Logging**: Dropped labels are reported at warn level, never as errors.
//!
//! ## Invariants
//!
//! * Filtering is idempotent.
//! * A matrix with no degenerate row or column is returned unchanged (by value).
//! * The binary tag and label order are preserved.
//!
//! ## Non-goals
//!
//! * This module does not remove near-zero or low-count entities.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

// External dependencies
use num_traits::Float;
use tracing::warn;

// Internal dependencies
use crate::primitives::errors::ComplexityError;
use crate::primitives::matrix::{ActivityMatrix, Axis};

// ============================================================================
// Filter Outcome
// ============================================================================

/// Result of a filtering pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome<T> {
    /// Matrix with degenerate rows and columns removed.
    pub matrix: ActivityMatrix<T>,

    /// Labels of the dropped rows.
    pub dropped_rows: Vec<String>,

    /// Labels of the dropped columns.
    pub dropped_cols: Vec<String>,
}

impl<T> FilterOutcome<T> {
    /// True when nothing was dropped.
    pub fn is_unchanged(&self) -> bool {
        self.dropped_rows.is_empty() && self.dropped_cols.is_empty()
    }
}

// ============================================================================
// Degeneracy Filter
// ============================================================================

/// Drops all-zero rows and columns.
pub struct DegeneracyFilter;

impl DegeneracyFilter {
    /// Drop degenerate rows, then degenerate columns, reporting what was dropped.
    pub fn apply<T: Float>(x: &ActivityMatrix<T>) -> FilterOutcome<T> {
        let (n_rows, n_cols) = x.shape();
        let keep_all_cols = vec![true; n_cols];

        // Step 1: Rows
        let keep_rows: Vec<bool> = x.row_sums().iter().map(|&s| s > T::zero()).collect();
        let dropped_rows = dropped_labels(x.row_labels(), &keep_rows);
        let rows_filtered = if dropped_rows.is_empty() {
            x.clone()
        } else {
            warn!(dropped = ?dropped_rows, "Dropping all zero rows");
            x.select(&keep_rows, &keep_all_cols)
        };

        // Step 2: Columns, on the row-filtered matrix
        let keep_cols: Vec<bool> = rows_filtered
            .col_sums()
            .iter()
            .map(|&s| s > T::zero())
            .collect();
        let dropped_cols = dropped_labels(rows_filtered.col_labels(), &keep_cols);
        let matrix = if dropped_cols.is_empty() {
            rows_filtered
        } else {
            warn!(dropped = ?dropped_cols, "Dropping all zero cols");
            let keep_remaining_rows = vec![true; n_rows - dropped_rows.len()];
            rows_filtered.select(&keep_remaining_rows, &keep_cols)
        };

        FilterOutcome {
            matrix,
            dropped_rows,
            dropped_cols,
        }
    }

    /// Filtered matrix only.
    pub fn filter<T: Float>(x: &ActivityMatrix<T>) -> ActivityMatrix<T> {
        Self::apply(x).matrix
    }

    /// Fail on the first zero row sum, then the first zero column sum.
    pub fn check<T: Float>(x: &ActivityMatrix<T>) -> Result<(), ComplexityError> {
        if x.is_empty() {
            return Err(ComplexityError::EmptyInput);
        }
        if let Some(r) = x.row_sums().iter().position(|&s| s <= T::zero()) {
            return Err(ComplexityError::DegenerateInput {
                axis: Axis::Row,
                label: x.row_labels()[r].clone(),
            });
        }
        if let Some(c) = x.col_sums().iter().position(|&s| s <= T::zero()) {
            return Err(ComplexityError::DegenerateInput {
                axis: Axis::Column,
                label: x.col_labels()[c].clone(),
            });
        }
        Ok(())
    }
}

fn dropped_labels(labels: &[String], keep: &[bool]) -> Vec<String> {
    labels
        .iter()
        .zip(keep)
        .filter_map(|(l, &k)| (!k).then(|| l.clone()))
        .collect()
}
