//! Long-to-wide pivoting of activity records.
//!
//! ## Purpose
//!
//! This module turns long-format `ActivityRecord`s into the region-by-sector
//! `ActivityMatrix` for one year, or for all years pooled.
//!
//! ## Design notes
//!
//! * **Order**: Rows and columns follow the first appearance of each region
//!   and sector among the selected records.
//! * **Duplicates**: Several records for the same (region, sector) pair are
//!   combined with the configured `Aggregation`.
//! * **Missing pairs**: Become 0.
//!
//! ## Non-goals
//!
//! * This module does not geocode, rename, or deduplicate regions.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeMap, string::String, vec::Vec};
#[cfg(feature = "std")]
use std::collections::BTreeMap;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::ComplexityError;
use crate::primitives::matrix::ActivityMatrix;
use crate::primitives::records::ActivityRecord;

/// How duplicate (region, sector) records are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregation {
    /// Add the values.
    #[default]
    Sum,

    /// Average the values. Within one year this only affects duplicate
    /// records; pooled runs always average.
    Mean,
}

/// Distinct years present in `records`, ascending.
pub fn years<T>(records: &[ActivityRecord<T>]) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// Pivot the records of `year` (all records when `None`) into a matrix.
///
/// Fails with `EmptyInput` when no record matches.
pub fn pivot<T: Float>(
    records: &[ActivityRecord<T>],
    year: Option<i32>,
    aggregation: Aggregation,
) -> Result<ActivityMatrix<T>, ComplexityError> {
    let mut rows: Vec<String> = Vec::new();
    let mut cols: Vec<String> = Vec::new();
    let mut row_index: BTreeMap<&str, usize> = BTreeMap::new();
    let mut col_index: BTreeMap<&str, usize> = BTreeMap::new();
    // (row, col) -> (running total, count)
    let mut cells: BTreeMap<(usize, usize), (T, usize)> = BTreeMap::new();

    for rec in records.iter().filter(|r| year.is_none_or(|y| r.year == y)) {
        let r = *row_index.entry(rec.region_id.as_str()).or_insert_with(|| {
            rows.push(rec.region_id.clone());
            rows.len() - 1
        });
        let c = *col_index.entry(rec.sector_id.as_str()).or_insert_with(|| {
            cols.push(rec.sector_id.clone());
            cols.len() - 1
        });
        let cell = cells.entry((r, c)).or_insert((T::zero(), 0));
        cell.0 = cell.0 + rec.value;
        cell.1 += 1;
    }

    if rows.is_empty() {
        return Err(ComplexityError::EmptyInput);
    }

    let n_cols = cols.len();
    let mut data = vec![T::zero(); rows.len() * n_cols];
    for ((r, c), (total, count)) in cells {
        data[r * n_cols + c] = match aggregation {
            Aggregation::Sum => total,
            Aggregation::Mean => total / T::from(count).unwrap_or_else(T::one),
        };
    }

    ActivityMatrix::new(rows, cols, data)
}
