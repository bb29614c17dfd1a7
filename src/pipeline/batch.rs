//! Batch complexity pipeline over years.
//!
//! ## Purpose
//!
//! This module runs the complete chain for a long-format dataset: for every
//! year, pivot to a matrix, optionally regroup sectors into segments, run the
//! estimator chain, and tag the scores with year, source and sector type.
//!
//! ## Design notes
//!
//! * **Isolation**: Years are independent. A failing year is logged at warn
//!   level and recorded in `ComplexityTable::skipped`; other years continue.
//! * **Strict core**: Within a year every error propagates immediately.
//! * **Parallelism**: With the `parallel` feature, years run on rayon. Output
//!   order is the same as the sequential run.
//! * **Aggregation**: The configured `Aggregation` combines duplicate records
//!   within one year. `run_pooled` ignores it and averages every record of a
//!   (region, sector) pair across all years.
//!
//! ## Invariants
//!
//! * Output rows are ordered by year ascending.
//! * Every record passes validation before any year is computed.
//!
//! ## Non-goals
//!
//! * This module does not read or write files.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

// External dependencies
use core::fmt::Debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, warn};

// Internal dependencies
use crate::engine::executor::{ComplexityConfig, ComplexityExecutor};
use crate::engine::output::{ComplexityTable, SkippedYear};
use crate::engine::validator::Validator;
use crate::math::linalg::EigenLinalg;
use crate::pipeline::pivot::{Aggregation, pivot, years};
use crate::pipeline::segments::SegmentMap;
use crate::primitives::errors::ComplexityError;
use crate::primitives::index::ComplexityIndex;
use crate::primitives::matrix::ActivityMatrix;
use crate::primitives::records::ActivityRecord;

// ============================================================================
// Pipeline
// ============================================================================

/// Configured batch pipeline. Build it with `Complexity::new()`.
#[derive(Debug, Clone)]
pub struct ComplexityPipeline<T> {
    pub(crate) config: ComplexityConfig<T>,
    pub(crate) segments: Option<SegmentMap>,
    pub(crate) drop_unmapped: bool,
    pub(crate) aggregation: Aggregation,
    pub(crate) source: String,
    pub(crate) sector_type: String,
}

impl<T: EigenLinalg + Debug + Send + Sync> ComplexityPipeline<T> {
    /// Resolved estimator configuration.
    pub fn config(&self) -> &ComplexityConfig<T> {
        &self.config
    }

    /// Compute every year in `records`.
    ///
    /// Only invalid records fail the whole call; a failing year is skipped.
    pub fn run(&self, records: &[ActivityRecord<T>]) -> Result<ComplexityTable<T>, ComplexityError> {
        Validator::validate_records(records)?;

        let all_years = years(records);
        debug!(years = all_years.len(), source = %self.source, "Running complexity batch");

        #[cfg(feature = "parallel")]
        let results: Vec<(i32, Result<Vec<ComplexityIndex<T>>, ComplexityError>)> = all_years
            .par_iter()
            .map(|&year| (year, self.run_year(records, year)))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let results: Vec<(i32, Result<Vec<ComplexityIndex<T>>, ComplexityError>)> = all_years
            .iter()
            .map(|&year| (year, self.run_year(records, year)))
            .collect();

        let mut table = ComplexityTable::default();
        for (year, result) in results {
            match result {
                Ok(indices) => {
                    table.extend_from_indices(year, &self.source, &self.sector_type, &indices)
                }
                Err(error) => {
                    warn!(year, source = %self.source, %error, "Skipping year");
                    table.skipped.push(SkippedYear { year, error });
                }
            }
        }

        Ok(table)
    }

    /// Compute one year, pivoting with the configured aggregation.
    pub fn run_year(
        &self,
        records: &[ActivityRecord<T>],
        year: i32,
    ) -> Result<Vec<ComplexityIndex<T>>, ComplexityError> {
        let matrix = pivot(records, Some(year), self.aggregation)?;
        debug!(year, rows = matrix.n_rows(), cols = matrix.n_cols(), "Pivoted year");
        self.compute(&matrix)
    }

    /// Compute once on all years pooled, averaging each (region, sector) pair
    /// over the records it appears in.
    ///
    /// Unlike `run`, any failure is returned rather than skipped.
    pub fn run_pooled(&self, records: &[ActivityRecord<T>]) -> Result<Vec<ComplexityIndex<T>>, ComplexityError> {
        Validator::validate_records(records)?;

        let matrix = pivot(records, None, Aggregation::Mean)?;
        debug!(
            years = years(records).len(),
            rows = matrix.n_rows(),
            cols = matrix.n_cols(),
            "Pivoted pooled years"
        );
        self.compute(&matrix)
    }

    /// Regroup (if configured) and compute every metric for one matrix.
    pub fn compute(&self, x: &ActivityMatrix<T>) -> Result<Vec<ComplexityIndex<T>>, ComplexityError> {
        match &self.segments {
            Some(map) => {
                let grouped = map.regroup(x, self.drop_unmapped)?;
                ComplexityExecutor::run(&grouped, &self.config)
            }
            None => ComplexityExecutor::run(x, &self.config),
        }
    }
}
