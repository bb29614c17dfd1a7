//! Long-format output table.
//!
//! ## Purpose
//!
//! This module defines the table handed to the output-writing layer: one row
//! per (entity, year, metric), tagged with the dataset source and sector
//! granularity, plus the list of years that were skipped.
//!
//! ## Design notes
//!
//! * **Long format**: `{region_id, year, metric, value, sector_type, source}`.
//! * **Skips**: A failed year is recorded with its error instead of aborting
//!   the batch.
//!
//! ## Non-goals
//!
//! * This module does not serialise to CSV or any file format.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

// External dependencies
use core::fmt;
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::ComplexityError;
use crate::primitives::index::{ComplexityIndex, Metric};

// ============================================================================
// Records
// ============================================================================

/// One output row.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexityRecord<T> {
    /// Region identifier (sector identifier for PCI rows).
    pub region_id: String,

    /// Year of the input snapshot.
    pub year: i32,

    /// Metric of `value`.
    pub metric: Metric,

    /// Score.
    pub value: T,

    /// Sector granularity the matrix was built at (e.g. `SIC4`, a segment name).
    pub sector_type: String,

    /// Dataset the activity came from.
    pub source: String,
}

/// A year that could not be computed.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedYear {
    /// The skipped year.
    pub year: i32,

    /// Why it was skipped.
    pub error: ComplexityError,
}

// ============================================================================
// Table
// ============================================================================

/// Output of a batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexityTable<T> {
    /// Output rows, ordered by year, then metric, then entity.
    pub records: Vec<ComplexityRecord<T>>,

    /// Years skipped with their errors.
    pub skipped: Vec<SkippedYear>,
}

impl<T> Default for ComplexityTable<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T: Float> ComplexityTable<T> {
    /// Append every score of `indices`, tagged with year and metadata.
    pub fn extend_from_indices(
        &mut self,
        year: i32,
        source: &str,
        sector_type: &str,
        indices: &[ComplexityIndex<T>],
    ) {
        for index in indices {
            self.records.extend(index.iter().map(|(label, value)| ComplexityRecord {
                region_id: String::from(label),
                year,
                metric: index.metric(),
                value,
                sector_type: String::from(sector_type),
                source: String::from(source),
            }));
        }
    }

    /// Number of output rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when there are no output rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows of one metric.
    pub fn metric(&self, metric: Metric) -> impl Iterator<Item = &ComplexityRecord<T>> + '_ {
        self.records.iter().filter(move |r| r.metric == metric)
    }

    /// Score of one entity for a metric and year.
    pub fn value(&self, region_id: &str, year: i32, metric: Metric) -> Option<T> {
        self.records
            .iter()
            .find(|r| r.region_id == region_id && r.year == year && r.metric == metric)
            .map(|r| r.value)
    }

    /// Distinct years with at least one row, in output order.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = Vec::new();
        for r in &self.records {
            if !years.contains(&r.year) {
                years.push(r.year);
            }
        }
        years
    }
}

impl<T: Float + fmt::Display> fmt::Display for ComplexityTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Rows: {}", self.records.len())?;
        writeln!(f, "  Years: {}", self.years().len())?;
        if !self.skipped.is_empty() {
            writeln!(f, "  Skipped years: {}", self.skipped.len())?;
            for s in &self.skipped {
                writeln!(f, "    {}: {}", s.year, s.error)?;
            }
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>14} {:>6} {:>8} {:>14} {:>14} {:>10}",
            "region_id", "year", "metric", "value", "sector_type", "source"
        )?;
        writeln!(f, "  {}", "-".repeat(70))?;
        for r in &self.records {
            writeln!(
                f,
                "{:>14} {:>6} {:>8} {:>14.6} {:>14} {:>10}",
                r.region_id, r.year, r.metric, r.value, r.sector_type, r.source
            )?;
        }
        Ok(())
    }
}
