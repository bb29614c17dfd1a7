//! Per-entity complexity scores.
//!
//! ## Purpose
//!
//! `ComplexityIndex` is the one-column table produced by the ECI and Fitness
//! estimators: one real-valued score per region (or per sector, for product
//! complexity), in the row order of the matrix it was computed from.
//!
//! ## Key concepts
//!
//! * **Orientation**: ECI scores have no intrinsic scale or sign; the
//!   estimator fixes both. Fitness+ scores are log-ratios with zero at the
//!   average fitness.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

// External dependencies
use core::fmt;
use num_traits::Float;

// ============================================================================
// Metric
// ============================================================================

/// Complexity metric tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    /// Economic Complexity Index (regions).
    Eci,

    /// Product Complexity Index (sectors).
    Pci,

    /// Plain Fitness, `ln(x)`.
    Fitness,

    /// Fitness+ with optional size-bias correction.
    FitnessPlus,
}

impl Metric {
    /// Column name used in output tables.
    pub fn column_name(&self) -> &'static str {
        match self {
            Metric::Eci => "eci",
            Metric::Pci => "pci",
            Metric::Fitness => "fitness",
            Metric::FitnessPlus => "fit_p",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.column_name())
    }
}

// ============================================================================
// Complexity Index
// ============================================================================

/// One score per label for a single metric.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexityIndex<T> {
    metric: Metric,
    labels: Vec<String>,
    scores: Vec<T>,
}

impl<T: Float> ComplexityIndex<T> {
    pub(crate) fn new(metric: Metric, labels: Vec<String>, scores: Vec<T>) -> Self {
        debug_assert_eq!(labels.len(), scores.len());
        Self {
            metric,
            labels,
            scores,
        }
    }

    /// Metric these scores belong to.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Labels in output order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Scores in output order.
    pub fn scores(&self) -> &[T] {
        &self.scores
    }

    /// Number of scored entities.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// True when nothing was scored.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Score of one label.
    pub fn get(&self, label: &str) -> Option<T> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.scores[i])
    }

    /// `(label, score)` pairs in output order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, T)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.scores.iter().copied())
    }
}

impl<T: Float + fmt::Display> fmt::Display for ComplexityIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Metric: {}", self.metric)?;
        writeln!(f, "  Entities: {}", self.len())?;
        writeln!(f)?;
        writeln!(f, "{:>14} {:>14}", "id", self.metric.column_name())?;
        writeln!(f, "  {}", "-".repeat(27))?;
        for (label, score) in self.iter() {
            writeln!(f, "{:>14} {:>14.6}", label, score)?;
        }
        Ok(())
    }
}
