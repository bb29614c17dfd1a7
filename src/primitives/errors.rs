//! Error types for economic-complexity estimation.
//!
//! ## Purpose
//!
//! This module defines the single error type returned by every fallible
//! operation in the crate, from matrix construction through the batch
//! pipeline.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Estimators return the first violation they meet.
//! * **Structured**: Variants carry the offending label or value so callers
//!   can report it without parsing the message.
//! * **no_std**: Derived with `thiserror`, which does not require `std`.
//!
//! ## Key concepts
//!
//! * **Degenerate input**: A zero row or column sum reaching Fitness or ECI.
//! * **Shape mismatch**: A derived matrix whose labels do not line up with
//!   the matrix it is paired with.
//! * **Non-finite**: NaN or Inf produced mid-computation.
//!
//! ## Non-goals
//!
//! * This module does not decide whether an error is recoverable; the batch
//!   pipeline skips failing years, everything else propagates.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use thiserror::Error;

// Internal dependencies
use crate::primitives::matrix::Axis;

/// Errors raised while building matrices or computing complexity metrics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComplexityError {
    /// Matrix with no rows or columns, or no input records.
    #[error("Input is empty")]
    EmptyInput,

    /// Flat data buffer does not match the declared shape.
    #[error("Dimension mismatch: {rows}x{cols} matrix needs {} values, got {len}", .rows * .cols)]
    DimensionMismatch {
        /// Declared row count.
        rows: usize,
        /// Declared column count.
        cols: usize,
        /// Length of the supplied buffer.
        len: usize,
    },

    /// A row or column label appears more than once.
    #[error("Duplicate {axis} label: {label}")]
    DuplicateLabel {
        /// Axis holding the duplicate.
        axis: Axis,
        /// The repeated label.
        label: String,
    },

    /// Activity values must be non-negative.
    #[error("Negative activity at ({row}, {col}): {value}")]
    NegativeValue {
        /// Row label.
        row: String,
        /// Column label.
        col: String,
        /// Offending value.
        value: f64,
    },

    /// NaN or Inf in the input or in a parameter.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// A zero row or column sum reached an estimator that divides by it.
    #[error("Degenerate input: {axis} '{label}' has zero total activity")]
    DegenerateInput {
        /// Axis of the zero sum.
        axis: Axis,
        /// Label of the zero row or column.
        label: String,
    },

    /// Labels of a derived matrix do not align with the source matrix.
    #[error("Shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch {
        /// Description of the expected shape.
        expected: String,
        /// Description of the supplied shape.
        got: String,
    },

    /// A sector has no entry in the segment lookup.
    #[error("Sector '{0}' has no segment mapping")]
    UnmappedSector(String),

    /// NaN or Inf produced during a computation.
    #[error("Non-finite value produced during {stage}")]
    NonFinite {
        /// Computation stage that produced the value.
        stage: &'static str,
    },

    /// Iteration count outside the accepted range.
    #[error("Invalid iterations: {0} (must be in [1, 100000])")]
    InvalidIterations(usize),

    /// Binarisation threshold is not a finite, non-negative number.
    #[error("Invalid threshold: {0} (must be finite and >= 0)")]
    InvalidThreshold(f64),

    /// Not enough regions for the requested estimator.
    #[error("Too few regions: got {got}, need at least {min}")]
    TooFewRegions {
        /// Number of regions supplied.
        got: usize,
        /// Minimum number required.
        min: usize,
    },

    /// The eigen-solver did not converge.
    #[error("Eigen-decomposition failed to converge")]
    EigenDecompositionFailed,

    /// The pipeline was configured without any metric.
    #[error("No metrics selected")]
    NoMetrics,

    /// A builder parameter was set more than once.
    #[error("Parameter '{parameter}' was set multiple times")]
    DuplicateParameter {
        /// Name of the repeated parameter.
        parameter: &'static str,
    },
}
