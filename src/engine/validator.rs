//! Input validation for complexity configuration and data.
//!
//! ## Purpose
//!
//! This module provides validation functions for pipeline configuration
//! parameters and long-format input records. It checks requirements such as
//! iteration bounds, finite thresholds and non-negative activity values.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective mathematical constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not filter degenerate rows or columns.
//! * This module does not provide automatic correction of invalid inputs.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::ComplexityError;
use crate::primitives::index::Metric;
use crate::primitives::records::ActivityRecord;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for complexity configuration and input data.
///
/// All methods return `Result<(), ComplexityError>` and fail fast upon
/// identifying the first violation.
pub struct Validator;

impl Validator {
    /// Upper bound on Fitness iterations.
    pub const MAX_ITERATIONS: usize = 100_000;

    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate long-format records: non-empty, finite, non-negative.
    pub fn validate_records<T: Float>(records: &[ActivityRecord<T>]) -> Result<(), ComplexityError> {
        // Check 1: Non-empty
        if records.is_empty() {
            return Err(ComplexityError::EmptyInput);
        }

        // Check 2: Finite and non-negative values
        for (i, rec) in records.iter().enumerate() {
            if !rec.value.is_finite() {
                return Err(ComplexityError::InvalidNumericValue(format!(
                    "value[{}]={}",
                    i,
                    rec.value.to_f64().unwrap_or(f64::NAN)
                )));
            }
            if rec.value < T::zero() {
                return Err(ComplexityError::NegativeValue {
                    row: rec.region_id.clone(),
                    col: rec.sector_id.clone(),
                    value: rec.value.to_f64().unwrap_or(f64::NAN),
                });
            }
        }

        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the number of Fitness iterations.
    ///
    /// # Notes
    ///
    /// * At least 1 (a single iteration returns the initial vector).
    /// * At most `MAX_ITERATIONS` to bound computation.
    pub fn validate_iterations(n_iters: usize) -> Result<(), ComplexityError> {
        if n_iters == 0 || n_iters > Self::MAX_ITERATIONS {
            return Err(ComplexityError::InvalidIterations(n_iters));
        }
        Ok(())
    }

    /// Validate the RCA threshold.
    pub fn validate_threshold<T: Float>(threshold: T) -> Result<(), ComplexityError> {
        if !threshold.is_finite() || threshold < T::zero() {
            return Err(ComplexityError::InvalidThreshold(
                threshold.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate that at least one metric is requested.
    pub fn validate_metrics(metrics: &[Metric]) -> Result<(), ComplexityError> {
        if metrics.is_empty() {
            return Err(ComplexityError::NoMetrics);
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), ComplexityError> {
        if let Some(param) = duplicate_param {
            return Err(ComplexityError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
