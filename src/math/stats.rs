//! Summary statistics used by the complexity estimators.
//!
//! ## Purpose
//!
//! This module provides the normalisation means applied between Fitness
//! iterations and the Pearson correlation used by one of the ECI sign
//! statistics.
//!
//! ## Design notes
//!
//! * **Geometric mean**: Computed as `exp(mean(ln x))` to avoid overflow of
//!   the running product.
//! * **Failure**: Undefined results are reported as `None`; callers decide
//!   which error to raise.
//!
//! ## Invariants
//!
//! * A returned mean is finite and > 0 for strictly positive input.
//!
//! ## Non-goals
//!
//! * This module does not provide weighted variants.

// External dependencies
use num_traits::Float;

// ============================================================================
// Normalisation Mean
// ============================================================================

/// Mean used to renormalise the fitness vector after each iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormMean {
    /// Arithmetic mean.
    Arithmetic,

    /// Geometric mean, the default for non-binary matrices.
    #[default]
    Geometric,
}

impl NormMean {
    /// Mean to use for a matrix, given its binary tag.
    pub fn for_matrix(is_binary: bool) -> Self {
        if is_binary {
            NormMean::Arithmetic
        } else {
            NormMean::Geometric
        }
    }

    /// Compute the mean of `vals`.
    ///
    /// Returns `None` for empty input, and for the geometric mean of a slice
    /// holding a non-positive value.
    pub fn compute<T: Float>(&self, vals: &[T]) -> Option<T> {
        if vals.is_empty() {
            return None;
        }
        let n = T::from(vals.len())?;

        match self {
            NormMean::Arithmetic => Some(vals.iter().fold(T::zero(), |acc, &v| acc + v) / n),
            NormMean::Geometric => {
                if vals.iter().any(|&v| v <= T::zero()) {
                    return None;
                }
                let log_sum = vals.iter().fold(T::zero(), |acc, &v| acc + v.ln());
                Some((log_sum / n).exp())
            }
        }
    }
}

// ============================================================================
// Correlation
// ============================================================================

/// Pearson correlation coefficient of two equal-length slices.
///
/// Returns `None` if the slices differ in length, hold fewer than two
/// values, or either has zero variance.
pub fn pearson_correlation<T: Float>(a: &[T], b: &[T]) -> Option<T> {
    if a.len() != b.len() || a.len() < 2 {
        return None;
    }
    let n = T::from(a.len())?;
    let mean_a = a.iter().fold(T::zero(), |acc, &v| acc + v) / n;
    let mean_b = b.iter().fold(T::zero(), |acc, &v| acc + v) / n;

    let (mut cov, mut var_a, mut var_b) = (T::zero(), T::zero(), T::zero());
    for (&x, &y) in a.iter().zip(b) {
        let (dx, dy) = (x - mean_a, y - mean_b);
        cov = cov + dx * dy;
        var_a = var_a + dx * dx;
        var_b = var_b + dy * dy;
    }

    if var_a <= T::zero() || var_b <= T::zero() {
        return None;
    }
    Some(cov / (var_a.sqrt() * var_b.sqrt()))
}
