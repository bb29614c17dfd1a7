//! Location quotients and revealed comparative advantage.
//!
//! ## Purpose
//!
//! This module computes the location quotient (LQ) of every region in every
//! sector, and binarises it into a revealed-comparative-advantage (RCA)
//! matrix.
//!
//! ## Design notes
//!
//! * **Cross-multiplication**: `LQ[r,s] = X[r,s] * total / (rowsum[r] * colsum[s])`,
//!   equivalent to the ratio of shares but with a single division.
//! * **Invalid cells**: 0/0 and x/0 cells (zero row or column sums) are
//!   replaced with 0 in an explicit post-processing pass.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **LQ > 1**: the region is more specialised in the sector than the
//!   reference population.
//! * **RCA**: `1` where `LQ > threshold`, else `0`. The threshold defaults to 1.
//!
//! ## Invariants
//!
//! * Output has the labels and shape of the input.
//! * Every output value is finite and >= 0.
//! * RCA output is tagged binary.
//!
//! ## Non-goals
//!
//! * This module does not drop degenerate rows or columns (see `degeneracy`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::matrix::ActivityMatrix;

// ============================================================================
// Location Quotient
// ============================================================================

/// Location quotient estimator with its RCA threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationQuotient<T> {
    /// Cells with `LQ > threshold` count as revealed comparative advantage.
    pub threshold: T,
}

impl<T: Float> Default for LocationQuotient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> LocationQuotient<T> {
    /// Estimator with the conventional threshold of 1.
    pub fn new() -> Self {
        Self { threshold: T::one() }
    }

    /// Set the binarisation threshold.
    pub fn threshold(mut self, threshold: T) -> Self {
        self.threshold = threshold;
        self
    }

    /// Location quotient matrix.
    pub fn compute(&self, x: &ActivityMatrix<T>) -> ActivityMatrix<T> {
        let total = x.total();
        let row_sums = x.row_sums();
        let col_sums = x.col_sums();

        let mut data = Vec::with_capacity(x.values().len());
        for (r, &row_sum) in row_sums.iter().enumerate() {
            data.extend(
                x.row(r)
                    .iter()
                    .zip(&col_sums)
                    .map(|(&v, &col_sum)| (v * total) / (row_sum * col_sum)),
            );
        }
        replace_invalid_with_zero(&mut data);

        ActivityMatrix::from_parts(x.row_labels().to_vec(), x.col_labels().to_vec(), data, false)
    }

    /// Binary RCA matrix: `1` where `LQ > threshold`, else `0`.
    pub fn rca(&self, x: &ActivityMatrix<T>) -> ActivityMatrix<T> {
        self.binarize(&self.compute(x))
    }

    /// Threshold an already computed LQ matrix.
    pub fn binarize(&self, lq: &ActivityMatrix<T>) -> ActivityMatrix<T> {
        let data = lq
            .values()
            .iter()
            .map(|&v| if v > self.threshold { T::one() } else { T::zero() })
            .collect();
        ActivityMatrix::from_parts(lq.row_labels().to_vec(), lq.col_labels().to_vec(), data, true)
    }
}

/// Replace NaN and Inf with 0.
///
/// Cells of zero-sum rows or columns evaluate to 0/0; they carry no
/// specialisation and must resolve to a defined value.
#[inline]
fn replace_invalid_with_zero<T: Float>(vals: &mut [T]) {
    for v in vals.iter_mut() {
        if !v.is_finite() {
            *v = T::zero();
        }
    }
}
