//! Fitness and Fitness+ complexity metrics.
//!
//! ## Purpose
//!
//! This module implements the iterative Fitness family of complexity metrics
//! for a region-by-sector matrix `X`:
//!
//! ```text
//! x[r] <- sum_s( X[r,s] / sum_r'( X[r',s] / x[r'] ) )
//! x    <- x / mean(x)
//! ```
//!
//! ## Design notes
//!
//! * **Plain Fitness**: starts from ones, renormalises by the arithmetic mean,
//!   returns `ln(x)`.
//! * **Fitness+**: starts from `rowsum(X)` normalised by its mean, renormalises
//!   by the geometric mean (arithmetic for binary matrices). With correction
//!   the score is `ln(x) - ln(sum_s X[r,s] / colsum[s])`.
//! * **Fixed iterations**: the update runs exactly `n_iters - 1` times. There
//!   is no convergence check, so results at small `n_iters` are not
//!   guaranteed to be stable; ~200 is typical for real data.
//! * **Fail-Fast**: every intermediate vector is checked for NaN/Inf.
//!
//! ## Invariants
//!
//! * Scores are invariant to scaling `X` by a positive constant.
//! * Output follows the row order of `X`.
//!
//! ## Non-goals
//!
//! * This module does not filter degenerate rows or columns; it rejects them.
//! * This module does not compute sector-side complexity.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::degeneracy::DegeneracyFilter;
use crate::algorithms::ensure_finite;
use crate::math::stats::NormMean;
use crate::primitives::errors::ComplexityError;
use crate::primitives::index::{ComplexityIndex, Metric};
use crate::primitives::matrix::ActivityMatrix;

// ============================================================================
// Fitness Variant
// ============================================================================

/// Which member of the Fitness family to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitnessVariant {
    /// Plain Fitness.
    Plain,

    /// Fitness+, optionally with the size-bias correction.
    Plus {
        /// Subtract `ln(sum_s X[r,s] / colsum[s])` from `ln(x)`.
        correction: bool,
    },
}

// ============================================================================
// Fitness Estimator
// ============================================================================

/// Fitness estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fitness {
    /// Number of iterations (the update runs `n_iters - 1` times).
    pub n_iters: usize,

    /// Plain or Fitness+.
    pub variant: FitnessVariant,

    /// Normalisation mean override for Fitness+.
    pub normalization: Option<NormMean>,
}

impl Default for Fitness {
    fn default() -> Self {
        Self::plus(Self::DEFAULT_ITERATIONS)
    }
}

impl Fitness {
    /// Iteration count used when none is given.
    pub const DEFAULT_ITERATIONS: usize = 200;

    /// Plain Fitness.
    pub fn plain(n_iters: usize) -> Self {
        Self {
            n_iters,
            variant: FitnessVariant::Plain,
            normalization: None,
        }
    }

    /// Fitness+ with size-bias correction.
    pub fn plus(n_iters: usize) -> Self {
        Self {
            n_iters,
            variant: FitnessVariant::Plus { correction: true },
            normalization: None,
        }
    }

    /// Toggle the Fitness+ correction. No effect on plain Fitness.
    pub fn correction(mut self, correction: bool) -> Self {
        if let FitnessVariant::Plus { .. } = self.variant {
            self.variant = FitnessVariant::Plus { correction };
        }
        self
    }

    /// Force the Fitness+ normalisation mean instead of deriving it from the
    /// matrix's binary tag.
    pub fn normalization(mut self, mean: NormMean) -> Self {
        self.normalization = Some(mean);
        self
    }

    /// Metric tag of the produced scores.
    pub fn metric(&self) -> Metric {
        match self.variant {
            FitnessVariant::Plain => Metric::Fitness,
            FitnessVariant::Plus { .. } => Metric::FitnessPlus,
        }
    }

    /// Compute the scores.
    ///
    /// `x` must already be free of zero rows and columns.
    pub fn compute<T: Float>(&self, x: &ActivityMatrix<T>) -> Result<ComplexityIndex<T>, ComplexityError> {
        if self.n_iters == 0 {
            return Err(ComplexityError::InvalidIterations(self.n_iters));
        }
        DegeneracyFilter::check(x)?;

        let scores = match self.variant {
            FitnessVariant::Plain => {
                let x_fit = iterate(x, vec![T::one(); x.n_rows()], self.n_iters, NormMean::Arithmetic)?;
                x_fit.iter().map(|&v| v.ln()).collect()
            }
            FitnessVariant::Plus { correction } => {
                let mean = self
                    .normalization
                    .unwrap_or_else(|| NormMean::for_matrix(x.is_binary()));
                let initial = normalise(x.row_sums(), mean)?;
                let x_fit = iterate(x, initial, self.n_iters, mean)?;
                if correction {
                    let shares = sector_share_sums(x);
                    x_fit
                        .iter()
                        .zip(&shares)
                        .map(|(&v, &share)| v.ln() - share.ln())
                        .collect()
                } else {
                    x_fit
                }
            }
        };

        ensure_finite(&scores, "fitness output")?;
        Ok(ComplexityIndex::new(
            self.metric(),
            x.row_labels().to_vec(),
            scores,
        ))
    }
}

// ============================================================================
// Iteration
// ============================================================================

/// Run the update `n_iters - 1` times from `fitness`.
fn iterate<T: Float>(
    x: &ActivityMatrix<T>,
    mut fitness: Vec<T>,
    n_iters: usize,
    mean: NormMean,
) -> Result<Vec<T>, ComplexityError> {
    let n_cols = x.n_cols();
    let mut denom = vec![T::zero(); n_cols];

    for _ in 1..n_iters {
        // denom[s] = sum_r X[r,s] / x[r]
        denom.iter_mut().for_each(|d| *d = T::zero());
        for (r, &f) in fitness.iter().enumerate() {
            for (d, &v) in denom.iter_mut().zip(x.row(r)) {
                *d = *d + v / f;
            }
        }
        ensure_finite(&denom, "fitness update")?;

        // x[r] = sum_s X[r,s] / denom[s]
        for (r, f) in fitness.iter_mut().enumerate() {
            *f = x
                .row(r)
                .iter()
                .zip(&denom)
                .fold(T::zero(), |acc, (&v, &d)| acc + v / d);
        }
        ensure_finite(&fitness, "fitness update")?;

        fitness = normalise(fitness, mean)?;
    }

    Ok(fitness)
}

fn normalise<T: Float>(vals: Vec<T>, mean: NormMean) -> Result<Vec<T>, ComplexityError> {
    let m = mean
        .compute(&vals)
        .ok_or(ComplexityError::NonFinite {
            stage: "fitness normalisation",
        })?;
    let out: Vec<T> = vals.into_iter().map(|v| v / m).collect();
    ensure_finite(&out, "fitness normalisation")?;
    Ok(out)
}

/// `sum_s X[r,s] / colsum[s]` per region.
fn sector_share_sums<T: Float>(x: &ActivityMatrix<T>) -> Vec<T> {
    let col_sums = x.col_sums();
    (0..x.n_rows())
        .map(|r| {
            x.row(r)
                .iter()
                .zip(&col_sums)
                .fold(T::zero(), |acc, (&v, &c)| acc + v / c)
        })
        .collect()
}
