//! Economic Complexity Index (ECI) via eigen-decomposition.
//!
//! ## Purpose
//!
//! This module computes the ECI of every region of a region-by-sector matrix
//! `X`, and the Product Complexity Index (PCI) of every sector by running the
//! same estimator on `Xᵗ`.
//!
//! ## Design notes
//!
//! * **Transition matrix**: `H = C · X · P · Xᵗ` with `C = diag(1/rowsum)` and
//!   `P = diag(1/colsum)`. ECI is the eigenvector of the second-largest
//!   eigenvalue of `H`; the largest belongs to the uniform vector.
//! * **Symmetrisation**: `H` is similar to the symmetric matrix
//!   `S = C^½ · X · P · Xᵗ · C^½`. If `S·u = λ·u` then `H·(C^½·u) = λ·(C^½·u)`,
//!   so the solver works on `S` and the eigenvector is mapped back. All
//!   eigenvalues are real and a symmetric solver suffices.
//! * **Scale**: the raw eigenvector is normalised to unit Euclidean length.
//! * **Sign**: eigenvectors are defined up to sign. The sign is resolved by a
//!   size heuristic (see `SignStatistic`) so repeated runs and row
//!   permutations give the same scores.
//! * **Region size**: `compute` measures size as the row sums of `X` itself.
//!   When `X` is an RCA matrix those are RCA counts; `compute_with_sizes`
//!   takes the raw activity totals instead.
//!
//! ## Invariants
//!
//! * Output follows the row order of `X`, not the ranking order.
//! * The decile used by the sign heuristic holds `max(1, floor(0.1 * n))` regions.
//! * `Mean` and `Correlation` keep the solver's sign only on a strictly
//!   positive association with size; a tie flips.
//!
//! ## Non-goals
//!
//! * This module does not filter degenerate rows or columns; it rejects them.
//! * This module does not binarise `X`; pass an RCA matrix for the classic ECI.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;
use tracing::info;

// Internal dependencies
use crate::algorithms::degeneracy::DegeneracyFilter;
use crate::algorithms::ensure_finite;
use crate::math::linalg::{EigenLinalg, ranked_eigenvector};
use crate::math::stats::pearson_correlation;
use crate::primitives::errors::ComplexityError;
use crate::primitives::index::{ComplexityIndex, Metric};
use crate::primitives::matrix::ActivityMatrix;

// ============================================================================
// Sign Statistic
// ============================================================================

/// Statistic used to orient the ECI so that higher scores go with larger
/// regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignStatistic {
    /// Flip if total activity of the top decile is below that of the bottom decile.
    #[default]
    Sum,

    /// Flip unless mean size of the five highest-ranked regions exceeds that
    /// of the five lowest-ranked (fewer when there are under ten regions).
    Mean,

    /// Flip unless the correlation between score and region size is positive.
    /// An undefined correlation (constant scores or sizes) leaves the sign.
    Correlation,
}

impl SignStatistic {
    /// Number of regions in each tail compared by `Mean`.
    const MEAN_TAIL: usize = 5;

    /// `-1` if `scores` should be flipped, `+1` otherwise.
    fn sign<T: Float>(&self, scores: &[T], sizes: &[T]) -> T {
        let n = scores.len();
        let flip = match self {
            SignStatistic::Sum => {
                let tail = usize::max(1, n / 10);
                let (top, bottom) = tail_totals(scores, sizes, tail);
                top < bottom
            }
            SignStatistic::Mean => {
                let tail = (n / 2).clamp(1, Self::MEAN_TAIL);
                // Equal tail sizes: comparing totals compares means.
                let (top, bottom) = tail_totals(scores, sizes, tail);
                top <= bottom
            }
            SignStatistic::Correlation => {
                pearson_correlation(scores, sizes).is_some_and(|c| c <= T::zero())
            }
        };

        if flip { -T::one() } else { T::one() }
    }
}

/// Total size of the `tail` highest- and `tail` lowest-scoring regions.
fn tail_totals<T: Float>(scores: &[T], sizes: &[T], tail: usize) -> (T, T) {
    let n = scores.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| scores[j].partial_cmp(&scores[i]).unwrap_or(Equal));

    let sum = |idx: &[usize]| idx.iter().fold(T::zero(), |acc, &i| acc + sizes[i]);
    (sum(&order[..tail]), sum(&order[n - tail..]))
}

// ============================================================================
// ECI Estimator
// ============================================================================

/// Economic Complexity Index estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eci {
    /// Sign orientation; `None` returns the solver's sign unchanged.
    pub sign_correction: Option<SignStatistic>,
}

impl Default for Eci {
    fn default() -> Self {
        Self {
            sign_correction: Some(SignStatistic::default()),
        }
    }
}

impl Eci {
    /// Minimum number of regions: the second eigenvector must exist.
    pub const MIN_REGIONS: usize = 2;

    /// Estimator with sum-based sign correction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or disable the sign statistic.
    pub fn sign_correction(mut self, statistic: Option<SignStatistic>) -> Self {
        self.sign_correction = statistic;
        self
    }

    /// ECI per region of `x`.
    ///
    /// `x` must already be free of zero rows and columns.
    pub fn compute<T: EigenLinalg>(&self, x: &ActivityMatrix<T>) -> Result<ComplexityIndex<T>, ComplexityError> {
        let scores = self.scores(x, None)?;
        Ok(ComplexityIndex::new(Metric::Eci, x.row_labels().to_vec(), scores))
    }

    /// ECI per region of `x`, oriented against `sizes` (one per row, in row
    /// order) rather than the row sums of `x`.
    ///
    /// Use this when `x` is an RCA matrix and orientation should follow the
    /// raw activity of each region.
    pub fn compute_with_sizes<T: EigenLinalg>(
        &self,
        x: &ActivityMatrix<T>,
        sizes: &[T],
    ) -> Result<ComplexityIndex<T>, ComplexityError> {
        let scores = self.scores(x, Some(sizes))?;
        Ok(ComplexityIndex::new(Metric::Eci, x.row_labels().to_vec(), scores))
    }

    /// PCI per sector of `x`, computed on the transpose.
    pub fn product_complexity<T: EigenLinalg>(
        &self,
        x: &ActivityMatrix<T>,
    ) -> Result<ComplexityIndex<T>, ComplexityError> {
        let xt = x.transpose();
        let scores = self.scores(&xt, None)?;
        Ok(ComplexityIndex::new(Metric::Pci, xt.row_labels().to_vec(), scores))
    }

    /// PCI per sector of `x`, oriented against `sizes` (one per column).
    pub fn product_complexity_with_sizes<T: EigenLinalg>(
        &self,
        x: &ActivityMatrix<T>,
        sizes: &[T],
    ) -> Result<ComplexityIndex<T>, ComplexityError> {
        let xt = x.transpose();
        let scores = self.scores(&xt, Some(sizes))?;
        Ok(ComplexityIndex::new(Metric::Pci, xt.row_labels().to_vec(), scores))
    }

    fn scores<T: EigenLinalg>(&self, x: &ActivityMatrix<T>, sizes: Option<&[T]>) -> Result<Vec<T>, ComplexityError> {
        let n = x.n_rows();
        if n < Self::MIN_REGIONS {
            return Err(ComplexityError::TooFewRegions {
                got: n,
                min: Self::MIN_REGIONS,
            });
        }
        if let Some(len) = sizes.map(<[T]>::len).filter(|&len| len != n) {
            return Err(ComplexityError::ShapeMismatch {
                expected: format!("{} sizes", n),
                got: format!("{} sizes", len),
            });
        }
        DegeneracyFilter::check(x)?;

        let k_r = x.row_sums();
        let k_s = x.col_sums();

        // Step 1: Symmetrised transition matrix
        let sym = symmetric_transition(x, &k_r, &k_s);
        ensure_finite(&sym, "eci transition matrix")?;

        // Step 2: Second-largest eigenvector, mapped back to H
        let u = ranked_eigenvector(&sym, n, 1).ok_or(ComplexityError::EigenDecompositionFailed)?;
        let mut v: Vec<T> = u.iter().zip(&k_r).map(|(&ui, &k)| ui / k.sqrt()).collect();

        // Step 3: Unit length
        let norm = v.iter().fold(T::zero(), |acc, &vi| acc + vi * vi).sqrt();
        if !norm.is_finite() || norm <= T::zero() {
            return Err(ComplexityError::NonFinite { stage: "eci normalisation" });
        }
        v.iter_mut().for_each(|vi| *vi = *vi / norm);
        ensure_finite(&v, "eci normalisation")?;

        // Step 4: Orientation
        if let Some(statistic) = self.sign_correction {
            let sign = statistic.sign(&v, sizes.unwrap_or(k_r.as_slice()));
            if sign < T::zero() {
                info!("Corrected sign");
                v.iter_mut().for_each(|vi| *vi = -*vi);
            }
        }

        Ok(v)
    }
}

/// `S[i,j] = sum_s X[i,s] X[j,s] / k_s / sqrt(k_i k_j)`, column-major (and
/// symmetric, so row-major too).
fn symmetric_transition<T: Float>(x: &ActivityMatrix<T>, k_r: &[T], k_s: &[T]) -> Vec<T> {
    let n = x.n_rows();
    let root_k: Vec<T> = k_r.iter().map(|k| k.sqrt()).collect();
    let mut sym = vec![T::zero(); n * n];

    for i in 0..n {
        let row_i = x.row(i);
        for j in i..n {
            let shared = row_i
                .iter()
                .zip(x.row(j))
                .zip(k_s)
                .fold(T::zero(), |acc, ((&a, &b), &k)| acc + a * b / k);
            let val = shared / (root_k[i] * root_k[j]);
            sym[i * n + j] = val;
            sym[j * n + i] = val;
        }
    }
    sym
}
