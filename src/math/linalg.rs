//! Linear algebra backend abstraction for complexity estimation.
//!
//! ## Purpose
//!
//! This module provides a trait-based abstraction over the eigen-solver used
//! by the ECI estimator, standardizing on the nalgebra backend.
//!
//! ## Design notes
//!
//! * Only symmetric problems are handed to the solver. The ECI transition
//!   matrix is similar to a symmetric matrix, so the estimator symmetrises it
//!   first and maps eigenvectors back.
//! * Uses nalgebra's `SymmetricEigen` (implicit QR with Wilkinson shifts).
//! * Generic over `EigenLinalg` types (f32 and f64) which delegate to nalgebra.
//! * Buffers are column-major, matching nalgebra's storage.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

// ============================================================================
// EigenLinalg Trait
// ============================================================================

/// Helper trait to bridge generic Float types to the nalgebra eigen-solver.
pub trait EigenLinalg: Float + 'static {
    /// Eigen-decompose a symmetric `n x n` matrix given in column-major order.
    ///
    /// Returns `(eigenvalues, eigenvectors)` where column `i` of the
    /// column-major eigenvector buffer belongs to eigenvalue `i`. Eigenvalues
    /// are not sorted. Returns `None` if the solver does not converge.
    fn symmetric_eigen(a: &[Self], n: usize) -> Option<(Vec<Self>, Vec<Self>)>;
}

impl EigenLinalg for f64 {
    #[inline]
    fn symmetric_eigen(a: &[Self], n: usize) -> Option<(Vec<Self>, Vec<Self>)> {
        nalgebra_backend::symmetric_eigen_f64(a, n)
    }
}

impl EigenLinalg for f32 {
    #[inline]
    fn symmetric_eigen(a: &[Self], n: usize) -> Option<(Vec<Self>, Vec<Self>)> {
        nalgebra_backend::symmetric_eigen_f32(a, n)
    }
}

// ============================================================================
// Ranked Eigenvectors
// ============================================================================

/// Eigenvector belonging to the `rank`-th largest eigenvalue (0-based) of a
/// symmetric column-major matrix.
///
/// Returns `None` if the solver fails or `rank >= n`.
pub fn ranked_eigenvector<T: EigenLinalg>(a: &[T], n: usize, rank: usize) -> Option<Vec<T>> {
    if rank >= n {
        return None;
    }
    let (values, vectors) = T::symmetric_eigen(a, n)?;

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| values[j].partial_cmp(&values[i]).unwrap_or(Equal));

    let col = order[rank];
    Some(vectors[col * n..(col + 1) * n].to_vec())
}

// ============================================================================
// Nalgebra Backend Implementation
// ============================================================================

/// Nalgebra-based linear algebra operations.
pub mod nalgebra_backend {
    use super::*;
    use nalgebra::{DMatrix, SymmetricEigen};

    /// Upper bound on QR sweeps before the solver gives up.
    const MAX_SWEEPS: usize = 10_000;

    /// Symmetric eigen-decomposition using f64 precision.
    pub fn symmetric_eigen_f64(a: &[f64], n: usize) -> Option<(Vec<f64>, Vec<f64>)> {
        let matrix = DMatrix::from_column_slice(n, n, a);
        let eigen = SymmetricEigen::try_new(matrix, f64::EPSILON, MAX_SWEEPS)?;
        Some((
            eigen.eigenvalues.as_slice().to_vec(),
            eigen.eigenvectors.as_slice().to_vec(),
        ))
    }

    /// Symmetric eigen-decomposition using f32 precision.
    pub fn symmetric_eigen_f32(a: &[f32], n: usize) -> Option<(Vec<f32>, Vec<f32>)> {
        let matrix = DMatrix::from_column_slice(n, n, a);
        let eigen = SymmetricEigen::try_new(matrix, f32::EPSILON, MAX_SWEEPS)?;
        Some((
            eigen.eigenvalues.as_slice().to_vec(),
            eigen.eigenvectors.as_slice().to_vec(),
        ))
    }
}
