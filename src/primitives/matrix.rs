//! Labelled region-by-sector activity matrix.
//!
//! ## Purpose
//!
//! This module defines `ActivityMatrix`, the dense table every estimator in
//! the crate consumes and produces. Rows are regions, columns are sectors,
//! and cells hold a non-negative activity measure (employment, funding,
//! patent counts, ...).
//!
//! ## Design notes
//!
//! * **Storage**: Row-major `Vec<T>` with separate row and column label vectors.
//! * **Immutability**: Transformations (selection, transpose, scaling) return
//!   a new matrix and leave the source untouched.
//! * **Binary tag**: `is_binary` is fixed at construction and replaces runtime
//!   dtype inspection when choosing normalisation means.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * `data.len() == rows.len() * cols.len()`.
//! * Row labels are unique; column labels are unique.
//! * All values are finite and >= 0; absent pairs are stored as 0.
//! * A binary matrix holds only 0 and 1.
//! * Label order is preserved by every transformation.
//!
//! ## Non-goals
//!
//! * This module does not parse or pivot long-format data (see `pipeline::pivot`).
//! * This module does not provide sparse storage.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{
    collections::BTreeSet,
    format,
    string::{String, ToString},
    vec::Vec,
};
#[cfg(feature = "std")]
use std::collections::BTreeSet;

// External dependencies
use core::fmt;
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::ComplexityError;

// ============================================================================
// Axis
// ============================================================================

/// Matrix axis, used to report where a problem was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Regions.
    Row,

    /// Sectors.
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

// ============================================================================
// Activity Matrix
// ============================================================================

/// Dense, labelled, non-negative region-by-sector matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityMatrix<T> {
    rows: Vec<String>,
    cols: Vec<String>,
    data: Vec<T>,
    is_binary: bool,
}

impl<T: Float> ActivityMatrix<T> {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Build a matrix from labels and a row-major data buffer.
    pub fn new(rows: Vec<String>, cols: Vec<String>, data: Vec<T>) -> Result<Self, ComplexityError> {
        Self::validated(rows, cols, data, false)
    }

    /// Build a 0/1 matrix (e.g. a precomputed RCA matrix).
    ///
    /// Fitness+ normalises a binary matrix by its arithmetic mean instead of
    /// the geometric mean.
    pub fn new_binary(
        rows: Vec<String>,
        cols: Vec<String>,
        data: Vec<T>,
    ) -> Result<Self, ComplexityError> {
        Self::validated(rows, cols, data, true)
    }

    /// Build a matrix from one `Vec` per region.
    pub fn from_rows(
        rows: Vec<String>,
        cols: Vec<String>,
        values: Vec<Vec<T>>,
    ) -> Result<Self, ComplexityError> {
        let n_cols = cols.len();
        if values.len() != rows.len() || values.iter().any(|r| r.len() != n_cols) {
            return Err(ComplexityError::DimensionMismatch {
                rows: rows.len(),
                cols: n_cols,
                len: values.iter().map(Vec::len).sum(),
            });
        }
        let data = values.into_iter().flatten().collect();
        Self::new(rows, cols, data)
    }

    /// Assemble a matrix whose invariants the caller already guarantees.
    pub(crate) fn from_parts(rows: Vec<String>, cols: Vec<String>, data: Vec<T>, is_binary: bool) -> Self {
        debug_assert_eq!(data.len(), rows.len() * cols.len());
        Self {
            rows,
            cols,
            data,
            is_binary,
        }
    }

    fn validated(
        rows: Vec<String>,
        cols: Vec<String>,
        data: Vec<T>,
        is_binary: bool,
    ) -> Result<Self, ComplexityError> {
        // Check 1: Non-empty
        if rows.is_empty() || cols.is_empty() {
            return Err(ComplexityError::EmptyInput);
        }

        // Check 2: Shape
        if data.len() != rows.len() * cols.len() {
            return Err(ComplexityError::DimensionMismatch {
                rows: rows.len(),
                cols: cols.len(),
                len: data.len(),
            });
        }

        // Check 3: Unique labels
        check_unique(&rows, Axis::Row)?;
        check_unique(&cols, Axis::Column)?;

        // Check 4: Finite, non-negative (and 0/1 when binary)
        let n_cols = cols.len();
        for (i, &val) in data.iter().enumerate() {
            let (r, c) = (i / n_cols, i % n_cols);
            if !val.is_finite() {
                return Err(ComplexityError::InvalidNumericValue(format!(
                    "({}, {})={}",
                    rows[r],
                    cols[c],
                    val.to_f64().unwrap_or(f64::NAN)
                )));
            }
            if val < T::zero() {
                return Err(ComplexityError::NegativeValue {
                    row: rows[r].clone(),
                    col: cols[c].clone(),
                    value: val.to_f64().unwrap_or(f64::NAN),
                });
            }
            if is_binary && val != T::zero() && val != T::one() {
                return Err(ComplexityError::InvalidNumericValue(format!(
                    "binary matrix holds ({}, {})={}",
                    rows[r],
                    cols[c],
                    val.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        Ok(Self {
            rows,
            cols,
            data,
            is_binary,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of regions.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of sectors.
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.cols.len()
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.cols.len())
    }

    /// True when the matrix has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Region labels in row order.
    pub fn row_labels(&self) -> &[String] {
        &self.rows
    }

    /// Sector labels in column order.
    pub fn col_labels(&self) -> &[String] {
        &self.cols
    }

    /// Row-major values.
    pub fn values(&self) -> &[T] {
        &self.data
    }

    /// Whether the matrix was built as a 0/1 matrix.
    pub fn is_binary(&self) -> bool {
        self.is_binary
    }

    /// Value at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols.len() + col]
    }

    /// Values of one region.
    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        let n = self.cols.len();
        &self.data[row * n..(row + 1) * n]
    }

    /// Position of a region label.
    pub fn row_index(&self, label: &str) -> Option<usize> {
        self.rows.iter().position(|r| r == label)
    }

    /// Position of a sector label.
    pub fn col_index(&self, label: &str) -> Option<usize> {
        self.cols.iter().position(|c| c == label)
    }

    // ========================================================================
    // Marginals
    // ========================================================================

    /// Total activity per region.
    pub fn row_sums(&self) -> Vec<T> {
        (0..self.n_rows())
            .map(|r| self.row(r).iter().fold(T::zero(), |acc, &v| acc + v))
            .collect()
    }

    /// Total activity per sector.
    pub fn col_sums(&self) -> Vec<T> {
        let mut sums = vec![T::zero(); self.n_cols()];
        for r in 0..self.n_rows() {
            for (s, &v) in sums.iter_mut().zip(self.row(r)) {
                *s = *s + v;
            }
        }
        sums
    }

    /// Grand total activity.
    pub fn total(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, &v| acc + v)
    }

    // ========================================================================
    // Transformations
    // ========================================================================

    /// Keep the rows and columns whose mask entry is `true`.
    pub fn select(&self, keep_rows: &[bool], keep_cols: &[bool]) -> Self {
        let rows: Vec<String> = self
            .rows
            .iter()
            .zip(keep_rows)
            .filter_map(|(l, &k)| k.then(|| l.clone()))
            .collect();
        let cols: Vec<String> = self
            .cols
            .iter()
            .zip(keep_cols)
            .filter_map(|(l, &k)| k.then(|| l.clone()))
            .collect();

        let mut data = Vec::with_capacity(rows.len() * cols.len());
        for r in (0..self.n_rows()).filter(|&r| keep_rows[r]) {
            data.extend(
                self.row(r)
                    .iter()
                    .zip(keep_cols)
                    .filter_map(|(&v, &k)| k.then_some(v)),
            );
        }

        Self::from_parts(rows, cols, data, self.is_binary)
    }

    /// Swap regions and sectors.
    pub fn transpose(&self) -> Self {
        let (n_rows, n_cols) = self.shape();
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..n_cols {
            data.extend((0..n_rows).map(|r| self.get(r, c)));
        }
        Self::from_parts(self.cols.clone(), self.rows.clone(), data, self.is_binary)
    }

    /// Multiply every cell by a positive factor.
    ///
    /// The result is never tagged binary.
    pub fn scale(&self, factor: T) -> Result<Self, ComplexityError> {
        if !factor.is_finite() || factor <= T::zero() {
            return Err(ComplexityError::InvalidNumericValue(format!(
                "scale factor={}",
                factor.to_f64().unwrap_or(f64::NAN)
            )));
        }
        let data = self.data.iter().map(|&v| v * factor).collect();
        Ok(Self::from_parts(self.rows.clone(), self.cols.clone(), data, false))
    }

    /// Return an error unless `other` has exactly the same labels in the same order.
    pub fn ensure_aligned<U>(&self, other: &ActivityMatrix<U>) -> Result<(), ComplexityError> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(ComplexityError::ShapeMismatch {
                expected: describe(&self.rows, &self.cols),
                got: describe(&other.rows, &other.cols),
            });
        }
        Ok(())
    }
}

impl<T: Float + fmt::Display> fmt::Display for ActivityMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>12}", "")?;
        for c in &self.cols {
            write!(f, " {:>10}", c)?;
        }
        writeln!(f)?;
        for (r, label) in self.rows.iter().enumerate() {
            write!(f, "{:>12}", label)?;
            for v in self.row(r) {
                write!(f, " {:>10.4}", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn check_unique(labels: &[String], axis: Axis) -> Result<(), ComplexityError> {
    let mut seen = BTreeSet::new();
    for label in labels {
        if !seen.insert(label.as_str()) {
            return Err(ComplexityError::DuplicateLabel {
                axis,
                label: label.to_string(),
            });
        }
    }
    Ok(())
}

fn describe(rows: &[String], cols: &[String]) -> String {
    format!("{}x{} [{}] x [{}]", rows.len(), cols.len(), rows.join(", "), cols.join(", "))
}
