//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer contains the complexity estimators:
//! - Location quotients and RCA binarisation
//! - Degenerate row/column removal
//! - Diversity counts
//! - Fitness and Fitness+
//! - ECI and PCI
//!
//! Every estimator is a pure function of its input matrix.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Pipeline
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::ComplexityError;

/// Location quotients and RCA.
pub mod location_quotient;

/// Zero row/column removal.
pub mod degeneracy;

/// Diversity counts.
pub mod diversity;

/// Fitness and Fitness+.
pub mod fitness;

/// Economic and product complexity indices.
pub mod eci;

/// Fail with `NonFinite` if any value is NaN or Inf.
#[inline]
pub(crate) fn ensure_finite<T: Float>(vals: &[T], stage: &'static str) -> Result<(), ComplexityError> {
    if vals.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ComplexityError::NonFinite { stage })
    }
}
