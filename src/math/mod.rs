//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used by the estimators:
//! - Symmetric eigen-decomposition (nalgebra bridge)
//! - Normalisation means and correlation
//!
//! These are reusable mathematical building blocks with no estimator-specific logic.
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
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Eigen-solver bridge.
pub mod linalg;

/// Means and correlation.
pub mod stats;
