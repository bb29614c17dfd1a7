//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer orchestrates a single computation:
//! - Parameter and record validation
//! - The estimator chain for one activity matrix
//! - The long-format output table
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Pipeline
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Single-matrix execution.
pub mod executor;

/// Output table.
pub mod output;

/// Validation.
pub mod validator;
