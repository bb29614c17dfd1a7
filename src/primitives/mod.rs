//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the data structures shared by every other layer:
//! - The labelled `ActivityMatrix`
//! - Long-format `ActivityRecord` observations
//! - The `ComplexityIndex` score table
//! - The `ComplexityError` taxonomy
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Error types.
pub mod errors;

/// Region-by-sector activity matrix.
pub mod matrix;

/// Long-format observations.
pub mod records;

/// Per-entity complexity scores.
pub mod index;
