//! Layer 5: Pipeline
//!
//! # Purpose
//!
//! This layer turns long-format activity records into tagged complexity
//! tables:
//! - Pivoting records into one matrix per year
//! - Regrouping sectors into segments
//! - Running years independently, skipping failures
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Pipeline ← You are here
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Per-year batch execution.
pub mod batch;

/// Long-to-wide pivoting.
pub mod pivot;

/// Sector → segment regrouping.
pub mod segments;
