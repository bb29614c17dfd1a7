//! # complexity-rs: Economic Complexity Estimators for Rust
//!
//! Location quotients, revealed comparative advantage, diversity, Fitness,
//! Fitness+ and the Economic Complexity Index (ECI) for region-by-sector
//! activity matrices.
//!
//! ## What is economic complexity?
//!
//! Economic complexity metrics summarise *what* a region does rather than
//! *how much*. Starting from a matrix of activity (employment, business
//! counts, patents, funding) with one row per region and one column per
//! sector, they ask which regions are specialised in which sectors, and how
//! rare those specialisations are.
//!
//! **Estimators:**
//! - **Location quotient (LQ)**: share of a sector in a region divided by its
//!   share in the whole population. LQ > 1 marks specialisation.
//! - **RCA**: the LQ matrix thresholded to 0/1.
//! - **Diversity**: number of active sectors and number of RCA sectors per region.
//! - **Fitness / Fitness+**: fixed-point iteration that rewards regions active
//!   in sectors few other regions manage to be active in.
//! - **ECI / PCI**: second eigenvector of the region-region (or sector-sector)
//!   similarity matrix.
//!
//! ## Quick Start
//!
//! ### Batch Pipeline
//!
//! ```rust
//! use complexity_rs::prelude::*;
//!
//! let records = vec![
//!     ActivityRecord::new("UKC1", "10.11", 2019, 120.0),
//!     ActivityRecord::new("UKC1", "62.01", 2019, 15.0),
//!     ActivityRecord::new("UKC1", "28.11", 2019, 40.0),
//!     ActivityRecord::new("UKD3", "10.11", 2019, 40.0),
//!     ActivityRecord::new("UKD3", "62.01", 2019, 300.0),
//!     ActivityRecord::new("UKD3", "72.19", 2019, 80.0),
//!     ActivityRecord::new("UKD3", "28.11", 2019, 20.0),
//!     ActivityRecord::new("UKE4", "10.11", 2019, 90.0),
//!     ActivityRecord::new("UKE4", "62.01", 2019, 60.0),
//!     ActivityRecord::new("UKE4", "72.19", 2019, 60.0),
//!     ActivityRecord::new("UKE4", "28.11", 2019, 70.0),
//!     ActivityRecord::new("UKF1", "10.11", 2019, 110.0),
//!     ActivityRecord::new("UKF1", "62.01", 2019, 20.0),
//!     ActivityRecord::new("UKF1", "72.19", 2019, 5.0),
//!     ActivityRecord::new("UKF1", "28.11", 2019, 150.0),
//! ];
//!
//! // Build the pipeline
//! let pipeline = Complexity::new()
//!     .n_iters(200)                            // Fitness+ iterations
//!     .metrics(&[Metric::Eci, Metric::FitnessPlus])
//!     .source("bres")                          // Tag output rows
//!     .sector_type("SIC4")
//!     .build()?;
//!
//! // Compute every year in the records
//! let table = pipeline.run(&records)?;
//!
//! println!("{}", table);
//! # Result::<(), ComplexityError>::Ok(())
//! ```
//!
//! ```text
//! Summary:
//!   Rows: 8
//!   Years: 1
//!
//!      region_id   year   metric          value    sector_type     source
//!   ----------------------------------------------------------------------
//!           UKC1   2019      eci      -0.447249           SIC4       bres
//!           UKD3   2019      eci       0.791021           SIC4       bres
//!           UKE4   2019      eci      -0.109766           SIC4       bres
//!           UKF1   2019      eci      -0.402748           SIC4       bres
//!           UKC1   2019    fit_p     -11.920502           SIC4       bres
//!           UKD3   2019    fit_p       0.973225           SIC4       bres
//!           UKE4   2019    fit_p      -3.794175           SIC4       bres
//!           UKF1   2019    fit_p      -7.931653           SIC4       bres
//! ```
//!
//! ### Individual Estimators
//!
//! Every estimator is a small value type and can be used on its own:
//!
//! ```rust
//! use complexity_rs::prelude::*;
//!
//! let x = ActivityMatrix::from_rows(
//!     vec!["A".into(), "B".into(), "C".into()],
//!     vec!["s1".into(), "s2".into(), "s3".into()],
//!     vec![
//!         vec![10.0, 0.0, 0.0],
//!         vec![0.0, 10.0, 0.0],
//!         vec![5.0, 5.0, 5.0],
//!     ],
//! )?;
//!
//! let lq = LocationQuotient::new().compute(&x);
//! assert!(lq.get(0, 0) > 1.0);
//!
//! let diversity = Diversity::new().compute(&x);
//! assert_eq!(diversity.get("C").map(|r| r.active_count), Some(3));
//!
//! let fitness = Fitness::plus(200).compute(&x)?;
//! let eci = Eci::new().compute(&x)?;
//! println!("{}\n{}", fitness, eci);
//! # Result::<(), ComplexityError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! Estimators and the pipeline return `Result<_, ComplexityError>`.
//! Fitness and ECI are strict: a matrix with a zero row or column sum is
//! rejected with `DegenerateInput` instead of producing NaN scores. Remove
//! such rows and columns first with [`DegeneracyFilter`](prelude::DegeneracyFilter):
//!
//! ```rust
//! use complexity_rs::prelude::*;
//!
//! let x = ActivityMatrix::from_rows(
//!     vec!["A".into(), "B".into()],
//!     vec!["s1".into(), "s2".into(), "s3".into()],
//!     vec![vec![3.0, 1.0, 0.0], vec![1.0, 4.0, 0.0]],
//! )?;
//!
//! assert!(matches!(
//!     Eci::new().compute(&x),
//!     Err(ComplexityError::DegenerateInput { .. })
//! ));
//!
//! let outcome = DegeneracyFilter::apply(&x);
//! assert_eq!(outcome.dropped_cols, vec!["s3".to_string()]);
//! let eci = Eci::new().compute(&outcome.matrix)?;
//! assert_eq!(eci.len(), 2);
//! # Result::<(), ComplexityError>::Ok(())
//! ```
//!
//! The batch pipeline is lenient at year granularity: a year that fails is
//! logged at warn level, recorded in `ComplexityTable::skipped`, and the
//! remaining years are still computed.
//!
//! ## Parameters
//!
//! | Parameter          | Default              | Range/Options                   | Description                                 |
//! |--------------------|----------------------|---------------------------------|---------------------------------------------|
//! | **n_iters**        | 200                  | [1, 100000]                     | Fitness iterations (no convergence check)   |
//! | **threshold**      | 1.0                  | [0, ∞)                          | RCA threshold on the location quotient      |
//! | **correction**     | true                 | true/false                      | Fitness+ size-bias correction               |
//! | **sign_statistic** | `Sum`                | `Sum`, `Mean`, `Correlation`    | ECI orientation heuristic                   |
//! | **metrics**        | `[Eci, FitnessPlus]` | `Eci`, `Pci`, `Fitness`, `FitnessPlus` | Metrics to compute, in output order  |
//! | **eci_input**      | `Rca`                | `Rca`, `Raw`                    | Matrix read by ECI/PCI                      |
//! | **fitness_input**  | `Rca`                | `Rca`, `Raw`                    | Matrix read by Fitness/Fitness+             |
//! | **segments**       | None                 | `SegmentMap`                    | Sector → segment regrouping                 |
//! | **drop_unmapped**  | false                | true/false                      | Drop sectors missing from the segment map   |
//! | **aggregation**    | `Sum`                | `Sum`, `Mean`                   | Combination of duplicate records            |
//!
//! Setting the same parameter twice is rejected by `build()`.
//!
//! ## Minimal Usage (no_std)
//!
//! ```toml
//! [dependencies]
//! complexity-rs = { version = "0.3", default-features = false }
//! ```
//!
//! ## References
//!
//! - Hidalgo, C. A. & Hausmann, R. (2009). "The building blocks of economic complexity"
//! - Tacchella, A. et al. (2012). "A New Metrics for Countries' Fitness and Products' Complexity"
//! - Mealy, P., Farmer, J. D. & Teytelboym, A. (2019). "Interpreting economic complexity"

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures.
//
// Contains the activity matrix, long-format records, score tables and the
// error taxonomy.
mod primitives;

// Layer 2: Math - pure mathematical functions.
//
// Contains the nalgebra eigen-solver bridge and normalisation means.
mod math;

// Layer 3: Algorithms - complexity estimators.
//
// Contains location quotients, degeneracy filtering, diversity, Fitness and ECI.
mod algorithms;

// Layer 4: Engine - orchestration of one computation.
//
// Contains validation, the per-matrix estimator chain and the output table.
mod engine;

// Layer 5: Pipeline - batch processing of long-format data.
//
// Contains pivoting, segment regrouping and the per-year batch runner.
mod pipeline;

// High-level fluent API.
//
// Provides the `Complexity` builder for configuring the batch pipeline.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard complexity prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use complexity_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        ActivityMatrix, ActivityRecord, Aggregation, Axis, ComplexityBuilder as Complexity,
        ComplexityError, ComplexityIndex, ComplexityPipeline, ComplexityRecord, ComplexityTable,
        DegeneracyFilter, Diversity, DiversityRow, DiversityTable, Eci, FilterOutcome, Fitness,
        FitnessVariant, LocationQuotient, MatrixInput, Metric, NormMean, SegmentMap,
        SignStatistic, SkippedYear, pivot, years,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal estimators.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal batch pipeline.
    pub mod pipeline {
        pub use crate::pipeline::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
