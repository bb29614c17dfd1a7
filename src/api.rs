//! High-level API for complexity estimation.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point for the batch
//! pipeline. It implements a fluent builder for configuring the estimators
//! and the dataset metadata attached to every output row.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Validated**: Parameters are validated when `.build()` is called.
//! * **Explicit**: No global configuration; everything is a builder parameter.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ## Key concepts
//!
//! ### Configuration Flow
//!
//! 1. Create a [`ComplexityBuilder`] via `Complexity::new()`.
//! 2. Chain configuration methods (`.n_iters()`, `.threshold()`, etc.).
//! 3. Call `.build()` to get a validated [`ComplexityPipeline`].

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};
#[cfg(feature = "std")]
use std::vec::Vec;

use core::fmt::Debug;

// Internal dependencies
use crate::engine::executor::ComplexityConfig;
use crate::engine::validator::Validator;
use crate::math::linalg::EigenLinalg;

// Publicly re-exported types
pub use crate::algorithms::degeneracy::{DegeneracyFilter, FilterOutcome};
pub use crate::algorithms::diversity::{Diversity, DiversityRow, DiversityTable};
pub use crate::algorithms::eci::{Eci, SignStatistic};
pub use crate::algorithms::fitness::{Fitness, FitnessVariant};
pub use crate::algorithms::location_quotient::LocationQuotient;
pub use crate::engine::executor::MatrixInput;
pub use crate::engine::output::{ComplexityRecord, ComplexityTable, SkippedYear};
pub use crate::math::stats::NormMean;
pub use crate::pipeline::batch::ComplexityPipeline;
pub use crate::pipeline::pivot::{Aggregation, pivot, years};
pub use crate::pipeline::segments::SegmentMap;
pub use crate::primitives::errors::ComplexityError;
pub use crate::primitives::index::{ComplexityIndex, Metric};
pub use crate::primitives::matrix::{ActivityMatrix, Axis};
pub use crate::primitives::records::ActivityRecord;

/// Fluent builder for the complexity pipeline.
#[derive(Debug, Clone)]
pub struct ComplexityBuilder<T: EigenLinalg + Debug + Send + Sync> {
    /// Fitness iterations (default: 200).
    pub n_iters: Option<usize>,

    /// RCA threshold (default: 1).
    pub threshold: Option<T>,

    /// Fitness+ size-bias correction (default: true).
    pub correction: Option<bool>,

    /// ECI sign orientation (default: `Some(Sum)`).
    pub sign_correction: Option<Option<SignStatistic>>,

    /// Metrics to compute (default: ECI and Fitness+).
    pub metrics: Option<Vec<Metric>>,

    /// Matrix read by ECI/PCI (default: RCA).
    pub eci_input: Option<MatrixInput>,

    /// Matrix read by Fitness/Fitness+ (default: RCA).
    pub fitness_input: Option<MatrixInput>,

    /// Sector → segment lookup.
    pub segments: Option<SegmentMap>,

    /// Drop sectors missing from the lookup instead of failing (default: false).
    pub drop_unmapped: Option<bool>,

    /// Combination of duplicate records when pivoting (default: Sum).
    pub aggregation: Option<Aggregation>,

    /// Dataset name attached to output rows.
    pub source: Option<String>,

    /// Sector granularity attached to output rows.
    pub sector_type: Option<String>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: EigenLinalg + Debug + Send + Sync> Default for ComplexityBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: EigenLinalg + Debug + Send + Sync> ComplexityBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            n_iters: None,
            threshold: None,
            correction: None,
            sign_correction: None,
            metrics: None,
            eci_input: None,
            fitness_input: None,
            segments: None,
            drop_unmapped: None,
            aggregation: None,
            source: None,
            sector_type: None,
            duplicate_param: None,
        }
    }

    /// Set the number of Fitness iterations.
    ///
    /// Results are not checked for convergence; ~200 is typical.
    pub fn n_iters(mut self, n_iters: usize) -> Self {
        if self.n_iters.is_some() {
            self.duplicate_param = Some("n_iters");
        }
        self.n_iters = Some(n_iters);
        self
    }

    /// Set the RCA threshold.
    pub fn threshold(mut self, threshold: T) -> Self {
        if self.threshold.is_some() {
            self.duplicate_param = Some("threshold");
        }
        self.threshold = Some(threshold);
        self
    }

    /// Enable or disable the Fitness+ size-bias correction.
    pub fn correction(mut self, correction: bool) -> Self {
        if self.correction.is_some() {
            self.duplicate_param = Some("correction");
        }
        self.correction = Some(correction);
        self
    }

    /// Set the ECI sign statistic.
    pub fn sign_statistic(mut self, statistic: SignStatistic) -> Self {
        if self.sign_correction.is_some() {
            self.duplicate_param = Some("sign_correction");
        }
        self.sign_correction = Some(Some(statistic));
        self
    }

    /// Keep the solver's eigenvector sign.
    pub fn no_sign_correction(mut self) -> Self {
        if self.sign_correction.is_some() {
            self.duplicate_param = Some("sign_correction");
        }
        self.sign_correction = Some(None);
        self
    }

    /// Set the metrics to compute, in output order.
    pub fn metrics(mut self, metrics: &[Metric]) -> Self {
        if self.metrics.is_some() {
            self.duplicate_param = Some("metrics");
        }
        self.metrics = Some(metrics.to_vec());
        self
    }

    /// Set the matrix read by ECI and PCI.
    pub fn eci_input(mut self, input: MatrixInput) -> Self {
        if self.eci_input.is_some() {
            self.duplicate_param = Some("eci_input");
        }
        self.eci_input = Some(input);
        self
    }

    /// Set the matrix read by Fitness and Fitness+.
    pub fn fitness_input(mut self, input: MatrixInput) -> Self {
        if self.fitness_input.is_some() {
            self.duplicate_param = Some("fitness_input");
        }
        self.fitness_input = Some(input);
        self
    }

    /// Regroup sectors into segments before computing.
    pub fn segments(mut self, segments: SegmentMap) -> Self {
        if self.segments.is_some() {
            self.duplicate_param = Some("segments");
        }
        self.segments = Some(segments);
        self
    }

    /// Drop sectors missing from the segment lookup instead of failing.
    pub fn drop_unmapped(mut self) -> Self {
        self.drop_unmapped = Some(true);
        self
    }

    /// Set how duplicate records are combined when pivoting.
    pub fn aggregation(mut self, aggregation: Aggregation) -> Self {
        if self.aggregation.is_some() {
            self.duplicate_param = Some("aggregation");
        }
        self.aggregation = Some(aggregation);
        self
    }

    /// Set the dataset name attached to output rows.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        if self.source.is_some() {
            self.duplicate_param = Some("source");
        }
        self.source = Some(source.into());
        self
    }

    /// Set the sector granularity attached to output rows.
    pub fn sector_type(mut self, sector_type: impl Into<String>) -> Self {
        if self.sector_type.is_some() {
            self.duplicate_param = Some("sector_type");
        }
        self.sector_type = Some(sector_type.into());
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Validate the configuration and build the pipeline.
    pub fn build(self) -> Result<ComplexityPipeline<T>, ComplexityError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let n_iters = self.n_iters.unwrap_or(Fitness::DEFAULT_ITERATIONS);
        Validator::validate_iterations(n_iters)?;

        let threshold = self.threshold.unwrap_or_else(T::one);
        Validator::validate_threshold(threshold)?;

        let metrics = self
            .metrics
            .unwrap_or_else(|| vec![Metric::Eci, Metric::FitnessPlus]);
        Validator::validate_metrics(&metrics)?;

        let config = ComplexityConfig {
            n_iters,
            threshold,
            correction: self.correction.unwrap_or(true),
            sign_correction: self.sign_correction.unwrap_or(Some(SignStatistic::Sum)),
            metrics,
            eci_input: self.eci_input.unwrap_or_default(),
            fitness_input: self.fitness_input.unwrap_or_default(),
        };

        let sector_type = self.sector_type.unwrap_or_else(|| match self.segments {
            Some(_) => String::from("segment"),
            None => String::from("sector"),
        });

        Ok(ComplexityPipeline {
            config,
            segments: self.segments,
            drop_unmapped: self.drop_unmapped.unwrap_or(false),
            aggregation: self.aggregation.unwrap_or_default(),
            source: self.source.unwrap_or_default(),
            sector_type,
        })
    }
}
