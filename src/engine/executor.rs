//! Execution engine for a single complexity computation.
//!
//! ## Purpose
//!
//! This module runs the estimator chain for one activity matrix (one year of
//! one dataset): location quotients, RCA binarisation, degeneracy filtering,
//! then each requested metric.
//!
//! ## Design notes
//!
//! * **Inputs**: ECI/PCI and Fitness each read either the RCA matrix or the
//!   raw matrix (`MatrixInput`). Each input is built and filtered at most once.
//! * **Region size**: the `Mean` and `Correlation` sign statistics orient
//!   ECI/PCI against the raw activity totals of the surviving rows or columns,
//!   whatever matrix the scores are computed on. `Sum` uses the estimator input.
//! * **Strict**: The first failing metric aborts the computation; the batch
//!   layer decides whether to skip.
//! * **Generics**: Generic over `EigenLinalg` float types.
//!
//! ## Key concepts
//!
//! * **Execution chain**: `X -> LQ -> RCA -> filter -> {ECI, Fitness+}`.
//!
//! ## Invariants
//!
//! * Results come back in the order of `config.metrics`.
//! * The input matrix is never modified.
//!
//! ## Non-goals
//!
//! * This module does not validate configuration (handled by `validator`).
//! * This module does not pivot long-format data or tag output rows.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// External dependencies
use tracing::debug;

// Internal dependencies
use crate::algorithms::degeneracy::DegeneracyFilter;
use crate::algorithms::eci::{Eci, SignStatistic};
use crate::algorithms::fitness::Fitness;
use crate::algorithms::location_quotient::LocationQuotient;
use crate::math::linalg::EigenLinalg;
use crate::primitives::errors::ComplexityError;
use crate::primitives::index::{ComplexityIndex, Metric};
use crate::primitives::matrix::{ActivityMatrix, Axis};

// ============================================================================
// Matrix Input
// ============================================================================

/// Which matrix an estimator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixInput {
    /// Binarised location quotients.
    #[default]
    Rca,

    /// Activity values as given.
    Raw,
}

// ============================================================================
// Configuration
// ============================================================================

/// Resolved configuration for one computation.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexityConfig<T> {
    /// Fitness iterations.
    pub n_iters: usize,

    /// RCA threshold.
    pub threshold: T,

    /// Fitness+ size-bias correction.
    pub correction: bool,

    /// ECI sign orientation.
    pub sign_correction: Option<SignStatistic>,

    /// Metrics to compute, in output order.
    pub metrics: Vec<Metric>,

    /// Matrix read by ECI and PCI.
    pub eci_input: MatrixInput,

    /// Matrix read by Fitness and Fitness+.
    pub fitness_input: MatrixInput,
}

impl<T: EigenLinalg> ComplexityConfig<T> {
    fn input_for(&self, metric: Metric) -> MatrixInput {
        match metric {
            Metric::Eci | Metric::Pci => self.eci_input,
            Metric::Fitness | Metric::FitnessPlus => self.fitness_input,
        }
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Runs the estimator chain on one matrix.
pub struct ComplexityExecutor;

impl ComplexityExecutor {
    /// Compute every configured metric for `x`.
    pub fn run<T: EigenLinalg>(
        x: &ActivityMatrix<T>,
        config: &ComplexityConfig<T>,
    ) -> Result<Vec<ComplexityIndex<T>>, ComplexityError> {
        let uses = |input: MatrixInput| config.metrics.iter().any(|&m| config.input_for(m) == input);

        // Build each input once
        let rca = uses(MatrixInput::Rca).then(|| {
            let rca = LocationQuotient::new().threshold(config.threshold).rca(x);
            DegeneracyFilter::filter(&rca)
        });
        let raw = uses(MatrixInput::Raw).then(|| DegeneracyFilter::filter(x));

        if let Some(m) = &rca {
            debug!(rows = m.n_rows(), cols = m.n_cols(), "RCA matrix ready");
        }
        if let Some(m) = &raw {
            debug!(rows = m.n_rows(), cols = m.n_cols(), "Raw matrix ready");
        }

        let eci = Eci::new().sign_correction(config.sign_correction);
        let raw_oriented = matches!(
            config.sign_correction,
            Some(SignStatistic::Mean | SignStatistic::Correlation)
        );
        let mut out = Vec::with_capacity(config.metrics.len());

        for &metric in &config.metrics {
            let input = match config.input_for(metric) {
                MatrixInput::Rca => rca.as_ref(),
                MatrixInput::Raw => raw.as_ref(),
            }
            .ok_or(ComplexityError::EmptyInput)?;

            let index = match metric {
                Metric::Eci if raw_oriented => {
                    eci.compute_with_sizes(input, &raw_sizes(x, input.row_labels(), Axis::Row))?
                }
                Metric::Pci if raw_oriented => {
                    eci.product_complexity_with_sizes(input, &raw_sizes(x, input.col_labels(), Axis::Column))?
                }
                Metric::Eci => eci.compute(input)?,
                Metric::Pci => eci.product_complexity(input)?,
                Metric::Fitness => Fitness::plain(config.n_iters).compute(input)?,
                Metric::FitnessPlus => Fitness::plus(config.n_iters)
                    .correction(config.correction)
                    .compute(input)?,
            };
            out.push(index);
        }

        Ok(out)
    }
}

/// Totals of `x` along `axis` for each of `labels`, in the order of `labels`.
fn raw_sizes<T: EigenLinalg>(x: &ActivityMatrix<T>, labels: &[String], axis: Axis) -> Vec<T> {
    let sums = match axis {
        Axis::Row => x.row_sums(),
        Axis::Column => x.col_sums(),
    };
    labels
        .iter()
        .filter_map(|label| match axis {
            Axis::Row => x.row_index(label),
            Axis::Column => x.col_index(label),
        })
        .map(|i| sums[i])
        .collect()
}
