//! Tests for the Economic and Product Complexity Indices.
//!
//! These tests verify:
//! - Reference values on small matrices
//! - Unit length and orthogonality to region size
//! - Determinism and invariance to row permutation
//! - Each sign statistic orients scores towards larger regions
//! - Rejection of degenerate and undersized input
//!
//! ## Test Organization
//!
//! 1. **Reference Values** - Two- and three-region matrices
//! 2. **Properties** - Norm, orthogonality, permutation invariance
//! 3. **Sign Correction** - Sum, Mean, Correlation, disabled
//! 4. **Product Complexity** - Sector scores on the transpose
//! 5. **Errors** - Degenerate input, too few regions, non-finite values

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use complexity_rs::prelude::*;

fn labels(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{}{}", prefix, i)).collect()
}

fn random_matrix(seed: u64, n_rows: usize, n_cols: usize) -> ActivityMatrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let values = (0..n_rows)
        .map(|_| (0..n_cols).map(|_| rng.random_range(1.0..500.0)).collect())
        .collect();
    ActivityMatrix::from_rows(labels("r", n_rows), labels("s", n_cols), values).unwrap()
}

fn two_by_two() -> ActivityMatrix<f64> {
    ActivityMatrix::from_rows(
        vec!["A".into(), "B".into()],
        vec!["s1".into(), "s2".into()],
        vec![vec![3.0, 1.0], vec![1.0, 4.0]],
    )
    .unwrap()
}

// ============================================================================
// Reference Value Tests
// ============================================================================

/// Test ECI of a two-region matrix.
#[test]
fn test_eci_two_regions() {
    let eci = Eci::new().compute(&two_by_two()).unwrap();

    assert_eq!(eci.metric(), Metric::Eci);
    assert_eq!(eci.labels(), &["A", "B"]);
    // B is larger (5 vs 4) and ends up on top
    assert_relative_eq!(eci.scores()[0], -0.7808688094430304, epsilon = 1e-10);
    assert_relative_eq!(eci.scores()[1], 0.6246950475544242, epsilon = 1e-10);
}

/// Test that two mirror-image specialists get opposite scores and the
/// evenly spread region sits at zero.
#[test]
fn test_eci_mirror_regions() {
    let x: ActivityMatrix<f64> = ActivityMatrix::from_rows(
        vec!["A".into(), "B".into(), "C".into()],
        vec!["s1".into(), "s2".into(), "s3".into()],
        vec![
            vec![10.0, 0.0, 0.0],
            vec![0.0, 10.0, 0.0],
            vec![5.0, 5.0, 5.0],
        ],
    )
    .unwrap();
    let eci = Eci::new().compute(&x).unwrap();
    let s = eci.scores();

    // A and B tie on size, so only the magnitude is fixed
    assert_relative_eq!(s[0].abs(), core::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-10);
    assert_relative_eq!(s[0], -s[1], epsilon = 1e-10);
    assert_relative_eq!(s[2], 0.0, epsilon = 1e-10);
}

// ============================================================================
// Property Tests
// ============================================================================

/// Test unit length and `sum_r k_r * eci_r = 0`.
#[test]
fn test_eci_norm_and_orthogonality() {
    for seed in 0..5 {
        let x = random_matrix(seed, 10, 7);
        let eci = Eci::new().compute(&x).unwrap();

        let norm: f64 = eci.scores().iter().map(|v| v * v).sum::<f64>().sqrt();
        assert_relative_eq!(norm, 1.0, epsilon = 1e-10);

        let weighted: f64 = eci
            .scores()
            .iter()
            .zip(x.row_sums())
            .map(|(v, k)| v * k)
            .sum();
        let scale: f64 = x.total();
        assert!(
            (weighted / scale).abs() < 1e-9,
            "weighted sum {} not zero",
            weighted
        );
    }
}

/// Test that repeated runs give identical scores.
#[test]
fn test_eci_deterministic() {
    let x = random_matrix(99, 9, 6);
    let first = Eci::new().compute(&x).unwrap();
    for _ in 0..3 {
        assert_eq!(Eci::new().compute(&x).unwrap(), first);
    }
}

/// Test that shuffling regions permutes the scores with them.
#[test]
fn test_eci_permutation_invariance() {
    let x = random_matrix(7, 12, 8);
    let base = Eci::new().compute(&x).unwrap();

    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..5 {
        let mut order: Vec<usize> = (0..x.n_rows()).collect();
        order.shuffle(&mut rng);

        let rows = order.iter().map(|&i| x.row_labels()[i].clone()).collect();
        let values = order.iter().map(|&i| x.row(i).to_vec()).collect();
        let shuffled = ActivityMatrix::from_rows(rows, x.col_labels().to_vec(), values).unwrap();

        let eci = Eci::new().compute(&shuffled).unwrap();
        assert_eq!(eci.labels(), shuffled.row_labels());
        for (label, score) in eci.iter() {
            let expected = base.get(label).unwrap();
            assert_relative_eq!(score, expected, epsilon = 1e-9);
        }
    }
}

/// Test that scaling the matrix leaves ECI unchanged.
#[test]
fn test_eci_scale_invariance() {
    let x = random_matrix(21, 8, 5);
    let base = Eci::new().compute(&x).unwrap();
    let scaled = Eci::new().compute(&x.scale(1000.0).unwrap()).unwrap();

    for (a, b) in base.scores().iter().zip(scaled.scores()) {
        assert_relative_eq!(*a, *b, epsilon = 1e-9);
    }
}

// ============================================================================
// Sign Correction Tests
// ============================================================================

fn ranked_sizes(eci: &ComplexityIndex<f64>, x: &ActivityMatrix<f64>) -> Vec<f64> {
    let sizes = x.row_sums();
    let mut order: Vec<usize> = (0..eci.len()).collect();
    order.sort_by(|&i, &j| eci.scores()[j].partial_cmp(&eci.scores()[i]).unwrap());
    order.into_iter().map(|i| sizes[i]).collect()
}

/// Test that the top decile is at least as large as the bottom decile.
#[test]
fn test_eci_sign_sum() {
    for seed in 0..10 {
        let x = random_matrix(100 + seed, 25, 6);
        let eci = Eci::new()
            .sign_correction(Some(SignStatistic::Sum))
            .compute(&x)
            .unwrap();

        // 25 regions: deciles of 2
        let sizes = ranked_sizes(&eci, &x);
        let top: f64 = sizes[..2].iter().sum();
        let bottom: f64 = sizes[23..].iter().sum();
        assert!(top >= bottom);
    }
}

/// Test that the five highest-ranked regions are on average at least as
/// large as the five lowest.
#[test]
fn test_eci_sign_mean() {
    for seed in 0..10 {
        let x = random_matrix(200 + seed, 14, 5);
        let eci = Eci::new()
            .sign_correction(Some(SignStatistic::Mean))
            .compute(&x)
            .unwrap();

        let sizes = ranked_sizes(&eci, &x);
        let top: f64 = sizes[..5].iter().sum::<f64>() / 5.0;
        let bottom: f64 = sizes[9..].iter().sum::<f64>() / 5.0;
        assert!(top >= bottom);
    }
}

/// Test that scores are non-negatively correlated with region size.
#[test]
fn test_eci_sign_correlation() {
    for seed in 0..10 {
        let x = random_matrix(300 + seed, 11, 6);
        let eci = Eci::new()
            .sign_correction(Some(SignStatistic::Correlation))
            .compute(&x)
            .unwrap();

        let sizes = x.row_sums();
        let n = sizes.len() as f64;
        let mean_s: f64 = sizes.iter().sum::<f64>() / n;
        let mean_e: f64 = eci.scores().iter().sum::<f64>() / n;
        let cov: f64 = sizes
            .iter()
            .zip(eci.scores())
            .map(|(s, e)| (s - mean_s) * (e - mean_e))
            .sum();
        assert!(cov >= 0.0);
    }
}

/// Test that explicit sizes override the row sums when they disagree.
#[test]
fn test_eci_with_sizes() {
    let x = two_by_two();

    // Row sums put B on top; the supplied sizes favour A
    for statistic in [SignStatistic::Mean, SignStatistic::Correlation] {
        let eci = Eci::new()
            .sign_correction(Some(statistic))
            .compute_with_sizes(&x, &[10.0, 1.0])
            .unwrap();
        assert_eq!(eci.metric(), Metric::Eci);
        assert_relative_eq!(eci.scores()[0], 0.7808688094430304, epsilon = 1e-10);
        assert_relative_eq!(eci.scores()[1], -0.6246950475544242, epsilon = 1e-10);
    }

    // Without sizes the same statistics follow the row sums
    let eci = Eci::new()
        .sign_correction(Some(SignStatistic::Mean))
        .compute(&x)
        .unwrap();
    assert_relative_eq!(eci.scores()[1], 0.6246950475544242, epsilon = 1e-10);
}

/// Test that a tie in mean size flips, while an undefined correlation does not.
#[test]
fn test_eci_sign_ties() {
    let x = random_matrix(9, 6, 4);
    let solver = Eci::new().sign_correction(None).compute(&x).unwrap();
    let equal = [7.0; 6];

    let mean = Eci::new()
        .sign_correction(Some(SignStatistic::Mean))
        .compute_with_sizes(&x, &equal)
        .unwrap();
    for (a, b) in mean.scores().iter().zip(solver.scores()) {
        assert_relative_eq!(*a, -*b, epsilon = 1e-12);
    }

    let corr = Eci::new()
        .sign_correction(Some(SignStatistic::Correlation))
        .compute_with_sizes(&x, &equal)
        .unwrap();
    assert_eq!(corr, solver);
}

/// Test that a size vector of the wrong length is rejected.
#[test]
fn test_eci_sizes_length() {
    let result = Eci::new().compute_with_sizes(&two_by_two(), &[1.0, 2.0, 3.0]);
    assert!(matches!(result, Err(ComplexityError::ShapeMismatch { .. })));

    let result = Eci::new().product_complexity_with_sizes(&random_matrix(3, 5, 4), &[1.0; 5]);
    assert!(matches!(result, Err(ComplexityError::ShapeMismatch { .. })));
}

/// Test that disabling the correction only ever changes the sign.
#[test]
fn test_eci_without_sign_correction() {
    let x = random_matrix(5, 10, 6);
    let corrected = Eci::new().compute(&x).unwrap();
    let raw = Eci::new().sign_correction(None).compute(&x).unwrap();

    let same = corrected
        .scores()
        .iter()
        .zip(raw.scores())
        .all(|(a, b)| (a - b).abs() < 1e-10);
    let flipped = corrected
        .scores()
        .iter()
        .zip(raw.scores())
        .all(|(a, b)| (a + b).abs() < 1e-10);
    assert!(same || flipped);
}

/// Test the default estimator.
#[test]
fn test_eci_default() {
    assert_eq!(Eci::default().sign_correction, Some(SignStatistic::Sum));
    assert_eq!(Eci::new(), Eci::default());
}

// ============================================================================
// Product Complexity Tests
// ============================================================================

/// Test PCI labels, length and orthogonality to sector size.
#[test]
fn test_pci() {
    let x = random_matrix(17, 9, 6);
    let pci = Eci::new().product_complexity(&x).unwrap();

    assert_eq!(pci.metric(), Metric::Pci);
    assert_eq!(pci.len(), 6);
    assert_eq!(pci.labels(), x.col_labels());

    let weighted: f64 = pci
        .scores()
        .iter()
        .zip(x.col_sums())
        .map(|(v, k)| v * k)
        .sum();
    assert!((weighted / x.total()).abs() < 1e-9);
}

/// Test that PCI equals ECI of the transpose.
#[test]
fn test_pci_is_eci_of_transpose() {
    let x = random_matrix(18, 7, 5);
    let pci = Eci::new().product_complexity(&x).unwrap();
    let eci_t = Eci::new().compute(&x.transpose()).unwrap();

    assert_eq!(pci.labels(), eci_t.labels());
    for (a, b) in pci.scores().iter().zip(eci_t.scores()) {
        assert_relative_eq!(*a, *b, epsilon = 1e-12);
    }
}

// ============================================================================
// Error Tests
// ============================================================================

/// Test that an unfiltered matrix is rejected and the filtered one works.
#[test]
fn test_eci_degenerate_input() {
    let x = ActivityMatrix::from_rows(
        vec!["A".into(), "B".into()],
        vec!["s1".into(), "s2".into(), "s3".into()],
        vec![vec![3.0, 1.0, 0.0], vec![1.0, 4.0, 0.0]],
    )
    .unwrap();

    assert_eq!(
        Eci::new().compute(&x),
        Err(ComplexityError::DegenerateInput {
            axis: Axis::Column,
            label: "s3".to_string()
        })
    );

    let filtered = DegeneracyFilter::filter(&x);
    let eci = Eci::new().compute(&filtered).unwrap();
    assert_eq!(eci.len(), 2);
    assert_relative_eq!(eci.scores()[1], 0.6246950475544242, epsilon = 1e-10);
}

/// Test that a single region is rejected.
#[test]
fn test_eci_too_few_regions() {
    let x = ActivityMatrix::new(vec!["A".into()], labels("s", 3), vec![1.0, 2.0, 3.0]).unwrap();

    assert_eq!(
        Eci::new().compute(&x),
        Err(ComplexityError::TooFewRegions { got: 1, min: 2 })
    );

    // One sector means a single-row transpose
    let y = ActivityMatrix::new(labels("r", 3), vec!["s".into()], vec![1.0, 2.0, 3.0]).unwrap();
    assert!(matches!(
        Eci::new().product_complexity(&y),
        Err(ComplexityError::TooFewRegions { got: 1, .. })
    ));
}

/// Test that overflowing sums surface as `NonFinite`.
#[test]
fn test_eci_non_finite() {
    let x = ActivityMatrix::<f32>::new(
        vec!["A".into(), "B".into()],
        vec!["s1".into(), "s2".into()],
        vec![3.0e38, 3.0e38, 3.0e38, 3.0e38],
    )
    .unwrap();

    assert!(matches!(
        Eci::new().compute(&x),
        Err(ComplexityError::NonFinite { .. })
    ));
}

/// Test f32 support.
#[test]
fn test_eci_f32() {
    let x = ActivityMatrix::<f32>::from_rows(
        vec!["A".into(), "B".into()],
        vec!["s1".into(), "s2".into()],
        vec![vec![3.0, 1.0], vec![1.0, 4.0]],
    )
    .unwrap();
    let eci = Eci::new().compute(&x).unwrap();
    assert_relative_eq!(eci.scores()[0], -0.78086877, epsilon = 1e-4);
}
