//! Tests for the per-year batch pipeline.
//!
//! These tests verify:
//! - End-to-end scores on a small four-region dataset
//! - Output tagging with year, source and sector type
//! - Skipping of failing years without aborting the batch
//! - Segment regrouping before computation
//! - Pooled runs over all years
//! - ECI orientation against raw region size

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use complexity_rs::prelude::*;

fn records_2019() -> Vec<ActivityRecord<f64>> {
    vec![
        ActivityRecord::new("UKC1", "10.11", 2019, 120.0),
        ActivityRecord::new("UKC1", "62.01", 2019, 15.0),
        ActivityRecord::new("UKC1", "28.11", 2019, 40.0),
        ActivityRecord::new("UKD3", "10.11", 2019, 40.0),
        ActivityRecord::new("UKD3", "62.01", 2019, 300.0),
        ActivityRecord::new("UKD3", "72.19", 2019, 80.0),
        ActivityRecord::new("UKD3", "28.11", 2019, 20.0),
        ActivityRecord::new("UKE4", "10.11", 2019, 90.0),
        ActivityRecord::new("UKE4", "62.01", 2019, 60.0),
        ActivityRecord::new("UKE4", "72.19", 2019, 60.0),
        ActivityRecord::new("UKE4", "28.11", 2019, 70.0),
        ActivityRecord::new("UKF1", "10.11", 2019, 110.0),
        ActivityRecord::new("UKF1", "62.01", 2019, 20.0),
        ActivityRecord::new("UKF1", "72.19", 2019, 5.0),
        ActivityRecord::new("UKF1", "28.11", 2019, 150.0),
    ]
}

// ============================================================================
// End-to-end Tests
// ============================================================================

/// Test the default metrics on one year.
#[test]
fn test_batch_single_year() {
    let pipeline = Complexity::new()
        .source("bres")
        .sector_type("SIC4")
        .build()
        .unwrap();
    let table = pipeline.run(&records_2019()).unwrap();

    assert_eq!(table.len(), 8);
    assert!(table.skipped.is_empty());
    assert_eq!(table.years(), vec![2019]);

    let expected_eci = [
        ("UKC1", -0.447249),
        ("UKD3", 0.791021),
        ("UKE4", -0.109766),
        ("UKF1", -0.402748),
    ];
    for (region, value) in expected_eci {
        let got = table.value(region, 2019, Metric::Eci).unwrap();
        assert_relative_eq!(got, value, epsilon = 1e-6);
    }

    let expected_fit = [
        ("UKC1", -11.920502),
        ("UKD3", 0.973225),
        ("UKE4", -3.794175),
        ("UKF1", -7.931653),
    ];
    for (region, value) in expected_fit {
        let got = table.value(region, 2019, Metric::FitnessPlus).unwrap();
        assert_relative_eq!(got, value, epsilon = 1e-6);
    }

    for record in &table.records {
        assert_eq!(record.source, "bres");
        assert_eq!(record.sector_type, "SIC4");
        assert_eq!(record.year, 2019);
    }
}

/// Test row ordering: year, then metric, then region.
#[test]
fn test_batch_row_order() {
    let mut records = records_2019();
    records.extend(records_2019().into_iter().map(|mut r| {
        r.year = 2018;
        r
    }));

    let pipeline = Complexity::new().build().unwrap();
    let table = pipeline.run(&records).unwrap();

    assert_eq!(table.years(), vec![2018, 2019]);
    assert_eq!(table.len(), 16);

    let first: Vec<(i32, Metric, &str)> = table.records[..5]
        .iter()
        .map(|r| (r.year, r.metric, r.region_id.as_str()))
        .collect();
    assert_eq!(
        first,
        vec![
            (2018, Metric::Eci, "UKC1"),
            (2018, Metric::Eci, "UKD3"),
            (2018, Metric::Eci, "UKE4"),
            (2018, Metric::Eci, "UKF1"),
            (2018, Metric::FitnessPlus, "UKC1"),
        ]
    );

    // Identical data gives identical scores in both years
    for r in table.metric(Metric::Eci) {
        let other = table.value(&r.region_id, 2019, Metric::Eci).unwrap();
        assert_eq!(r.value, other);
    }
}

/// Test that a year that cannot be computed is skipped with its error.
#[test]
fn test_batch_skips_failing_year() {
    let mut records = records_2019();
    records.push(ActivityRecord::new("UKC1", "10.11", 2020, 5.0));
    records.push(ActivityRecord::new("UKC1", "62.01", 2020, 7.0));

    let pipeline = Complexity::new().build().unwrap();
    let table = pipeline.run(&records).unwrap();

    assert_eq!(table.years(), vec![2019]);
    assert_eq!(
        table.skipped,
        vec![SkippedYear {
            year: 2020,
            error: ComplexityError::TooFewRegions { got: 0, min: 2 }
        }]
    );

    let text = format!("{}", table);
    assert!(text.contains("Skipped years: 1"));
}

/// Test that invalid records fail the whole batch.
#[test]
fn test_batch_invalid_records() {
    let pipeline = Complexity::new().build().unwrap();

    let mut records = records_2019();
    records.push(ActivityRecord::new("UKC1", "10.11", 2020, -1.0));
    assert!(matches!(
        pipeline.run(&records),
        Err(ComplexityError::NegativeValue { .. })
    ));

    assert_eq!(pipeline.run(&[]), Err(ComplexityError::EmptyInput));
}

/// Test that `run_year` matches the batch output.
#[test]
fn test_batch_run_year() {
    let pipeline = Complexity::new().metrics(&[Metric::Eci]).build().unwrap();
    let indices = pipeline.run_year(&records_2019(), 2019).unwrap();
    let table = pipeline.run(&records_2019()).unwrap();

    assert_eq!(indices.len(), 1);
    for (label, value) in indices[0].iter() {
        assert_eq!(table.value(label, 2019, Metric::Eci), Some(value));
    }

    assert_eq!(
        pipeline.run_year(&records_2019(), 2021),
        Err(ComplexityError::EmptyInput)
    );
}

/// Test that a pooled run averages each pair over the years.
#[test]
fn test_batch_run_pooled() {
    let mut records = records_2019();
    records.extend(
        records_2019()
            .into_iter()
            .map(|r| ActivityRecord::new(r.region_id, r.sector_id, 2020, r.value * 3.0)),
    );
    let doubled: Vec<ActivityRecord<f64>> = records_2019()
        .into_iter()
        .map(|r| ActivityRecord::new(r.region_id, r.sector_id, 2019, r.value * 2.0))
        .collect();

    let pipeline = Complexity::new()
        .metrics(&[Metric::Eci, Metric::Fitness])
        .fitness_input(MatrixInput::Raw)
        .build()
        .unwrap();
    let pooled = pipeline.run_pooled(&records).unwrap();
    assert_eq!(pooled, pipeline.run_year(&doubled, 2019).unwrap());

    assert_eq!(pipeline.run_pooled(&[]), Err(ComplexityError::EmptyInput));
}

/// Test that the configured aggregation does not change a pooled run.
#[test]
fn test_batch_run_pooled_ignores_aggregation() {
    let mut records = records_2019();
    records.push(ActivityRecord::new("UKC1", "10.11", 2020, 60.0));

    let by_sum = Complexity::new().build().unwrap();
    let by_mean = Complexity::new().aggregation(Aggregation::Mean).build().unwrap();
    assert_eq!(
        by_sum.run_pooled(&records).unwrap(),
        by_mean.run_pooled(&records).unwrap()
    );
}

// ============================================================================
// Orientation Tests
// ============================================================================

fn heterogeneous_matrix(seed: u64) -> ActivityMatrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = (0..12)
        .map(|_| {
            let scale = 10f64.powf(rng.random_range(0.0..3.0));
            (0..8).map(|_| scale * rng.random_range(1.0..100.0)).collect()
        })
        .collect();
    ActivityMatrix::from_rows(
        (0..12).map(|i| format!("R{}", i)).collect(),
        (0..8).map(|i| format!("S{}", i)).collect(),
        rows,
    )
    .unwrap()
}

/// Test that `Correlation` and `Mean` orient ECI on RCA input towards regions
/// with more raw activity, not more RCA sectors.
#[test]
fn test_batch_orientation_follows_raw_size() {
    let by_corr = Complexity::new()
        .metrics(&[Metric::Eci])
        .sign_statistic(SignStatistic::Correlation)
        .build()
        .unwrap();
    let by_mean = Complexity::new()
        .metrics(&[Metric::Eci])
        .sign_statistic(SignStatistic::Mean)
        .build()
        .unwrap();

    for seed in 0..50 {
        let x = heterogeneous_matrix(seed);

        let eci = &by_corr.compute(&x).unwrap()[0];
        let sizes: Vec<f64> = eci
            .labels()
            .iter()
            .map(|l| x.row_sums()[x.row_index(l).unwrap()])
            .collect();
        let n = sizes.len() as f64;
        let mean_s = sizes.iter().sum::<f64>() / n;
        let mean_e = eci.scores().iter().sum::<f64>() / n;
        let cov: f64 = sizes
            .iter()
            .zip(eci.scores())
            .map(|(s, e)| (s - mean_s) * (e - mean_e))
            .sum();
        assert!(cov > 0.0, "seed {}: ECI anti-correlated with raw size", seed);

        let eci = &by_mean.compute(&x).unwrap()[0];
        let mut ranked: Vec<(f64, f64)> = eci
            .iter()
            .map(|(l, v)| (v, x.row_sums()[x.row_index(l).unwrap()]))
            .collect();
        ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap());
        let m = ranked.len();
        let top: f64 = ranked[..5].iter().map(|r| r.1).sum();
        let bottom: f64 = ranked[m - 5..].iter().map(|r| r.1).sum();
        assert!(top > bottom, "seed {}: top five smaller than bottom five", seed);
    }
}

// ============================================================================
// Segment Tests
// ============================================================================

/// Test that sectors are regrouped before computing.
#[test]
fn test_batch_segments() {
    let segments = SegmentMap::from_pairs([
        ("10.11", "manufacturing"),
        ("28.11", "manufacturing"),
        ("62.01", "services"),
        ("72.19", "services"),
    ])
    .unwrap();

    let pipeline = Complexity::new()
        .segments(segments.clone())
        .fitness_input(MatrixInput::Raw)
        .metrics(&[Metric::FitnessPlus])
        .build()
        .unwrap();
    let table = pipeline.run(&records_2019()).unwrap();

    assert_eq!(table.len(), 4);
    assert!(table.records.iter().all(|r| r.sector_type == "segment"));

    let x = pivot(&records_2019(), Some(2019), Aggregation::Sum).unwrap();
    let grouped = segments.regroup(&x, false).unwrap();
    let expected = Fitness::plus(200).compute(&grouped).unwrap();
    for (label, value) in expected.iter() {
        assert_eq!(table.value(label, 2019, Metric::FitnessPlus), Some(value));
    }
}

/// Test that an incomplete segment map skips the year unless dropping is on.
#[test]
fn test_batch_unmapped_sector() {
    let segments = SegmentMap::from_pairs([
        ("10.11", "manufacturing"),
        ("62.01", "services"),
        ("72.19", "services"),
    ])
    .unwrap();

    let strict = Complexity::new().segments(segments.clone()).build().unwrap();
    let table = strict.run(&records_2019()).unwrap();
    assert!(table.is_empty());
    assert_eq!(
        table.skipped[0].error,
        ComplexityError::UnmappedSector("28.11".to_string())
    );

    let lenient = Complexity::new()
        .segments(segments)
        .drop_unmapped()
        .fitness_input(MatrixInput::Raw)
        .metrics(&[Metric::FitnessPlus])
        .build()
        .unwrap();
    let table = lenient.run(&records_2019()).unwrap();
    assert_eq!(table.len(), 4);
}

// ============================================================================
// Display Tests
// ============================================================================

/// Test the text rendering of the output table.
#[test]
fn test_batch_display() {
    let pipeline = Complexity::new()
        .source("bres")
        .sector_type("SIC4")
        .build()
        .unwrap();
    let table = pipeline.run(&records_2019()).unwrap();
    let text = format!("{}", table);

    assert!(text.contains("Rows: 8"));
    assert!(text.contains("Years: 1"));
    assert!(text.contains("fit_p"));
    assert!(!text.contains("Skipped"));
    // Summary (3), blank, header, rule, 8 rows
    assert_eq!(text.lines().count(), 14);
}
