//! End-to-end scoring of a small clusterer against labeled data.

mod common;

use rstest::{fixture, rstest};

use common::ThresholdClusterer;
use purity_core::{
    Completeness, Dataset, EstimatorErrorCode, Homogeneity, Labeled, Metric, MetricErrorCode,
    VMeasure,
};

#[fixture]
fn testing() -> Labeled<f64, &'static str> {
    Labeled::new(
        "blobs",
        vec![0.1, 0.2, 0.3, 5.1, 5.2, 5.3, 9.8, 9.9],
        vec!["low", "low", "low", "mid", "mid", "mid", "high", "high"],
    )
    .expect("samples and labels are parallel")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[rstest]
fn perfect_split_scores_one(testing: Labeled<f64, &'static str>) {
    let clusterer = ThresholdClusterer::new(vec![2.5, 7.5]);
    assert_close(Homogeneity.score(&clusterer, &testing).expect("valid"), 1.0);
    assert_close(Completeness.score(&clusterer, &testing).expect("valid"), 1.0);
    assert_close(VMeasure.score(&clusterer, &testing).expect("valid"), 1.0);
}

#[rstest]
fn coarse_split_stays_complete_but_not_homogeneous(testing: Labeled<f64, &'static str>) {
    // Cluster 0 holds every `low` and `mid` sample; cluster 1 holds `high`.
    let clusterer = ThresholdClusterer::new(vec![7.5]);
    let homogeneity = Homogeneity.score(&clusterer, &testing).expect("valid");
    let completeness = Completeness.score(&clusterer, &testing).expect("valid");

    assert_close(homogeneity, (0.5 + 1.0) / 2.0);
    assert_close(completeness, 1.0);
    let v_measure = VMeasure.score(&clusterer, &testing).expect("valid");
    assert_close(v_measure, 2.0 * homogeneity / (homogeneity + 1.0));
}

#[rstest]
fn estimator_failures_surface_with_codes(testing: Labeled<f64, &'static str>) {
    let mut samples = testing.samples().to_vec();
    samples[2] = f64::NAN;
    let labels = testing.labels().expect("labeled").to_vec();
    let broken = Labeled::new("broken", samples, labels).expect("lengths match");

    let err = Homogeneity
        .score(&ThresholdClusterer::new(vec![2.5]), &broken)
        .expect_err("NaN samples cannot be clustered");
    assert_eq!(err.code(), MetricErrorCode::EstimatorFailure);
    assert_eq!(err.estimator_code(), Some(EstimatorErrorCode::UnknownSample));
}

#[rstest]
fn unlabeled_view_is_rejected(testing: Labeled<f64, &'static str>) {
    let unlabeled = testing.into_unlabeled();
    let err = Completeness
        .score(&ThresholdClusterer::new(vec![2.5]), &unlabeled)
        .expect_err("ground truth is required");
    assert_eq!(err.code(), MetricErrorCode::UnlabeledDataset);
}
