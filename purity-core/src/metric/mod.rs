//! Clustering-quality metrics scored against labeled testing sets.
//!
//! Every metric shares the same preconditions: the estimator must be a
//! [`EstimatorKind::Clusterer`], the testing set must carry labels, and an
//! empty testing set scores `0.0` without consulting the estimator.

mod completeness;
mod homogeneity;
mod v_measure;

use std::{hash::Hash, sync::Arc};

use tracing::warn;

use crate::{
    Result,
    contingency::ContingencyTable,
    dataset::Dataset,
    error::MetricError,
    estimator::{Estimator, EstimatorKind},
};

pub use completeness::{Completeness, completeness_score};
pub use homogeneity::{Homogeneity, homogeneity_score};
pub use v_measure::{VMeasure, v_measure_score};

/// Closed interval within which a metric's scores lie.
///
/// # Examples
/// ```
/// use purity_core::ScoreRange;
///
/// let range = ScoreRange::UNIT;
/// assert!(range.contains(0.5));
/// assert!(!range.contains(1.5));
/// assert_eq!(<(f64, f64)>::from(range), (0.0, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRange {
    lower: f64,
    upper: f64,
}

impl ScoreRange {
    /// The `[0, 1]` interval used by every bounded clustering metric.
    pub const UNIT: Self = Self::new(0.0, 1.0);

    /// Creates a range from its bounds.
    #[must_use]
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Returns the lower bound.
    #[must_use]
    pub const fn lower(self) -> f64 {
        self.lower
    }

    /// Returns the upper bound.
    #[must_use]
    pub const fn upper(self) -> f64 {
        self.upper
    }

    /// Returns whether `value` lies within the closed interval.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }
}

impl From<ScoreRange> for (f64, f64) {
    fn from(range: ScoreRange) -> Self {
        (range.lower, range.upper)
    }
}

/// Scores an estimator against a labeled testing set.
///
/// Implementations are stateless: one value may score any number of
/// estimators, from any number of threads.
///
/// # Examples
/// ```
/// use purity_core::{FixedAssignments, Homogeneity, Labeled, Metric};
///
/// let clusterer = FixedAssignments::new(vec!["A", "A", "B", "B", "B"]);
/// let testing = Labeled::new("demo", (0..5).collect::<Vec<usize>>(), vec!["x", "x", "x", "y", "y"])?;
///
/// let score = Homogeneity.score(&clusterer, &testing)?;
/// assert!((score - 5.0 / 6.0).abs() < 1e-6);
/// assert!(Homogeneity.range().contains(score));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Metric {
    /// Returns the stable name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Returns the interval every score produced by this metric lies within.
    fn range(&self) -> ScoreRange;

    /// Scores `estimator` on `testing`.
    ///
    /// # Errors
    /// Returns [`MetricError`] when the estimator or dataset does not satisfy
    /// the metric's preconditions, or when prediction fails.
    fn score<E, D>(&self, estimator: &E, testing: &D) -> Result<f64>
    where
        D: Dataset,
        D::Label: Hash + Eq,
        E: Estimator<D::Sample>,
        E::Prediction: Hash + Eq;
}

/// Validates a clusterer evaluation and tabulates its predictions.
///
/// Returns `Ok(None)` for an empty testing set; the estimator is not invoked
/// in that case.
pub(crate) fn clustering_table<'a, E, D>(
    metric: &'static str,
    estimator: &E,
    testing: &'a D,
) -> Result<Option<ContingencyTable<E::Prediction, &'a D::Label>>>
where
    D: Dataset,
    D::Label: Hash + Eq,
    E: Estimator<D::Sample>,
    E::Prediction: Hash + Eq,
{
    let kind = estimator.kind();
    if kind != EstimatorKind::Clusterer {
        return Err(MetricError::InvalidEstimatorKind {
            metric,
            expected: EstimatorKind::Clusterer,
            found: kind,
        });
    }

    let labels = testing
        .labels()
        .ok_or_else(|| MetricError::UnlabeledDataset {
            metric,
            dataset: Arc::from(testing.name()),
        })?;

    if testing.num_rows() == 0 {
        warn!(
            metric,
            dataset = testing.name(),
            "testing set is empty, scoring 0.0"
        );
        return Ok(None);
    }

    let predictions = estimator.predict(testing.samples())?;
    if predictions.len() != labels.len() {
        return Err(MetricError::PredictionCountMismatch {
            predictions: predictions.len(),
            labels: labels.len(),
        });
    }

    Ok(Some(ContingencyTable::from_pairs(
        predictions.into_iter().zip(labels),
    )))
}

/// Validates parallel assignment slices for the free scoring functions.
pub(crate) const fn validate_assignment_lengths<C, L>(
    predictions: &[C],
    labels: &[L],
) -> Result<usize> {
    if predictions.len() != labels.len() {
        return Err(MetricError::PredictionCountMismatch {
            predictions: predictions.len(),
            labels: labels.len(),
        });
    }
    Ok(labels.len())
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "averaging purities requires floating-point arithmetic."
)]
pub(crate) fn unweighted_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(feature = "metrics")]
pub(crate) fn record_evaluation(metric: &'static str) {
    ::metrics::counter!("purity_metric_evaluations", "metric" => metric).increment(1);
}

#[cfg(not(feature = "metrics"))]
pub(crate) const fn record_evaluation(_metric: &'static str) {}
