//! Homogeneity: how class-pure each discovered cluster is.

use std::hash::Hash;

use tracing::{debug, instrument};

use crate::{
    EPSILON, Result,
    contingency::ContingencyTable,
    dataset::Dataset,
    estimator::Estimator,
};

use super::{
    Metric, ScoreRange, clustering_table, record_evaluation, unweighted_mean,
    validate_assignment_lengths,
};

/// Mean purity of the clusters found by a clusterer.
///
/// Each cluster's purity is the share of its members that belong to its most
/// frequent class, smoothed by [`EPSILON`]. Clusters contribute equally to the
/// mean regardless of their size. A score of `1.0` means every cluster holds a
/// single class.
///
/// # Examples
/// ```
/// use purity_core::{FixedAssignments, Homogeneity, Labeled, Metric, MetricError};
///
/// let clusterer = FixedAssignments::new(vec![0, 0, 1, 1]);
/// let testing = Labeled::new("pure", vec![0_usize, 1, 2, 3], vec!["a", "a", "b", "b"])?;
/// assert_eq!(Homogeneity.score(&clusterer, &testing)?, 1.0);
///
/// let unlabeled = testing.into_unlabeled();
/// let err = Homogeneity.score(&clusterer, &unlabeled).expect_err("labels are required");
/// assert!(matches!(err, MetricError::UnlabeledDataset { .. }));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Homogeneity;

impl Homogeneity {
    /// Reduces an already-built contingency table to its homogeneity.
    ///
    /// An empty table scores `0.0`.
    #[must_use]
    pub fn from_table<C: Hash + Eq, L: Hash + Eq>(table: &ContingencyTable<C, L>) -> f64 {
        unweighted_mean(&table.row_purities(EPSILON))
    }
}

impl Metric for Homogeneity {
    fn name(&self) -> &'static str {
        "homogeneity"
    }

    fn range(&self) -> ScoreRange {
        ScoreRange::UNIT
    }

    #[instrument(
        name = "metric.homogeneity",
        err,
        skip_all,
        fields(
            estimator_kind = %estimator.kind(),
            dataset = %testing.name(),
            rows = testing.num_rows(),
        ),
    )]
    fn score<E, D>(&self, estimator: &E, testing: &D) -> Result<f64>
    where
        D: Dataset,
        D::Label: Hash + Eq,
        E: Estimator<D::Sample>,
        E::Prediction: Hash + Eq,
    {
        let Some(table) = clustering_table(self.name(), estimator, testing)? else {
            return Ok(0.0);
        };
        let score = Self::from_table(&table);
        debug!(
            clusters = table.cluster_count(),
            classes = table.class_count(),
            score,
            "homogeneity computed"
        );
        record_evaluation(self.name());
        Ok(score)
    }
}

/// Computes homogeneity directly from parallel cluster assignments and labels.
///
/// Empty inputs score `0.0`.
///
/// # Errors
/// Returns [`crate::MetricError::PredictionCountMismatch`] when the slices
/// differ in length.
///
/// # Examples
/// ```
/// use purity_core::homogeneity_score;
///
/// let score = homogeneity_score(&['A', 'A', 'B', 'B', 'B'], &['x', 'x', 'x', 'y', 'y'])?;
/// assert!((score - 0.8333).abs() < 1e-4);
/// # Ok::<(), purity_core::MetricError>(())
/// ```
pub fn homogeneity_score<C, L>(predictions: &[C], labels: &[L]) -> Result<f64>
where
    C: Hash + Eq,
    L: Hash + Eq,
{
    validate_assignment_lengths(predictions, labels)?;
    let table = ContingencyTable::from_pairs(predictions.iter().zip(labels));
    Ok(Homogeneity::from_table(&table))
}
