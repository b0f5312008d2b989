//! Completeness: how fully each class lands in a single cluster.

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

/// Mean share of each class captured by its dominant cluster.
///
/// The dual of [`super::Homogeneity`]: the same contingency table reduced
/// column-wise. Splitting a class across clusters lowers the score; merging
/// classes into one cluster does not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Completeness;

impl Completeness {
    /// Reduces an already-built contingency table to its completeness.
    ///
    /// An empty table scores `0.0`.
    #[must_use]
    pub fn from_table<C: Hash + Eq, L: Hash + Eq>(table: &ContingencyTable<C, L>) -> f64 {
        unweighted_mean(&table.column_purities(EPSILON))
    }
}

impl Metric for Completeness {
    fn name(&self) -> &'static str {
        "completeness"
    }

    fn range(&self) -> ScoreRange {
        ScoreRange::UNIT
    }

    #[instrument(
        name = "metric.completeness",
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
        debug!(classes = table.class_count(), score, "completeness computed");
        record_evaluation(self.name());
        Ok(score)
    }
}

/// Computes completeness directly from parallel cluster assignments and labels.
///
/// # Errors
/// Returns [`crate::MetricError::PredictionCountMismatch`] when the slices
/// differ in length.
///
/// # Examples
/// ```
/// use purity_core::completeness_score;
///
/// // Class `x` is split across both clusters.
/// let score = completeness_score(&[0, 0, 1, 1], &["x", "x", "x", "y"])?;
/// assert!((score - (2.0 / 3.0 + 1.0) / 2.0).abs() < 1e-6);
/// # Ok::<(), purity_core::MetricError>(())
/// ```
pub fn completeness_score<C, L>(predictions: &[C], labels: &[L]) -> Result<f64>
where
    C: Hash + Eq,
    L: Hash + Eq,
{
    validate_assignment_lengths(predictions, labels)?;
    let table = ContingencyTable::from_pairs(predictions.iter().zip(labels));
    Ok(Completeness::from_table(&table))
}
