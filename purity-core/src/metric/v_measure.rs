//! V-measure: harmonic mean of homogeneity and completeness.

use std::hash::Hash;

use tracing::{debug, instrument};

use crate::{Result, contingency::ContingencyTable, dataset::Dataset, estimator::Estimator};

use super::{
    Completeness, Homogeneity, Metric, ScoreRange, clustering_table, record_evaluation,
    validate_assignment_lengths,
};

/// Harmonic mean of [`Homogeneity`] and [`Completeness`].
///
/// Both components are derived from one contingency table, so the estimator
/// is consulted once per evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VMeasure;

impl VMeasure {
    /// Reduces an already-built contingency table to its V-measure.
    #[must_use]
    pub fn from_table<C: Hash + Eq, L: Hash + Eq>(table: &ContingencyTable<C, L>) -> f64 {
        harmonic_mean(
            Homogeneity::from_table(table),
            Completeness::from_table(table),
        )
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "the harmonic mean requires floating-point arithmetic."
)]
fn harmonic_mean(homogeneity: f64, completeness: f64) -> f64 {
    let sum = homogeneity + completeness;
    if sum <= 0.0 {
        return 0.0;
    }
    2.0 * homogeneity * completeness / sum
}

impl Metric for VMeasure {
    fn name(&self) -> &'static str {
        "v-measure"
    }

    fn range(&self) -> ScoreRange {
        ScoreRange::UNIT
    }

    #[instrument(
        name = "metric.v_measure",
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
        let homogeneity = Homogeneity::from_table(&table);
        let completeness = Completeness::from_table(&table);
        let score = harmonic_mean(homogeneity, completeness);
        debug!(homogeneity, completeness, score, "v-measure computed");
        record_evaluation(self.name());
        Ok(score)
    }
}

/// Computes V-measure directly from parallel cluster assignments and labels.
///
/// # Errors
/// Returns [`crate::MetricError::PredictionCountMismatch`] when the slices
/// differ in length.
pub fn v_measure_score<C, L>(predictions: &[C], labels: &[L]) -> Result<f64>
where
    C: Hash + Eq,
    L: Hash + Eq,
{
    validate_assignment_lengths(predictions, labels)?;
    let table = ContingencyTable::from_pairs(predictions.iter().zip(labels));
    Ok(VMeasure::from_table(&table))
}
