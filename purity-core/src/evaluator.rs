//! Concurrent scoring of independent evaluation jobs.
//!
//! Each job pairs an estimator with a testing set. Metrics are stateless and
//! every job owns its contingency table, so jobs run on a dedicated rayon pool
//! without any shared mutable state. The pool lives as long as the evaluator
//! and is rebuilt only when the worker count changes.

use std::{hash::Hash, num::NonZeroUsize, sync::Arc};

use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};
use tracing::{debug, instrument, warn};

use crate::{
    dataset::Dataset,
    error::{EvaluationError, MetricError},
    estimator::Estimator,
    metric::Metric,
    parallel::Parallel,
};

/// Scores many `(estimator, testing set)` jobs with one metric in parallel.
///
/// # Examples
/// ```
/// use purity_core::{BatchEvaluatorBuilder, FixedAssignments, Homogeneity, Labeled};
///
/// let testing = Labeled::new("demo", vec![0_usize, 1, 2, 3], vec!["x", "x", "y", "y"])?;
/// let jobs = vec![
///     (FixedAssignments::new(vec![0, 0, 1, 1]), &testing),
///     (FixedAssignments::new(vec![0, 1, 0, 1]), &testing),
/// ];
///
/// let evaluator = BatchEvaluatorBuilder::new().with_workers(2).build()?;
/// let scores = evaluator.score_all(&Homogeneity, &jobs)?;
/// assert_eq!(scores[0], Ok(1.0));
/// assert!(matches!(scores[1], Ok(score) if (score - 0.5).abs() < 1e-6));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct BatchEvaluator {
    workers: NonZeroUsize,
    pool: Option<Arc<ThreadPool>>,
}

pub(crate) fn build_pool(workers: NonZeroUsize) -> Result<ThreadPool, EvaluationError> {
    ThreadPoolBuilder::new()
        .num_threads(workers.get())
        .thread_name(|index| format!("purity-eval-{index}"))
        .build()
        .map_err(|source| EvaluationError::ThreadPool {
            workers: workers.get(),
            reason: Arc::from(source.to_string()),
        })
}

impl BatchEvaluator {
    pub(crate) fn new(workers: NonZeroUsize, pool: ThreadPool) -> Self {
        Self {
            workers,
            pool: Some(Arc::new(pool)),
        }
    }

    /// Scores every job with `metric`, returning one result per job in job
    /// order.
    ///
    /// A failing job does not abort the batch; its error is returned in its
    /// slot.
    ///
    /// # Errors
    /// Returns [`EvaluationError::ThreadPool`] when a worker pool discarded by
    /// an earlier failed resize still cannot be started.
    #[instrument(
        name = "evaluator.score_all",
        err,
        skip_all,
        fields(metric = metric.name(), jobs = jobs.len(), workers = self.workers.get()),
    )]
    pub fn score_all<M, E, D>(
        &self,
        metric: &M,
        jobs: &[(E, D)],
    ) -> Result<Vec<Result<f64, MetricError>>, EvaluationError>
    where
        M: Metric + Sync,
        E: Estimator<D::Sample> + Sync,
        E::Prediction: Hash + Eq,
        D: Dataset + Sync,
        D::Label: Hash + Eq,
    {
        let pool = match &self.pool {
            Some(pool) => Arc::clone(pool),
            None => Arc::new(build_pool(self.workers)?),
        };

        let results: Vec<_> = pool.install(|| {
            jobs.par_iter()
                .map(|(estimator, testing)| metric.score(estimator, testing))
                .collect()
        });
        let failures = results.iter().filter(|result| result.is_err()).count();
        debug!(failures, "batch evaluation completed");
        Ok(results)
    }
}

impl Parallel for BatchEvaluator {
    fn set_workers(&mut self, workers: NonZeroUsize) {
        if workers == self.workers && self.pool.is_some() {
            return;
        }
        self.workers = workers;
        self.pool = match build_pool(workers) {
            Ok(pool) => Some(Arc::new(pool)),
            Err(error) => {
                warn!(%error, "deferring pool construction to the next batch");
                None
            }
        };
    }

    fn workers(&self) -> NonZeroUsize {
        self.workers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::{
        builder::BatchEvaluatorBuilder,
        dataset::{Labeled, Unlabeled},
        estimator::{EstimatorKind, FixedAssignments},
        metric::{Completeness, Homogeneity},
        test_utils::CountingClusterer,
    };

    fn testing() -> Labeled<usize, char> {
        Labeled::new("batch", (0..6).collect(), vec!['x', 'x', 'x', 'y', 'y', 'y'])
            .expect("lengths match")
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    fn results_follow_job_order(#[case] workers: usize) {
        let testing = testing();
        let jobs: Vec<_> = (0..12_u8)
            .map(|job| {
                // Even jobs are perfect, odd jobs lump everything together.
                let assignments = if job % 2 == 0 {
                    vec![0, 0, 0, 1, 1, 1]
                } else {
                    vec![0; 6]
                };
                (FixedAssignments::new(assignments), &testing)
            })
            .collect();

        let evaluator = BatchEvaluatorBuilder::new()
            .with_workers(workers)
            .build()
            .expect("worker count is valid");
        let scores = evaluator
            .score_all(&Homogeneity, &jobs)
            .expect("pool must start");

        assert_eq!(scores.len(), jobs.len());
        for (index, score) in scores.into_iter().enumerate() {
            let score = score.expect("every job is valid");
            if index % 2 == 0 {
                assert_eq!(score, 1.0, "job {index}");
            } else {
                assert!((score - 0.5).abs() < 1e-6, "job {index} scored {score}");
            }
        }
    }

    #[test]
    fn job_failures_stay_in_their_slot() {
        let testing = testing();
        let jobs = vec![
            (CountingClusterer::new(vec![1_u8; 6]), &testing),
            (
                CountingClusterer::with_kind(EstimatorKind::Regressor, vec![1_u8; 6]),
                &testing,
            ),
        ];
        let evaluator = BatchEvaluatorBuilder::new()
            .with_workers(2)
            .build()
            .expect("worker count is valid");
        let scores = evaluator
            .score_all(&Completeness, &jobs)
            .expect("pool must start");

        assert_eq!(scores[0], Ok(1.0));
        assert!(matches!(
            scores[1],
            Err(MetricError::InvalidEstimatorKind { .. })
        ));
    }

    #[test]
    fn unlabeled_jobs_report_their_error() {
        let unlabeled = Unlabeled::new("raw", vec![0_usize, 1]);
        let jobs = vec![(FixedAssignments::new(vec![0, 1]), &unlabeled)];
        let evaluator = BatchEvaluatorBuilder::new()
            .with_workers(1)
            .build()
            .expect("worker count is valid");
        let scores = evaluator
            .score_all(&Homogeneity, &jobs)
            .expect("pool must start");
        assert!(matches!(
            scores[0],
            Err(MetricError::UnlabeledDataset { .. })
        ));
    }

    #[test]
    fn set_workers_reconfigures_the_pool_size() {
        let mut evaluator = BatchEvaluatorBuilder::new()
            .with_workers(1)
            .build()
            .expect("worker count is valid");
        let four = NonZeroUsize::new(4).expect("four is non-zero");
        evaluator.set_workers(four);
        assert_eq!(evaluator.workers(), four);
        let threads = evaluator.pool.as_ref().map(|pool| pool.current_num_threads());
        assert_eq!(threads, Some(4));
    }

    #[test]
    fn pool_is_reused_across_batches() {
        let testing = testing();
        let jobs = vec![(FixedAssignments::new(vec![0, 0, 0, 1, 1, 1]), &testing)];
        let mut evaluator = BatchEvaluatorBuilder::new()
            .with_workers(2)
            .build()
            .expect("worker count is valid");
        let built = evaluator.pool.clone().expect("build starts the pool");

        for _ in 0..3 {
            evaluator
                .score_all(&Homogeneity, &jobs)
                .expect("pool must run");
        }
        evaluator.set_workers(NonZeroUsize::new(2).expect("two is non-zero"));

        let current = evaluator.pool.as_ref().expect("pool is still present");
        assert!(Arc::ptr_eq(&built, current));
    }

    #[test]
    fn missing_pool_is_rebuilt_on_demand() {
        let testing = testing();
        let jobs = vec![(FixedAssignments::new(vec![0, 0, 0, 1, 1, 1]), &testing)];
        let mut evaluator = BatchEvaluatorBuilder::new()
            .with_workers(1)
            .build()
            .expect("worker count is valid");
        evaluator.pool = None;
        let scores = evaluator
            .score_all(&Homogeneity, &jobs)
            .expect("pool must start");
        assert_eq!(scores, vec![Ok(1.0)]);
    }

    #[test]
    fn empty_batches_score_nothing() {
        let jobs: Vec<(FixedAssignments<u8>, Labeled<usize, char>)> = Vec::new();
        let evaluator = BatchEvaluatorBuilder::new()
            .with_workers(2)
            .build()
            .expect("worker count is valid");
        let scores = evaluator
            .score_all(&Homogeneity, &jobs)
            .expect("pool must start");
        assert!(scores.is_empty());
    }
}
