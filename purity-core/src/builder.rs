//! Builder utilities for configuring batch evaluation.
//!
//! Validates the worker count and starts the worker pool before
//! constructing [`BatchEvaluator`] instances.

use std::{num::NonZeroUsize, thread};

use crate::{
    error::EvaluationError,
    evaluator::{BatchEvaluator, build_pool},
};

/// Configures and constructs [`BatchEvaluator`] instances.
///
/// # Examples
/// ```
/// use purity_core::{BatchEvaluatorBuilder, Parallel};
///
/// let evaluator = BatchEvaluatorBuilder::new()
///     .with_workers(2)
///     .build()
///     .expect("two workers is a valid configuration");
/// assert_eq!(evaluator.workers().get(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct BatchEvaluatorBuilder {
    workers: usize,
}

impl Default for BatchEvaluatorBuilder {
    fn default() -> Self {
        Self {
            workers: thread::available_parallelism().map_or(1, NonZeroUsize::get),
        }
    }
}

impl BatchEvaluatorBuilder {
    /// Creates a builder defaulting to the host's available parallelism.
    ///
    /// # Examples
    /// ```
    /// use purity_core::BatchEvaluatorBuilder;
    ///
    /// let builder = BatchEvaluatorBuilder::new();
    /// assert!(builder.workers() >= 1);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of workers.
    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Returns the configured number of workers.
    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers
    }

    /// Validates the configuration and constructs a [`BatchEvaluator`].
    ///
    /// # Errors
    /// Returns [`EvaluationError::InvalidWorkers`] when the worker count is
    /// zero, or [`EvaluationError::ThreadPool`] when the worker pool cannot be
    /// started.
    ///
    /// # Examples
    /// ```
    /// use purity_core::{BatchEvaluatorBuilder, EvaluationError};
    ///
    /// let err = BatchEvaluatorBuilder::new().with_workers(0).build().expect_err("zero workers");
    /// assert_eq!(err, EvaluationError::InvalidWorkers { got: 0 });
    /// ```
    pub fn build(self) -> Result<BatchEvaluator, EvaluationError> {
        let workers = NonZeroUsize::new(self.workers)
            .ok_or(EvaluationError::InvalidWorkers { got: self.workers })?;
        let pool = build_pool(workers)?;
        Ok(BatchEvaluator::new(workers, pool))
    }
}
