//! Shared test utilities for `purity-core`.

use std::{
    env,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use proptest::test_runner::Config as ProptestConfig;

use crate::{
    error::EstimatorError,
    estimator::{Estimator, EstimatorKind},
};

/// Environment variable overriding the number of proptest cases per property.
pub(crate) const PROPTEST_CASES_ENV_KEY: &str = "PURITY_PROPTEST_CASES";

/// Builds a proptest configuration, honouring `PURITY_PROPTEST_CASES`.
///
/// Invalid or zero overrides fall back to `default_cases`.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let cases = env::var(PROPTEST_CASES_ENV_KEY)
        .ok()
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|&cases| cases > 0)
        .unwrap_or(default_cases);
    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}

/// [`Estimator`] that replays fixed predictions and records `predict` calls.
///
/// Samples are ignored except for their count; the first `samples.len()`
/// stored predictions are returned.
#[derive(Clone)]
pub(crate) struct CountingClusterer<P> {
    predictions: Vec<P>,
    kind: EstimatorKind,
    calls: Arc<AtomicUsize>,
}

impl<P: Clone> CountingClusterer<P> {
    /// Creates a clusterer returning `predictions`.
    #[must_use]
    pub(crate) fn new(predictions: Vec<P>) -> Self {
        Self::with_kind(EstimatorKind::Clusterer, predictions)
    }

    /// Creates an estimator of an arbitrary kind returning `predictions`.
    #[must_use]
    pub(crate) fn with_kind(kind: EstimatorKind, predictions: Vec<P>) -> Self {
        Self {
            predictions,
            kind,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns how many times `predict` has been invoked.
    #[must_use]
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl<S, P: Clone> Estimator<S> for CountingClusterer<P> {
    type Prediction = P;

    fn kind(&self) -> EstimatorKind {
        self.kind
    }

    fn predict(&self, samples: &[S]) -> Result<Vec<P>, EstimatorError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .predictions
            .iter()
            .take(samples.len())
            .cloned()
            .collect())
    }
}
