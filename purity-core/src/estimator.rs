//! Estimator abstractions consumed by the metrics.

use std::fmt;

use crate::error::EstimatorError;

/// Declares what kind of output an [`Estimator`] produces.
///
/// Metrics use the kind to reject estimators whose predictions they cannot
/// interpret, e.g. clustering metrics refuse classifiers.
///
/// # Examples
/// ```
/// use purity_core::EstimatorKind;
///
/// assert_eq!(EstimatorKind::Clusterer.to_string(), "clusterer");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EstimatorKind {
    /// Predicts a class trained against known labels.
    Classifier,
    /// Predicts a continuous value.
    Regressor,
    /// Groups samples into discovered clusters.
    Clusterer,
    /// Flags samples as inliers or outliers.
    AnomalyDetector,
}

impl EstimatorKind {
    /// Returns the stable lowercase name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Classifier => "classifier",
            Self::Regressor => "regressor",
            Self::Clusterer => "clusterer",
            Self::AnomalyDetector => "anomaly detector",
        }
    }
}

impl fmt::Display for EstimatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trained model that maps a batch of samples to one prediction each.
///
/// # Examples
/// ```
/// use purity_core::{Estimator, EstimatorError, EstimatorKind};
///
/// struct Parity;
///
/// impl Estimator<u32> for Parity {
///     type Prediction = bool;
///
///     fn kind(&self) -> EstimatorKind { EstimatorKind::Clusterer }
///
///     fn predict(&self, samples: &[u32]) -> Result<Vec<bool>, EstimatorError> {
///         Ok(samples.iter().map(|sample| sample % 2 == 0).collect())
///     }
/// }
///
/// assert_eq!(Parity.predict(&[1, 2, 3])?, [false, true, false]);
/// # Ok::<(), EstimatorError>(())
/// ```
pub trait Estimator<S> {
    /// Value produced for every sample, e.g. a cluster identifier.
    type Prediction;

    /// Returns the kind of output this estimator produces.
    fn kind(&self) -> EstimatorKind;

    /// Predicts one value per sample, preserving sample order.
    ///
    /// # Errors
    /// Implementations return [`EstimatorError`] when they cannot produce a
    /// prediction for the batch.
    fn predict(&self, samples: &[S]) -> Result<Vec<Self::Prediction>, EstimatorError>;
}

impl<S, E: Estimator<S> + ?Sized> Estimator<S> for &E {
    type Prediction = E::Prediction;

    fn kind(&self) -> EstimatorKind {
        (**self).kind()
    }

    fn predict(&self, samples: &[S]) -> Result<Vec<Self::Prediction>, EstimatorError> {
        (**self).predict(samples)
    }
}

/// Clusterer that replays assignments computed elsewhere.
///
/// Samples are row indices; the prediction for row `i` is the `i`-th stored
/// assignment. This lets a clustering produced by another tool be scored with
/// the same [`crate::Metric`] implementations used for live estimators.
///
/// # Examples
/// ```
/// use purity_core::{Estimator, FixedAssignments};
///
/// let clusterer = FixedAssignments::new(vec!["a", "b", "a"]);
/// assert_eq!(clusterer.predict(&[2, 1])?, ["a", "b"]);
/// # Ok::<(), purity_core::EstimatorError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedAssignments<C> {
    assignments: Vec<C>,
}

impl<C> FixedAssignments<C> {
    /// Wraps precomputed assignments, one per row.
    #[must_use]
    pub const fn new(assignments: Vec<C>) -> Self {
        Self { assignments }
    }

    /// Returns the stored assignments in row order.
    #[must_use]
    pub fn assignments(&self) -> &[C] {
        &self.assignments
    }

    /// Returns the number of rows with an assignment.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Returns whether no assignments are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

impl<C: Clone> Estimator<usize> for FixedAssignments<C> {
    type Prediction = C;

    fn kind(&self) -> EstimatorKind {
        EstimatorKind::Clusterer
    }

    fn predict(&self, samples: &[usize]) -> Result<Vec<C>, EstimatorError> {
        samples
            .iter()
            .enumerate()
            .map(|(index, &row)| {
                self.assignments
                    .get(row)
                    .cloned()
                    .ok_or(EstimatorError::UnknownSample { index })
            })
            .collect()
    }
}
