//! Error types for the purity core library.
//!
//! Every public error enum carries a stable machine-readable code so callers
//! (and the CLI's structured logs) can match on failures without parsing
//! display strings.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::estimator::EstimatorKind;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::Estimator::predict`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum EstimatorError {
    /// The estimator was asked to predict before it was trained.
    #[error("estimator has not been trained")]
    NotTrained,
    /// A sample referenced a row the estimator knows nothing about.
    #[error("sample {index} is unknown to the estimator")]
    UnknownSample {
        /// Position of the offending sample in the batch.
        index: usize,
    },
    /// The estimator failed for an implementation-specific reason.
    #[error("prediction failed: {reason}")]
    PredictionFailed {
        /// Human-readable explanation supplied by the estimator.
        reason: Arc<str>,
    },
}

define_error_codes! {
    /// Stable codes describing [`EstimatorError`] variants.
    enum EstimatorErrorCode for EstimatorError {
        /// The estimator was asked to predict before it was trained.
        NotTrained => NotTrained => "ESTIMATOR_NOT_TRAINED",
        /// A sample referenced a row the estimator knows nothing about.
        UnknownSample => UnknownSample { .. } => "ESTIMATOR_UNKNOWN_SAMPLE",
        /// The estimator failed for an implementation-specific reason.
        PredictionFailed => PredictionFailed { .. } => "ESTIMATOR_PREDICTION_FAILED",
    }
}

/// An error produced while constructing a [`crate::Labeled`] dataset.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DatasetError {
    /// Samples and labels were not parallel sequences.
    #[error("dataset `{dataset}` has {samples} samples but {labels} labels")]
    LabelCountMismatch {
        /// Identifier for the dataset being built.
        dataset: Arc<str>,
        /// Number of samples supplied.
        samples: usize,
        /// Number of labels supplied.
        labels: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`DatasetError`] variants.
    enum DatasetErrorCode for DatasetError {
        /// Samples and labels were not parallel sequences.
        LabelCountMismatch => LabelCountMismatch { .. } => "DATASET_LABEL_COUNT_MISMATCH",
    }
}

/// Error type produced by [`crate::Metric::score`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MetricError {
    /// The metric does not apply to estimators of this kind.
    #[error("{metric} only works with {expected} estimators (got {found})")]
    InvalidEstimatorKind {
        /// Name of the metric that rejected the estimator.
        metric: &'static str,
        /// Kind the metric requires.
        expected: EstimatorKind,
        /// Kind the estimator declared.
        found: EstimatorKind,
    },
    /// The testing dataset carries no ground-truth labels.
    #[error("{metric} requires a labeled testing set but `{dataset}` is unlabeled")]
    UnlabeledDataset {
        /// Name of the metric that rejected the dataset.
        metric: &'static str,
        /// Identifier for the unlabeled dataset.
        dataset: Arc<str>,
    },
    /// The estimator returned a different number of predictions than labels.
    #[error("estimator returned {predictions} predictions for {labels} labeled samples")]
    PredictionCountMismatch {
        /// Number of predictions produced.
        predictions: usize,
        /// Number of ground-truth labels available.
        labels: usize,
    },
    /// The estimator failed while predicting.
    #[error("estimator failed: {0}")]
    Estimator(#[from] EstimatorError),
}

define_error_codes! {
    /// Stable codes describing [`MetricError`] variants.
    enum MetricErrorCode for MetricError {
        /// The metric does not apply to estimators of this kind.
        InvalidEstimatorKind => InvalidEstimatorKind { .. } => "METRIC_INVALID_ESTIMATOR_KIND",
        /// The testing dataset carries no ground-truth labels.
        UnlabeledDataset => UnlabeledDataset { .. } => "METRIC_UNLABELED_DATASET",
        /// The estimator returned a different number of predictions than labels.
        PredictionCountMismatch => PredictionCountMismatch { .. } => "METRIC_PREDICTION_COUNT_MISMATCH",
        /// The estimator failed while predicting.
        EstimatorFailure => Estimator(..) => "METRIC_ESTIMATOR_FAILURE",
    }
}

impl MetricError {
    /// Retrieve the inner [`EstimatorErrorCode`] when the failure originated in
    /// the estimator.
    #[must_use]
    pub const fn estimator_code(&self) -> Option<EstimatorErrorCode> {
        match self {
            Self::Estimator(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// An error produced by a [`crate::Categorical`] strategy.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum StrategyError {
    /// The strategy was fitted with no values.
    #[error("strategy must be fitted with at least 1 value")]
    EmptyInput,
    /// A guess was requested before the strategy was fitted.
    #[error("strategy has not been fitted")]
    NotFitted,
    /// Observed frequencies could not be turned into sampling weights.
    #[error("observed frequencies do not form valid sampling weights")]
    InvalidWeights,
}

define_error_codes! {
    /// Stable codes describing [`StrategyError`] variants.
    enum StrategyErrorCode for StrategyError {
        /// The strategy was fitted with no values.
        EmptyInput => EmptyInput => "STRATEGY_EMPTY_INPUT",
        /// A guess was requested before the strategy was fitted.
        NotFitted => NotFitted => "STRATEGY_NOT_FITTED",
        /// Observed frequencies could not be turned into sampling weights.
        InvalidWeights => InvalidWeights => "STRATEGY_INVALID_WEIGHTS",
    }
}

/// An error produced while configuring or running a batch evaluation.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum EvaluationError {
    /// The requested worker count was zero.
    #[error("workers must be at least 1 (got {got})")]
    InvalidWorkers {
        /// The invalid worker count supplied by the caller.
        got: usize,
    },
    /// The worker pool could not be started.
    #[error("failed to start {workers} evaluation workers: {reason}")]
    ThreadPool {
        /// Number of workers requested.
        workers: usize,
        /// Failure reported by the thread pool.
        reason: Arc<str>,
    },
}

define_error_codes! {
    /// Stable codes describing [`EvaluationError`] variants.
    enum EvaluationErrorCode for EvaluationError {
        /// The requested worker count was zero.
        InvalidWorkers => InvalidWorkers { .. } => "EVALUATION_INVALID_WORKERS",
        /// The worker pool could not be started.
        ThreadPool => ThreadPool { .. } => "EVALUATION_THREAD_POOL",
    }
}

/// Convenient alias for results returned by metric scoring.
pub type Result<T> = core::result::Result<T, MetricError>;
