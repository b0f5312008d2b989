//! Purity core library.
//!
//! Scores clusterers against ground-truth labels with cluster-purity metrics
//! and provides the estimator, dataset and strategy contracts they rely on.
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "parallel")]
mod builder;
mod contingency;
mod dataset;
mod error;
mod estimator;
#[cfg(feature = "parallel")]
mod evaluator;
mod metric;
mod parallel;
mod strategy;
#[cfg(test)]
mod test_utils;
mod transformer;

#[cfg(feature = "parallel")]
#[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
pub use crate::{builder::BatchEvaluatorBuilder, evaluator::BatchEvaluator};
pub use crate::{
    contingency::ContingencyTable,
    dataset::{Dataset, Labeled, Unlabeled},
    error::{
        DatasetError, DatasetErrorCode, EstimatorError, EstimatorErrorCode, EvaluationError,
        EvaluationErrorCode, MetricError, MetricErrorCode, Result, StrategyError,
        StrategyErrorCode,
    },
    estimator::{Estimator, EstimatorKind, FixedAssignments},
    metric::{
        Completeness, Homogeneity, Metric, ScoreRange, VMeasure, completeness_score,
        homogeneity_score, v_measure_score,
    },
    parallel::Parallel,
    strategy::{Categorical, Lottery, PopularityContest},
    transformer::{EPSILON, L2Normalizer, Transformer},
};
