//! Dataset abstractions supplying samples and ground-truth labels.

use std::sync::Arc;

use crate::error::DatasetError;

/// A named, ordered batch of samples with optional ground-truth labels.
///
/// # Examples
/// ```
/// use purity_core::{Dataset, Labeled, Unlabeled};
///
/// let labeled = Labeled::new("demo", vec![1.0, 2.0], vec!["x", "y"])?;
/// assert_eq!(labeled.num_rows(), 2);
/// assert_eq!(labeled.labels(), Some(&["x", "y"][..]));
///
/// let unlabeled: Unlabeled<f64> = Unlabeled::new("raw", vec![3.0]);
/// assert!(unlabeled.labels().is_none());
/// # Ok::<(), purity_core::DatasetError>(())
/// ```
pub trait Dataset {
    /// Individual sample handed to an estimator.
    type Sample;
    /// Ground-truth label paired with each sample.
    type Label;

    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Returns the samples in row order.
    fn samples(&self) -> &[Self::Sample];

    /// Returns the ground-truth labels parallel to [`Dataset::samples`], or
    /// `None` when the dataset is unlabeled.
    fn labels(&self) -> Option<&[Self::Label]>;

    /// Returns the number of rows in the dataset.
    fn num_rows(&self) -> usize {
        self.samples().len()
    }

    /// Returns whether the dataset contains no rows.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }
}

impl<D: Dataset + ?Sized> Dataset for &D {
    type Sample = D::Sample;
    type Label = D::Label;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn samples(&self) -> &[Self::Sample] {
        (**self).samples()
    }

    fn labels(&self) -> Option<&[Self::Label]> {
        (**self).labels()
    }

    fn num_rows(&self) -> usize {
        (**self).num_rows()
    }
}

/// Dataset without ground truth.
#[derive(Debug, Clone, PartialEq)]
pub struct Unlabeled<S> {
    name: Arc<str>,
    samples: Vec<S>,
}

impl<S> Unlabeled<S> {
    /// Creates an unlabeled dataset.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, samples: Vec<S>) -> Self {
        Self {
            name: name.into(),
            samples,
        }
    }
}

impl<S> Dataset for Unlabeled<S> {
    type Sample = S;
    type Label = ();

    fn name(&self) -> &str {
        &self.name
    }

    fn samples(&self) -> &[S] {
        &self.samples
    }

    fn labels(&self) -> Option<&[()]> {
        None
    }
}

/// Dataset whose every sample carries a ground-truth label.
#[derive(Debug, Clone, PartialEq)]
pub struct Labeled<S, L> {
    name: Arc<str>,
    samples: Vec<S>,
    labels: Vec<L>,
}

impl<S, L> Labeled<S, L> {
    /// Creates a labeled dataset from parallel samples and labels.
    ///
    /// # Errors
    /// Returns [`DatasetError::LabelCountMismatch`] when `samples` and `labels`
    /// differ in length.
    pub fn new(
        name: impl Into<Arc<str>>,
        samples: Vec<S>,
        labels: Vec<L>,
    ) -> Result<Self, DatasetError> {
        let name = name.into();
        if samples.len() != labels.len() {
            return Err(DatasetError::LabelCountMismatch {
                dataset: name,
                samples: samples.len(),
                labels: labels.len(),
            });
        }
        Ok(Self {
            name,
            samples,
            labels,
        })
    }

    /// Drops the labels, yielding an [`Unlabeled`] dataset over the same samples.
    #[must_use]
    pub fn into_unlabeled(self) -> Unlabeled<S> {
        Unlabeled {
            name: self.name,
            samples: self.samples,
        }
    }
}

impl<S, L> Dataset for Labeled<S, L> {
    type Sample = S;
    type Label = L;

    fn name(&self) -> &str {
        &self.name
    }

    fn samples(&self) -> &[S] {
        &self.samples
    }

    fn labels(&self) -> Option<&[L]> {
        Some(&self.labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labeled_rejects_mismatched_lengths() {
        let err = Labeled::new("demo", vec![1, 2, 3], vec!['a'])
            .expect_err("three samples cannot share one label");
        assert_eq!(
            err,
            DatasetError::LabelCountMismatch {
                dataset: Arc::from("demo"),
                samples: 3,
                labels: 1,
            }
        );
    }

    #[test]
    fn empty_labeled_dataset_is_valid() {
        let dataset: Labeled<u8, u8> =
            Labeled::new("empty", Vec::new(), Vec::new()).expect("empty dataset is valid");
        assert!(dataset.is_empty());
        assert_eq!(dataset.labels().map(<[u8]>::len), Some(0));
    }

    #[test]
    fn into_unlabeled_keeps_samples_and_name() {
        let dataset = Labeled::new("demo", vec![4, 5], vec!["x", "y"]).expect("lengths match");
        let unlabeled = dataset.into_unlabeled();
        assert_eq!(unlabeled.name(), "demo");
        assert_eq!(unlabeled.samples(), &[4, 5]);
        assert!(unlabeled.labels().is_none());
    }
}
