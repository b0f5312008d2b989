//! In-place sample transformers.

/// Smoothing constant shared by every metric and numeric transformer.
///
/// Added to numerators and denominators to keep ratios of counts or norms
/// finite when the denominator can be zero.
pub const EPSILON: f64 = 1e-8;

/// Rewrites a batch of samples in place.
///
/// # Examples
/// ```
/// use purity_core::Transformer;
///
/// struct Negate;
///
/// impl Transformer<i64> for Negate {
///     fn transform(&self, samples: &mut [i64]) {
///         samples.iter_mut().for_each(|sample| *sample = -*sample);
///     }
/// }
///
/// let mut samples = vec![1, -2, 3];
/// Negate.transform(&mut samples);
/// assert_eq!(samples, [-1, 2, -3]);
/// assert_eq!(<Negate as Transformer<i64>>::EPSILON, 1e-8);
/// ```
pub trait Transformer<S> {
    /// Smoothing constant available to numeric implementations.
    const EPSILON: f64 = EPSILON;

    /// Transforms every sample in place.
    fn transform(&self, samples: &mut [S]);
}

/// Scales each dense sample to unit Euclidean length.
///
/// Samples are divided by `norm + EPSILON`, so an all-zero sample stays zero
/// instead of becoming `NaN`.
///
/// # Examples
/// ```
/// use purity_core::{L2Normalizer, Transformer};
///
/// let mut samples = vec![vec![3.0, 4.0], vec![0.0, 0.0]];
/// L2Normalizer.transform(&mut samples);
/// assert!((samples[0][0] - 0.6).abs() < 1e-6);
/// assert!((samples[0][1] - 0.8).abs() < 1e-6);
/// assert_eq!(samples[1], [0.0, 0.0]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct L2Normalizer;

impl Transformer<Vec<f64>> for L2Normalizer {
    #[expect(
        clippy::float_arithmetic,
        reason = "normalisation requires floating-point arithmetic."
    )]
    fn transform(&self, samples: &mut [Vec<f64>]) {
        for sample in samples {
            let norm = sample.iter().map(|value| value * value).sum::<f64>().sqrt();
            let scale = norm + Self::EPSILON;
            sample.iter_mut().for_each(|value| *value /= scale);
        }
    }
}
