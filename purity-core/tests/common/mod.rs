use purity_core::{Estimator, EstimatorError, EstimatorKind};

/// Buckets one-dimensional samples by comparing them against sorted cut
/// points. Sample `x` lands in cluster `i` where `i` counts the cut points
/// at or below `x`.
#[derive(Clone, Debug)]
pub struct ThresholdClusterer {
    cuts: Vec<f64>,
}

impl ThresholdClusterer {
    #[must_use]
    pub fn new(mut cuts: Vec<f64>) -> Self {
        cuts.sort_by(f64::total_cmp);
        Self { cuts }
    }
}

impl Estimator<f64> for ThresholdClusterer {
    type Prediction = usize;

    fn kind(&self) -> EstimatorKind {
        EstimatorKind::Clusterer
    }

    fn predict(&self, samples: &[f64]) -> Result<Vec<usize>, EstimatorError> {
        samples
            .iter()
            .enumerate()
            .map(|(index, sample)| {
                if sample.is_nan() {
                    return Err(EstimatorError::UnknownSample { index });
                }
                Ok(self.cuts.iter().filter(|cut| **cut <= *sample).count())
            })
            .collect()
    }
}
