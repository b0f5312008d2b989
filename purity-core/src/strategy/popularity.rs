//! Frequency-weighted guessing over the observed values.

use std::hash::Hash;

use indexmap::IndexMap;
use rand::{Rng, distributions::Distribution, distributions::WeightedIndex};

use crate::error::StrategyError;

use super::Categorical;

/// Guesses each category with probability proportional to how often it was
/// observed.
///
/// # Examples
/// ```
/// use purity_core::{Categorical, PopularityContest};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut contest: PopularityContest<&str> = PopularityContest::new();
/// contest.fit(&["spam", "spam", "spam", "ham"])?;
/// assert_eq!(contest.popularity(&"spam"), Some(3));
///
/// let mut rng = SmallRng::seed_from_u64(11);
/// let guess = contest.guess(&mut rng)?;
/// assert!(guess == "spam" || guess == "ham");
/// # Ok::<(), purity_core::StrategyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PopularityContest<T> {
    categories: Vec<T>,
    counts: Vec<usize>,
    weights: Option<WeightedIndex<usize>>,
}

impl<T> Default for PopularityContest<T> {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            counts: Vec::new(),
            weights: None,
        }
    }
}

impl<T> PopularityContest<T> {
    /// Creates an unfitted contest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many times `category` was observed during fitting.
    #[must_use]
    pub fn popularity<Q>(&self, category: &Q) -> Option<usize>
    where
        T: PartialEq<Q>,
        Q: ?Sized,
    {
        self.categories
            .iter()
            .position(|known| known == category)
            .and_then(|index| self.counts.get(index).copied())
    }
}

impl<T: Clone + Hash + Eq> Categorical<T> for PopularityContest<T> {
    fn fit(&mut self, values: &[T]) -> Result<(), StrategyError> {
        if values.is_empty() {
            return Err(StrategyError::EmptyInput);
        }
        let mut tally: IndexMap<&T, usize> = IndexMap::new();
        for value in values {
            *tally.entry(value).or_insert(0) += 1;
        }
        let counts: Vec<usize> = tally.values().copied().collect();
        // Every tally is at least one, so only an overflowing total can fail here.
        let weights = WeightedIndex::new(&counts).map_err(|_| StrategyError::InvalidWeights)?;

        self.categories = tally.into_keys().cloned().collect();
        self.counts = counts;
        self.weights = Some(weights);
        Ok(())
    }

    fn guess<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<T, StrategyError> {
        let weights = self.weights.as_ref().ok_or(StrategyError::NotFitted)?;
        self.categories
            .get(weights.sample(rng))
            .cloned()
            .ok_or(StrategyError::NotFitted)
    }

    fn is_fitted(&self) -> bool {
        self.weights.is_some()
    }
}
