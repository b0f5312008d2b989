//! Uniform guessing over the distinct observed values.

use std::hash::Hash;

use indexmap::IndexSet;
use rand::{Rng, seq::SliceRandom};

use crate::error::StrategyError;

use super::Categorical;

/// Holds a lottery in which every distinct category has an equal chance.
///
/// How often a value was observed does not matter, only that it was.
///
/// # Examples
/// ```
/// use purity_core::{Categorical, Lottery, StrategyError};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let mut lottery: Lottery<i32> = Lottery::new();
/// assert_eq!(lottery.guess(&mut rng), Err(StrategyError::NotFitted));
///
/// lottery.fit(&[1, 1, 2, 3])?;
/// let guess = lottery.guess(&mut rng)?;
/// assert!([1, 2, 3].contains(&guess));
/// # Ok::<(), StrategyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lottery<T> {
    categories: Vec<T>,
}

impl<T> Default for Lottery<T> {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
        }
    }
}

impl<T> Lottery<T> {
    /// Creates an unfitted lottery.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the distinct categories in order of first observation.
    #[must_use]
    pub fn categories(&self) -> &[T] {
        &self.categories
    }
}

impl<T: Clone + Hash + Eq> Categorical<T> for Lottery<T> {
    fn fit(&mut self, values: &[T]) -> Result<(), StrategyError> {
        if values.is_empty() {
            return Err(StrategyError::EmptyInput);
        }
        let distinct: IndexSet<&T> = values.iter().collect();
        self.categories = distinct.into_iter().cloned().collect();
        Ok(())
    }

    fn guess<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<T, StrategyError> {
        self.categories
            .choose(rng)
            .cloned()
            .ok_or(StrategyError::NotFitted)
    }

    fn is_fitted(&self) -> bool {
        !self.categories.is_empty()
    }
}
