//! Trivial guessing strategies used as comparison baselines.
//!
//! A strategy is fitted to a set of observed values and then guesses one of
//! them. The random source is always supplied by the caller: production code
//! passes `rand::thread_rng()`, tests pass a seeded `SmallRng` so guesses are
//! reproducible.

mod lottery;
mod popularity;

use rand::Rng;

use crate::error::StrategyError;

pub use lottery::Lottery;
pub use popularity::PopularityContest;

/// A baseline that guesses categorical values.
///
/// Strategies move one way from unfitted to fitted. Calling
/// [`Categorical::fit`] again replaces what was learned.
pub trait Categorical<T> {
    /// Learns from the observed `values`.
    ///
    /// # Errors
    /// Returns [`StrategyError::EmptyInput`] when `values` is empty; the
    /// previous state is kept in that case.
    fn fit(&mut self, values: &[T]) -> Result<(), StrategyError>;

    /// Guesses a value using `rng` as the source of randomness.
    ///
    /// # Errors
    /// Returns [`StrategyError::NotFitted`] when called before a successful
    /// [`Categorical::fit`].
    fn guess<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<T, StrategyError>;

    /// Returns whether the strategy has been fitted.
    fn is_fitted(&self) -> bool;
}
