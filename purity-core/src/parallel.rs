//! Degree-of-parallelism configuration surface.

use std::num::NonZeroUsize;

/// Components whose work can be spread across several workers.
///
/// The trait only carries configuration; implementers decide how the
/// configured degree is honoured.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use purity_core::Parallel;
///
/// struct Pool(NonZeroUsize);
///
/// impl Parallel for Pool {
///     fn set_workers(&mut self, workers: NonZeroUsize) { self.0 = workers; }
///     fn workers(&self) -> NonZeroUsize { self.0 }
/// }
///
/// let mut pool = Pool(NonZeroUsize::MIN);
/// pool.set_workers(NonZeroUsize::new(4).expect("four is non-zero"));
/// assert_eq!(pool.workers().get(), 4);
/// ```
pub trait Parallel {
    /// Sets the maximum number of workers to run concurrently.
    fn set_workers(&mut self, workers: NonZeroUsize);

    /// Returns the configured maximum number of workers.
    fn workers(&self) -> NonZeroUsize;
}
