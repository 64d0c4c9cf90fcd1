//! Error types for the `chainmap` crate

/// Errors raised by [`ChainMap`](crate::ChainMap) construction and by the
/// explicit iteration protocol on [`Iter`](crate::map::Iter).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The map was asked for zero buckets.
    ///
    /// Bucket selection is `hash % capacity`, which has no meaning for a
    /// capacity of zero, so this is rejected when the map is built rather
    /// than on first use.
    #[error("capacity must be at least one bucket")]
    ZeroCapacity,

    /// [`Iter::try_next`](crate::map::Iter::try_next) was called after the
    /// iterator reported no further entries.
    #[error("iteration is exhausted, no further entries")]
    Exhausted,
}
