use crate::JobId;

/// A minimal interface for minting [`JobId`]s.
///
/// Implementations hold a counter starting at zero. Every call to
/// [`JobIdGenerator::next_id`] atomically increments it and returns the new
/// value, so the first ID is `1`. For `N` concurrent callers starting from a
/// counter value of `k`, the returned IDs are exactly `k+1..=k+N`: no
/// duplicates and no lost updates.
pub trait JobIdGenerator: Send + Sync {
    /// Reserves and returns the next ID.
    ///
    /// # Panics
    ///
    /// Panics if the counter would overflow `u64`.
    fn next_id(&self) -> JobId;

    /// Returns the most recently issued raw counter value (`0` if none).
    fn current(&self) -> u64;

    /// Resets the counter back to zero.
    ///
    /// This exists for test isolation. Callers must not reset while jobs may
    /// be in flight: a subsequently issued ID can collide with one that is
    /// still about to be published.
    fn reset(&self);
}

pub(crate) fn id_from_counter(value: u64) -> JobId {
    match JobId::new(value) {
        Some(id) => id,
        None => panic!("job ID counter overflowed u64"),
    }
}
