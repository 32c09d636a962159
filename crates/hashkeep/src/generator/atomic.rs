use portable_atomic::{AtomicU64, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{JobId, JobIdGenerator, generator::interface::id_from_counter};

/// A lock-free [`JobIdGenerator`] backed by an [`AtomicU64`].
///
/// Each call is a single `fetch_add`, so concurrent callers never block each
/// other. Fairness between threads is not guaranteed.
///
/// ## See Also
/// - [`LockJobIdGenerator`]
///
/// [`LockJobIdGenerator`]: crate::LockJobIdGenerator
#[derive(Debug, Default)]
pub struct AtomicJobIdGenerator {
    counter: AtomicU64,
}

impl AtomicJobIdGenerator {
    /// Creates a generator whose first ID is `1`.
    pub const fn new() -> Self {
        Self::starting_after(0)
    }

    /// Creates a generator whose first ID is `last + 1`.
    pub const fn starting_after(last: u64) -> Self {
        Self {
            counter: AtomicU64::new(last),
        }
    }
}

impl JobIdGenerator for AtomicJobIdGenerator {
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    fn next_id(&self) -> JobId {
        // AcqRel keeps the reservation ordered with whatever the caller
        // publishes under this ID afterwards.
        let prev = self.counter.fetch_add(1, Ordering::AcqRel);
        if prev == u64::MAX {
            panic!("job ID counter overflowed u64");
        }
        id_from_counter(prev + 1)
    }

    fn current(&self) -> u64 {
        self.counter.load(Ordering::Acquire)
    }

    fn reset(&self) {
        self.counter.store(0, Ordering::Release);
    }
}
