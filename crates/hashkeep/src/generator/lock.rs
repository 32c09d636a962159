use parking_lot::Mutex;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{JobId, JobIdGenerator, generator::interface::id_from_counter};

/// A lock-based [`JobIdGenerator`] suitable for multi-threaded environments.
///
/// The counter is wrapped in a [`Mutex`], so at most one caller increments it
/// at a time.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Fair access across threads
///
/// ## See Also
/// - [`AtomicJobIdGenerator`]
///
/// [`AtomicJobIdGenerator`]: crate::AtomicJobIdGenerator
#[derive(Debug, Default)]
pub struct LockJobIdGenerator {
    counter: Mutex<u64>,
}

impl LockJobIdGenerator {
    /// Creates a generator whose first ID is `1`.
    pub fn new() -> Self {
        Self::starting_after(0)
    }

    /// Creates a generator whose first ID is `last + 1`.
    ///
    /// Useful in tests that need to exercise a non-zero starting counter.
    pub fn starting_after(last: u64) -> Self {
        Self {
            counter: Mutex::new(last),
        }
    }
}

impl JobIdGenerator for LockJobIdGenerator {
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    fn next_id(&self) -> JobId {
        let mut counter = self.counter.lock();
        let Some(next) = counter.checked_add(1) else {
            panic!("job ID counter overflowed u64");
        };
        *counter = next;
        id_from_counter(next)
    }

    fn current(&self) -> u64 {
        *self.counter.lock()
    }

    fn reset(&self) {
        *self.counter.lock() = 0;
    }
}
