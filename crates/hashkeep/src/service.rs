//! Job dispatch and the synchronous digest path.
//!
//! This module defines [`HashService`], the handle the routing layer talks
//! to. It ties together a [`JobIdGenerator`], the shared [`ResultStore`], and
//! the configured artificial delay.
//!
//! ## Responsibilities
//!
//! - Reserve a [`JobId`] on the caller's path and return it immediately.
//! - Run each digest on its own Tokio task that sleeps, hashes, and publishes
//!   exactly once. Jobs are never cancelled or retried.
//! - Serve lookups and statistics from the [`ResultStore`].
//! - Drain in-flight jobs at shutdown, bounded by a grace period.
//!
//! Every clone of a [`HashService`] shares the same generator, store, and job
//! tracker, so handles can be passed into request handlers instead of relying
//! on process-wide globals.

use core::time::Duration;
use std::sync::Arc;
use std::time::Instant;

use tokio::time::{sleep, timeout};
use tokio_util::task::TaskTracker;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    EncodedDigest, Error, JobId, JobIdGenerator, LockJobIdGenerator, Result, ResultStore, Stats,
    digest,
};

/// Delay applied before every digest unless configured otherwise.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(5);

struct Shared<G> {
    generator: G,
    store: ResultStore,
    delay: Duration,
    jobs: TaskTracker,
}

/// Cloneable handle to the digest job service.
pub struct HashService<G = LockJobIdGenerator> {
    shared: Arc<Shared<G>>,
}

impl<G> Clone for HashService<G> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl HashService<LockJobIdGenerator> {
    /// Creates a service backed by a fresh [`LockJobIdGenerator`] and an empty
    /// [`ResultStore`].
    pub fn new(delay: Duration) -> Self {
        Self::with_generator(LockJobIdGenerator::new(), delay)
    }
}

impl Default for HashService<LockJobIdGenerator> {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl<G> HashService<G>
where
    G: JobIdGenerator + 'static,
{
    pub fn with_generator(generator: G, delay: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                generator,
                store: ResultStore::new(),
                delay,
                jobs: TaskTracker::new(),
            }),
        }
    }

    pub fn delay(&self) -> Duration {
        self.shared.delay
    }

    pub fn store(&self) -> &ResultStore {
        &self.shared.store
    }

    pub fn generator(&self) -> &G {
        &self.shared.generator
    }

    /// Starts an asynchronous digest job and returns its ID immediately.
    ///
    /// The ID is reserved before this returns. The background task sleeps for
    /// [`HashService::delay`], starts its processing timer, hashes `password`,
    /// and publishes the result to the store. Processing time therefore
    /// covers only the hashing, not the delay.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    #[cfg_attr(feature = "tracing", instrument(skip_all, fields(id)))]
    pub fn start(&self, password: impl Into<String>) -> JobId {
        let id = self.shared.generator.next_id();
        let password = password.into();

        #[cfg(feature = "tracing")]
        tracing::Span::current().record("id", id.get());

        let fut = run_job(Arc::clone(&self.shared), id, password);
        #[cfg(feature = "tracing")]
        let fut = {
            use tracing::Instrument;
            fut.instrument(tracing::debug_span!("digest_job", %id))
        };
        self.shared.jobs.spawn(fut);

        id
    }

    /// Sleeps for the configured delay and returns the digest of `password`
    /// on the caller's path.
    ///
    /// No ID is minted and the store and stats are left untouched.
    #[cfg_attr(feature = "tracing", instrument(skip_all))]
    pub async fn compute_sync(&self, password: &str) -> EncodedDigest {
        sleep(self.shared.delay).await;
        digest(password)
    }

    /// Returns the digest published under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing is published under `id`. That
    /// covers a job still in progress, an ID never issued, and an ID cleared
    /// by [`HashService::reset`]; the caller may retry.
    pub fn lookup(&self, id: JobId) -> Result<EncodedDigest> {
        self.shared.store.get(id).ok_or(Error::NotFound { id })
    }

    pub fn stats(&self) -> Stats {
        self.shared.store.stats()
    }

    /// Number of background jobs that have not yet published.
    pub fn in_flight(&self) -> usize {
        self.shared.jobs.len()
    }

    /// Waits up to `grace` for in-flight jobs to publish.
    ///
    /// Returns the number of jobs still running when the grace period ran
    /// out. Those are abandoned when the runtime shuts down and their results
    /// are lost.
    #[cfg_attr(feature = "tracing", instrument(skip(self)))]
    pub async fn drain(&self, grace: Duration) -> usize {
        let jobs = &self.shared.jobs;
        jobs.close();

        #[cfg(feature = "tracing")]
        tracing::info!("Draining in-flight digest jobs ({} active)", jobs.len());

        let result = timeout(grace, jobs.wait()).await;
        // Reopen so a service that keeps running after a drain still tracks
        // new jobs normally.
        jobs.reopen();

        match result {
            Ok(()) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("All digest jobs drained");
                0
            }
            Err(_) => {
                let remaining = jobs.len();
                #[cfg(feature = "tracing")]
                tracing::warn!("Drain timed out ({remaining} digest jobs abandoned)");
                remaining
            }
        }
    }

    /// Clears the store and restarts ID issuance at `1`.
    ///
    /// Callers must not reset while jobs are in flight: a job started before
    /// the reset may publish under an ID that gets reissued afterwards.
    pub fn reset(&self) {
        self.shared.store.reset();
        self.shared.generator.reset();
    }
}

async fn run_job<G>(shared: Arc<Shared<G>>, id: JobId, password: String) {
    sleep(shared.delay).await;

    let start = Instant::now();
    let value = digest(&password);
    let replaced = shared.store.set(id, value, start);

    debug_assert!(replaced.is_none(), "job {id} was published twice");
    #[cfg(feature = "tracing")]
    tracing::debug!(%id, "digest published");
}
