//! Shared table of completed digests plus aggregate timing.
//!
//! The [`ResultStore`] is written once per finished background job and read
//! by any number of concurrent lookups. Both the record map and the running
//! processing-time total live behind a single [`RwLock`], so a reader sees
//! either all of a `set` or none of it, and [`ResultStore::snapshot`] never
//! returns a count/time pair that straddles a concurrent write.

use core::time::Duration;
use std::collections::HashMap;
use std::time::Instant;

use parking_lot::RwLock;

use crate::{EncodedDigest, JobId, Stats};

/// A completed digest job. Immutable once published.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DigestRecord {
    pub id: JobId,
    pub value: EncodedDigest,
    pub processing_time: Duration,
}

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<JobId, DigestRecord>,
    // Always equal to the sum of `processing_time` over `records`.
    total_time: Duration,
}

/// Concurrent map from [`JobId`] to its published digest.
#[derive(Debug, Default)]
pub struct ResultStore {
    inner: RwLock<Inner>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `value` under `id`, charging `start.elapsed()` as its
    /// processing time.
    ///
    /// Returns the replaced record if `id` was already present. IDs are unique
    /// under correct use, so a replacement indicates a logic error upstream;
    /// the totals are still kept consistent by backing out the old record's
    /// time.
    pub fn set(&self, id: JobId, value: EncodedDigest, start: Instant) -> Option<DigestRecord> {
        let mut inner = self.inner.write();
        let processing_time = start.elapsed();
        inner.total_time += processing_time;

        let replaced = inner.records.insert(
            id,
            DigestRecord {
                id,
                value,
                processing_time,
            },
        );

        if let Some(old) = &replaced {
            inner.total_time = inner.total_time.saturating_sub(old.processing_time);
            #[cfg(feature = "tracing")]
            tracing::error!(%id, "digest record overwritten; job IDs are not unique");
        }

        replaced
    }

    /// Looks up the digest published under `id`.
    pub fn get(&self, id: JobId) -> Option<EncodedDigest> {
        self.inner.read().records.get(&id).map(|r| r.value.clone())
    }

    /// Returns the full record published under `id`.
    pub fn record(&self, id: JobId) -> Option<DigestRecord> {
        self.inner.read().records.get(&id).cloned()
    }

    /// Returns the record count and summed processing time from one read.
    pub fn snapshot(&self) -> (u64, Duration) {
        let inner = self.inner.read();
        (inner.records.len() as u64, inner.total_time)
    }

    pub fn stats(&self) -> Stats {
        let (count, total_time) = self.snapshot();
        Stats::from_totals(count, total_time)
    }

    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every record and zeroes the processing-time total.
    pub fn reset(&self) {
        let mut inner = self.inner.write();
        inner.records.clear();
        inner.total_time = Duration::ZERO;
    }
}
