//! Single-shot, idempotent shutdown signal.
//!
//! [`ShutdownSignal`] wraps a [`CancellationToken`]: cancelling it more than
//! once is a no-op, and every waiter (current or future) is released once it
//! fires. An extra atomic flag records which caller actually fired it, so the
//! owner can log the transition exactly once.

use portable_atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A broadcast stop signal with two states: armed and fired.
///
/// Clones share the same underlying signal.
#[derive(Clone, Debug, Default)]
pub struct ShutdownSignal {
    token: CancellationToken,
    fired: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires the signal.
    ///
    /// Returns `true` only for the call that transitioned the signal from
    /// armed to fired. Any later or concurrent call returns `false` and has no
    /// other effect.
    pub fn trigger(&self) -> bool {
        let first = !self.fired.swap(true, Ordering::AcqRel);
        self.token.cancel();
        #[cfg(feature = "tracing")]
        if first {
            tracing::info!("Shutdown signal fired");
        }
        first
    }

    pub fn is_fired(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Waits until the signal fires. Returns immediately if it already has.
    pub async fn wait(&self) {
        self.token.cancelled().await;
    }

    /// Returns a token that is cancelled when this signal fires.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}
