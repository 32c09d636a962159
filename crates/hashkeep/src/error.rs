//! Error types for the digest job service.
//!
//! Most `hashkeep` operations are infallible: digests accept any input, IDs
//! are always available, and background jobs cannot fail. The variants below
//! cover the few outcomes a caller must branch on.
//!
//! ## Error Cases
//! - `NotFound`: No record is published for the ID (yet, ever, or anymore).
//! - `InvalidJobId`: Text that does not parse into a positive [`JobId`].

use crate::JobId;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the digest job service.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// No record is published under this ID.
    ///
    /// The job may still be running, the ID may never have been issued, or it
    /// may have been cleared by a reset. These cases are not distinguished.
    #[error("Id {id} not found")]
    NotFound { id: JobId },

    /// The input could not be parsed as a positive job ID.
    #[error("Invalid ID: {input:?}")]
    InvalidJobId { input: String },
}
