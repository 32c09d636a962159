use core::{fmt, num::NonZeroU64, str::FromStr};

use crate::Error;

/// Caller-visible handle for an asynchronous digest job.
///
/// A `JobId` is always positive. IDs are minted only by a [`JobIdGenerator`]
/// and are strictly increasing in issuance order; they are not guaranteed to
/// be contiguous across a reset.
///
/// [`JobIdGenerator`]: crate::JobIdGenerator
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(transparent)]
pub struct JobId(NonZeroU64);

impl JobId {
    /// Returns `None` for zero, which is never a valid job ID.
    pub const fn new(raw: u64) -> Option<Self> {
        match NonZeroU64::new(raw) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    /// Returns the raw integer value.
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<JobId> for u64 {
    fn from(id: JobId) -> Self {
        id.get()
    }
}

impl TryFrom<u64> for JobId {
    type Error = Error;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| Error::InvalidJobId {
            input: raw.to_string(),
        })
    }
}

impl FromStr for JobId {
    type Err = Error;

    /// Parses a plain run of ASCII digits.
    ///
    /// Signs, whitespace, and zero are rejected: `u64::from_str` alone would
    /// accept a leading `+`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidJobId {
            input: s.to_string(),
        };

        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        s.parse::<u64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(invalid)
    }
}
