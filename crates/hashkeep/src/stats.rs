use core::time::Duration;

/// Aggregate timing over every published digest record.
///
/// Derived from one consistent read of the [`ResultStore`]; never stored.
///
/// [`ResultStore`]: crate::ResultStore
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    /// Number of completed records.
    pub total: u64,
    /// Mean processing time in milliseconds, or `0.0` when `total` is zero.
    pub average: f64,
}

impl Stats {
    /// Builds a snapshot from a record count and the summed processing time.
    pub fn from_totals(count: u64, total_time: Duration) -> Self {
        let average = if count == 0 {
            0.0
        } else {
            total_time.as_secs_f64() * 1_000.0 / count as f64
        };
        Self {
            total: count,
            average,
        }
    }
}
