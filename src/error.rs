//! Failure taxonomy for `ChainedHashMap`.

use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    /// The bucket table could not be allocated. On growth the map keeps its
    /// previous table and every entry.
    #[error("failed to allocate a bucket table of {buckets} slots")]
    TableAlloc {
        buckets: usize,
        #[source]
        source: TryReserveError,
    },

    /// Doubling the bucket table would overflow `usize`.
    #[error("bucket table of {buckets} slots cannot grow any further")]
    CapacityOverflow { buckets: usize },

    #[error("invalid map configuration: {0}")]
    InvalidConfig(&'static str),
}
