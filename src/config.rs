//! Construction parameters for `ChainedHashMap`.

use crate::error::MapError;

/// Bucket-table length of a freshly constructed map.
pub const DEFAULT_INITIAL_BUCKETS: usize = 101;

/// Fill ratio (`len / bucket_count`) above which the next insert grows the table.
pub const DEFAULT_MAX_FILL_RATIO: f64 = 0.5;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MapConfig {
    pub initial_buckets: usize,
    pub max_fill_ratio: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_buckets: DEFAULT_INITIAL_BUCKETS,
            max_fill_ratio: DEFAULT_MAX_FILL_RATIO,
        }
    }
}

impl MapConfig {
    pub fn with_initial_buckets(mut self, buckets: usize) -> Self {
        self.initial_buckets = buckets;
        self
    }

    pub fn with_max_fill_ratio(mut self, ratio: f64) -> Self {
        self.max_fill_ratio = ratio;
        self
    }

    /// Reject parameters that would make bucket indexing or the growth
    /// trigger meaningless.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.initial_buckets == 0 {
            return Err(MapError::InvalidConfig("initial_buckets must be non-zero"));
        }
        if !self.max_fill_ratio.is_finite() || self.max_fill_ratio <= 0.0 {
            return Err(MapError::InvalidConfig(
                "max_fill_ratio must be finite and greater than zero",
            ));
        }
        Ok(())
    }
}
