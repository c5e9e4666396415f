//! Partitioning policy.

use crate::{AreaError, BoundingBox, Result};

/// Default maximum prefix length in bits.
pub const DEFAULT_MAX_PREFIX_LEN: usize = 32;

/// Default threshold at or below which a half is not kept.
pub const DEFAULT_MIN_POINTS_PER_LEAF: usize = 1;

/// Default half extent of the field in every dimension.
pub const DEFAULT_FIELD_SIZE: f64 = 1000.0;

/// Stopping policy and extent used when building a [`Partition`](crate::Partition).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartitionConfig {
    /// Maximum tree depth, which is also the longest prefix produced.
    pub max_prefix_len: usize,
    /// A half with this many points or fewer becomes an empty leaf.
    pub min_points_per_leaf: usize,
    /// The root box is `[-field_size, field_size]` in every dimension.
    pub field_size: f64,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            max_prefix_len: DEFAULT_MAX_PREFIX_LEN,
            min_points_per_leaf: DEFAULT_MIN_POINTS_PER_LEAF,
            field_size: DEFAULT_FIELD_SIZE,
        }
    }
}

impl PartitionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum prefix length (tree depth).
    pub fn with_max_prefix_len(mut self, max_prefix_len: usize) -> Self {
        self.max_prefix_len = max_prefix_len;
        self
    }

    /// Sets the minimum number of points a half needs to be kept.
    pub fn with_min_points_per_leaf(mut self, min_points_per_leaf: usize) -> Self {
        self.min_points_per_leaf = min_points_per_leaf;
        self
    }

    /// Sets the half extent of the root box.
    pub fn with_field_size(mut self, field_size: f64) -> Self {
        self.field_size = field_size;
        self
    }

    /// Checks that the field size describes a non-degenerate box.
    pub fn validate(&self) -> Result<()> {
        if !self.field_size.is_finite() || self.field_size <= 0.0 {
            return Err(AreaError::InvalidConfig(format!(
                "field size must be a positive finite number, got {}",
                self.field_size
            )));
        }
        Ok(())
    }

    /// The box covered by the root of a partition in `dimensions` dimensions.
    pub fn root_box(&self, dimensions: usize) -> BoundingBox {
        BoundingBox::cube(dimensions, self.field_size)
    }
}
