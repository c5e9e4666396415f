//! Partitioning of n-dimensional point sets into prefix-labelled areas.

mod bounding_box;
mod config;
mod error;
pub mod io;
pub mod partition;
mod point_set;

pub use bounding_box::BoundingBox;
pub use config::{
    PartitionConfig, DEFAULT_FIELD_SIZE, DEFAULT_MAX_PREFIX_LEN, DEFAULT_MIN_POINTS_PER_LEAF,
};
pub use error::{AreaError, AreaError as Error, Result};
pub use io::{Area, AreaList};
pub use partition::{
    AxisSelector, LeafVisitor, NodeId, Partition, PartitionNode, PartitionStats, RoundRobin,
};
pub use point_set::{MedianSplit, PointSet};
