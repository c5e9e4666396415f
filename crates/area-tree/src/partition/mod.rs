//! Median-bisection partition tree.
//!
//! This module splits a point set into prefix-labelled areas. Starting from a
//! root box covering the whole field, every node holding at least two points
//! is bisected at the median of its points along one dimension, and the two
//! halves become its children. The leaves form a set of boxes that cover the
//! root box without overlapping (apart from shared faces).
//!
//! # Example
//!
//! ```ignore
//! use area_tree::{Partition, PartitionConfig, PointSet};
//!
//! let points = PointSet::from_rows(2, [[-5.0, -5.0], [-5.0, 5.0], [5.0, -5.0], [5.0, 5.0]])?;
//! let config = PartitionConfig::new().with_field_size(10.0);
//! let partition = Partition::build(points, &config)?;
//!
//! for leaf in partition.leaves() {
//!     println!("{} {:?}", leaf.prefix(), leaf.bounds());
//! }
//! ```
//!
//! # Architecture
//!
//! - [`Partition`]: arena of nodes plus the input and configuration
//! - [`PartitionNode`]: a region, its prefix, and either points or children
//! - [`AxisSelector`]: strategy choosing the split dimension per depth
//! - [`LeafVisitor`]: visitor trait for custom leaf processing

mod node;
mod selector;
mod tree;
mod visitor;

// Re-export main types
pub use node::{Children, NodeId, PartitionNode, Split};
pub use selector::{AxisSelector, RoundRobin};
pub use tree::{Leaves, Partition, PartitionStats};
pub use visitor::{CollectingVisitor, FnVisitor, LeafVisitor};
