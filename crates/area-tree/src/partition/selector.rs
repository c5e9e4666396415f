//! Split axis selection.
//!
//! Areas are cut along a fixed schedule of dimensions that depends only on the
//! depth of the node, so a prefix can be decoded without knowing the points.

/// Strategy for choosing the dimension a node at a given depth is split on.
pub trait AxisSelector {
    /// Returns the dimension (`0..dimensions`) to bisect at `depth`.
    fn axis(&self, depth: usize, dimensions: usize) -> usize;
}

/// Cycles through the dimensions in order: `depth mod dimensions`.
///
/// After `dimensions` levels every axis has been cut exactly once.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobin;

impl AxisSelector for RoundRobin {
    #[inline]
    fn axis(&self, depth: usize, dimensions: usize) -> usize {
        depth % dimensions
    }
}
