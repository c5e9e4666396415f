//! Partition tree node implementation.

use std::fmt;

use crate::{BoundingBox, PointSet};

/// Index of a node inside a [`Partition`](super::Partition) arena.
///
/// Ids are handed out in creation order: the root is `0`, both children of a
/// node are numbered when the node is split, and the lower subtree is built
/// before the upper one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root of every partition.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The cut made at an internal node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split {
    /// Dimension the node was bisected along.
    pub dim: usize,
    /// Coordinate of the cut; the lower child ends here, the upper starts here.
    pub coord: f64,
}

/// The two children of an internal node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Children {
    pub lower: NodeId,
    pub upper: NodeId,
    pub split: Split,
}

/// A node in the partition tree.
///
/// A node is either a leaf, possibly holding the points that fell into its
/// region, or an internal node with exactly two children and no points.
///
/// # Retained points
///
/// - A leaf stopped by the depth limit, or holding fewer than two points,
///   keeps its points.
/// - A leaf whose half was at or below the minimum size holds no points.
#[derive(Debug, Clone)]
pub struct PartitionNode {
    id: NodeId,
    parent: Option<NodeId>,
    prefix: String,
    depth: usize,
    bounds: BoundingBox,
    pub(crate) points: Option<PointSet>,
    pub(crate) children: Option<Children>,
}

impl PartitionNode {
    pub(crate) fn new(
        id: NodeId,
        parent: Option<NodeId>,
        prefix: String,
        depth: usize,
        bounds: BoundingBox,
        points: Option<PointSet>,
    ) -> Self {
        Self {
            id,
            parent,
            prefix,
            depth,
            bounds,
            points,
            children: None,
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the parent, or `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Binary path from the root: one `0` (lower) or `1` (upper) per level.
    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Number of splits between the root and this node.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The region this node is responsible for.
    #[inline]
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Points retained by a leaf. Always `None` for internal nodes.
    #[inline]
    pub fn points(&self) -> Option<&PointSet> {
        self.points.as_ref()
    }

    /// Number of retained points (0 when none are held).
    pub fn point_count(&self) -> usize {
        self.points.as_ref().map_or(0, PointSet::len)
    }

    #[inline]
    pub fn children(&self) -> Option<&Children> {
        self.children.as_ref()
    }

    #[inline]
    pub fn lower(&self) -> Option<NodeId> {
        self.children.map(|c| c.lower)
    }

    #[inline]
    pub fn upper(&self) -> Option<NodeId> {
        self.children.map(|c| c.upper)
    }

    /// The cut made at this node, if it is internal.
    #[inline]
    pub fn split(&self) -> Option<Split> {
        self.children.map(|c| c.split)
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(points: Option<PointSet>) -> PartitionNode {
        PartitionNode::new(
            NodeId::ROOT,
            None,
            String::new(),
            0,
            BoundingBox::cube(2, 1.0),
            points,
        )
    }

    #[test]
    fn new_node_is_leaf() {
        let node = leaf(None);
        assert!(node.is_leaf());
        assert_eq!(node.point_count(), 0);
        assert!(node.split().is_none());
        assert!(node.lower().is_none());
        assert!(node.parent().is_none());
    }

    #[test]
    fn point_count_reads_retained_set() {
        let points = PointSet::from_rows(2, [[0.0, 0.0], [0.5, 0.5]]).unwrap();
        let node = leaf(Some(points));
        assert_eq!(node.point_count(), 2);
    }

    #[test]
    fn children_make_node_internal() {
        let mut node = leaf(None);
        node.children = Some(Children {
            lower: NodeId(1),
            upper: NodeId(2),
            split: Split { dim: 0, coord: 0.0 },
        });

        assert!(!node.is_leaf());
        assert_eq!(node.lower(), Some(NodeId(1)));
        assert_eq!(node.upper(), Some(NodeId(2)));
        assert_eq!(node.split().map(|s| s.dim), Some(0));
    }

    #[test]
    fn node_id_display() {
        assert_eq!(NodeId(7).to_string(), "7");
        assert_eq!(NodeId::ROOT.index(), 0);
    }
}
