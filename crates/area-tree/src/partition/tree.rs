//! Partition container and construction.

use tracing::{debug, trace};

use crate::io::AreaList;
use crate::{AreaError, BoundingBox, PartitionConfig, PointSet, Result};

use super::node::{Children, NodeId, PartitionNode, Split};
use super::selector::{AxisSelector, RoundRobin};
use super::visitor::{CollectingVisitor, FnVisitor, LeafVisitor};

/// A finished median-bisection partition of a point set.
///
/// Nodes live in a flat arena indexed by [`NodeId`]; the root is
/// [`NodeId::ROOT`] and children always have larger ids than their parent.
///
/// # Construction
///
/// ```ignore
/// use area_tree::{Partition, PartitionConfig, PointSet};
///
/// let points = PointSet::from_rows(2, [[-5.0, -5.0], [5.0, 5.0]])?;
/// let partition = Partition::build(points, &PartitionConfig::default())?;
/// ```
///
/// # Traversal
///
/// Leaves are visited depth-first with the lower child first, which is also
/// the order areas appear in an exported area list.
#[derive(Debug, Clone)]
pub struct Partition {
    nodes: Vec<PartitionNode>,
    input: PointSet,
    config: PartitionConfig,
}

/// Summary figures of a finished partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartitionStats {
    /// Total number of nodes, internal ones included.
    pub nodes: usize,
    pub leaves: usize,
    /// Leaves that hold no points.
    pub empty_leaves: usize,
    /// Depth of the deepest leaf.
    pub max_depth: usize,
    /// Largest number of points retained by a single leaf.
    pub max_leaf_points: usize,
}

impl Partition {
    /// Builds a partition using round-robin axis selection.
    pub fn build(points: PointSet, config: &PartitionConfig) -> Result<Self> {
        Self::build_with(points, config, &RoundRobin)
    }

    /// Builds a partition using the provided [`AxisSelector`].
    ///
    /// The root covers [`PartitionConfig::root_box`]. A node is split when it
    /// holds at least two points and is shallower than
    /// [`PartitionConfig::max_prefix_len`]; a resulting half with
    /// [`PartitionConfig::min_points_per_leaf`] points or fewer becomes an
    /// empty leaf.
    ///
    /// Fails with [`AreaError::PointOutsideField`] if a point lies outside
    /// the root box; points on its faces are accepted.
    pub fn build_with<S: AxisSelector>(
        points: PointSet,
        config: &PartitionConfig,
        selector: &S,
    ) -> Result<Self> {
        config.validate()?;

        let dimensions = points.dimensions();
        let field = config.root_box(dimensions);
        if let Some(index) = points
            .iter()
            .position(|p| !field.contains(p.as_slice()))
        {
            return Err(AreaError::PointOutsideField {
                index,
                field_size: config.field_size,
            });
        }
        let input = points.clone();
        let root_points = points.sorted_by_dimension(selector.axis(0, dimensions));

        let mut partition = Self {
            nodes: vec![PartitionNode::new(
                NodeId::ROOT,
                None,
                String::new(),
                0,
                config.root_box(dimensions),
                Some(root_points),
            )],
            input,
            config: config.clone(),
        };
        partition.split_all(selector);

        debug!(
            points = partition.input.len(),
            dimensions,
            stats = ?partition.stats(),
            "partition built"
        );
        Ok(partition)
    }

    /// Splits every node reachable from the root, depth-first, lower first.
    fn split_all<S: AxisSelector>(&mut self, selector: &S) {
        let dimensions = self.dimensions();
        let max_depth = self.config.max_prefix_len;
        let min_points = self.config.min_points_per_leaf;

        let mut pending = vec![NodeId::ROOT];
        while let Some(id) = pending.pop() {
            let node = &mut self.nodes[id.0];

            // Stop when the depth limit is reached or nothing is left to bisect
            if node.depth() >= max_depth || node.points.as_ref().is_none_or(|p| p.len() < 2) {
                continue;
            }
            let Some(points) = node.points.take() else {
                continue;
            };

            let dim = selector.axis(node.depth(), dimensions);
            let Some(halves) = points.median_split(dim) else {
                continue;
            };
            let split = Split {
                dim,
                coord: halves.coord,
            };

            let depth = node.depth() + 1;
            let child_axis = selector.axis(depth, dimensions);
            let keep = |half: PointSet| {
                (half.len() > min_points).then(|| half.sorted_by_dimension(child_axis))
            };
            let lower_points = keep(halves.lower);
            let upper_points = keep(halves.upper);

            let lower_box = node.bounds().clamp_upper(dim, split.coord);
            let upper_box = node.bounds().clamp_lower(dim, split.coord);
            let lower_prefix = format!("{}0", node.prefix());
            let upper_prefix = format!("{}1", node.prefix());

            trace!(
                node = %id,
                prefix = node.prefix(),
                dim,
                coord = split.coord,
                "split"
            );

            let lower = NodeId(self.nodes.len());
            let upper = NodeId(lower.0 + 1);
            self.nodes[id.0].children = Some(Children {
                lower,
                upper,
                split,
            });
            self.nodes.push(PartitionNode::new(
                lower,
                Some(id),
                lower_prefix,
                depth,
                lower_box,
                lower_points,
            ));
            self.nodes.push(PartitionNode::new(
                upper,
                Some(id),
                upper_prefix,
                depth,
                upper_box,
                upper_points,
            ));

            // Upper goes first so the lower subtree is popped and numbered first
            pending.push(upper);
            pending.push(lower);
        }
    }

    /// Number of coordinate components.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.input.dimensions()
    }

    /// The configuration the partition was built with.
    #[inline]
    pub fn config(&self) -> &PartitionConfig {
        &self.config
    }

    /// The points the partition was built from, in input order.
    #[inline]
    pub fn input(&self) -> &PointSet {
        &self.input
    }

    #[inline]
    pub fn root(&self) -> &PartitionNode {
        &self.nodes[NodeId::ROOT.0]
    }

    /// The box covered by the whole partition.
    #[inline]
    pub fn bounds(&self) -> &BoundingBox {
        self.root().bounds()
    }

    /// Returns a node by id.
    ///
    /// # Panics
    /// Panics if the id does not belong to this partition.
    #[inline]
    pub fn node(&self, id: NodeId) -> &PartitionNode {
        &self.nodes[id.0]
    }

    /// Returns a node by id, or `None` for a foreign id.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&PartitionNode> {
        self.nodes.get(id.0)
    }

    /// All nodes in id order.
    #[inline]
    pub fn nodes(&self) -> &[PartitionNode] {
        &self.nodes
    }

    /// Total number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A partition always has a root, so it is never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over the leaves, depth-first, lower child first.
    pub fn leaves(&self) -> Leaves<'_> {
        self.leaves_under(NodeId::ROOT)
    }

    /// Iterates over the leaves of the subtree rooted at `id`.
    pub fn leaves_under(&self, id: NodeId) -> Leaves<'_> {
        Leaves {
            partition: self,
            pending: vec![id],
        }
    }

    /// Calls the visitor once per leaf, in [`Partition::leaves`] order.
    pub fn traverse<V: LeafVisitor>(&self, visitor: &mut V) {
        for leaf in self.leaves() {
            visitor.visit(leaf);
        }
    }

    /// Collects the leaves into an area list.
    pub fn areas(&self) -> AreaList {
        let mut visitor = CollectingVisitor::new();
        self.traverse(&mut visitor);
        AreaList::new(self.dimensions(), visitor.into_areas())
    }

    /// Finds the leaf whose region contains `point`.
    ///
    /// Points on a cut belong to the lower side. Returns `None` if the point
    /// has the wrong dimensionality or lies outside the root box.
    pub fn locate(&self, point: &[f64]) -> Option<&PartitionNode> {
        if !self.bounds().contains(point) {
            return None;
        }
        let mut current = self.root();
        while let Some(children) = current.children() {
            let next = if point[children.split.dim] <= children.split.coord {
                children.lower
            } else {
                children.upper
            };
            current = self.node(next);
        }
        Some(current)
    }

    /// Returns the nodes from the root down to `id`, root first.
    pub fn path_to(&self, id: NodeId) -> Vec<&PartitionNode> {
        let mut path = Vec::new();
        let mut current = self.get(id);
        while let Some(node) = current {
            path.push(node);
            current = node.parent().map(|p| self.node(p));
        }
        path.reverse();
        path
    }

    /// Computes summary figures over all leaves.
    pub fn stats(&self) -> PartitionStats {
        let mut stats = PartitionStats {
            nodes: self.len(),
            ..PartitionStats::default()
        };
        self.traverse(&mut FnVisitor::new(|leaf: &PartitionNode| {
            stats.leaves += 1;
            if leaf.point_count() == 0 {
                stats.empty_leaves += 1;
            }
            stats.max_depth = stats.max_depth.max(leaf.depth());
            stats.max_leaf_points = stats.max_leaf_points.max(leaf.point_count());
        }));
        stats
    }
}

/// Depth-first iterator over the leaves of a [`Partition`].
#[derive(Debug, Clone)]
pub struct Leaves<'a> {
    partition: &'a Partition,
    pending: Vec<NodeId>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a PartitionNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.pending.pop() {
            let node = self.partition.node(id);
            match node.children() {
                Some(children) => {
                    self.pending.push(children.upper);
                    self.pending.push(children.lower);
                }
                None => return Some(node),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadrant_points() -> PointSet {
        PointSet::from_rows(2, [[-5.0, -5.0], [-5.0, 5.0], [5.0, -5.0], [5.0, 5.0]]).unwrap()
    }

    fn config(max: usize, min: usize, field: f64) -> PartitionConfig {
        PartitionConfig::new()
            .with_max_prefix_len(max)
            .with_min_points_per_leaf(min)
            .with_field_size(field)
    }

    #[test]
    fn empty_input_is_single_empty_leaf() {
        let partition =
            Partition::build(PointSet::new(2).unwrap(), &config(10, 1, 10.0)).unwrap();

        assert_eq!(partition.len(), 1);
        let root = partition.root();
        assert!(root.is_leaf());
        assert_eq!(root.prefix(), "");
        assert_eq!(root.points().map(PointSet::len), Some(0));
    }

    #[test]
    fn single_point_is_not_split() {
        let points = PointSet::from_rows(3, [[0.0, 0.0, 0.0]]).unwrap();
        let partition = Partition::build(points, &config(10, 1, 100.0)).unwrap();

        assert_eq!(partition.len(), 1);
        assert_eq!(partition.root().point_count(), 1);
        assert_eq!(partition.leaves().count(), 1);
    }

    #[test]
    fn zero_max_prefix_keeps_root_leaf() {
        let partition = Partition::build(quadrant_points(), &config(0, 1, 10.0)).unwrap();

        assert_eq!(partition.len(), 1);
        assert!(partition.root().is_leaf());
        assert_eq!(partition.root().point_count(), 4);
    }

    #[test]
    fn quadrants_become_four_empty_leaves() {
        let partition = Partition::build(quadrant_points(), &config(10, 1, 10.0)).unwrap();

        let leaves: Vec<&PartitionNode> = partition.leaves().collect();
        let prefixes: Vec<&str> = leaves.iter().map(|l| l.prefix()).collect();
        assert_eq!(prefixes, vec!["00", "01", "10", "11"]);
        assert!(leaves.iter().all(|l| l.depth() == 2 && l.points().is_none()));

        let root_split = partition.root().split().unwrap();
        assert_eq!(root_split, Split { dim: 0, coord: 0.0 });

        // Lower-left quadrant
        assert_eq!(leaves[0].bounds().low().as_slice(), &[-10.0, -10.0]);
        assert_eq!(leaves[0].bounds().high().as_slice(), &[0.0, 0.0]);
        // Upper-right quadrant
        assert_eq!(leaves[3].bounds().low().as_slice(), &[0.0, 0.0]);
        assert_eq!(leaves[3].bounds().high().as_slice(), &[10.0, 10.0]);
    }

    #[test]
    fn ids_follow_creation_order() {
        let partition = Partition::build(quadrant_points(), &config(10, 1, 10.0)).unwrap();

        let by_prefix = |prefix: &str| {
            partition
                .nodes()
                .iter()
                .find(|n| n.prefix() == prefix)
                .map(|n| n.id().index())
        };
        assert_eq!(by_prefix(""), Some(0));
        assert_eq!(by_prefix("0"), Some(1));
        assert_eq!(by_prefix("1"), Some(2));
        assert_eq!(by_prefix("00"), Some(3));
        assert_eq!(by_prefix("01"), Some(4));
        assert_eq!(by_prefix("10"), Some(5));
        assert_eq!(by_prefix("11"), Some(6));
    }

    #[test]
    fn depth_limit_retains_points() {
        let points = PointSet::from_rows(1, (0..8).map(|i| [i as f64])).unwrap();
        let partition = Partition::build(points, &config(1, 1, 100.0)).unwrap();

        let counts: Vec<usize> = partition.leaves().map(|l| l.point_count()).collect();
        assert_eq!(counts, vec![4, 4]);
        assert_eq!(partition.root().split().map(|s| s.coord), Some(3.5));
    }

    #[test]
    fn min_points_discards_small_halves() {
        // 5 points: halves of 2 and 3, with min 2 only the upper half survives
        let points = PointSet::from_rows(1, (0..5).map(|i| [i as f64])).unwrap();
        let partition = Partition::build(points, &config(10, 2, 100.0)).unwrap();

        let root = partition.root();
        let lower = partition.node(root.lower().unwrap());
        let upper = partition.node(root.upper().unwrap());
        assert!(lower.is_leaf());
        assert!(lower.points().is_none());
        assert!(!upper.is_leaf());
    }

    #[test]
    fn locate_finds_leaf() {
        let partition = Partition::build(quadrant_points(), &config(10, 1, 10.0)).unwrap();

        assert_eq!(partition.locate(&[-3.0, -3.0]).map(|n| n.prefix()), Some("00"));
        assert_eq!(partition.locate(&[-3.0, 3.0]).map(|n| n.prefix()), Some("01"));
        assert_eq!(partition.locate(&[3.0, -3.0]).map(|n| n.prefix()), Some("10"));
        // On both cuts: lower side wins
        assert_eq!(partition.locate(&[0.0, 0.0]).map(|n| n.prefix()), Some("00"));
        assert!(partition.locate(&[11.0, 0.0]).is_none());
        assert!(partition.locate(&[0.0]).is_none());
    }

    #[test]
    fn path_to_walks_from_root() {
        let partition = Partition::build(quadrant_points(), &config(10, 1, 10.0)).unwrap();
        let leaf = partition.locate(&[4.0, 4.0]).unwrap();

        let prefixes: Vec<&str> = partition.path_to(leaf.id()).iter().map(|n| n.prefix()).collect();
        assert_eq!(prefixes, vec!["", "1", "11"]);
    }

    #[test]
    fn leaves_under_subtree() {
        let partition = Partition::build(quadrant_points(), &config(10, 1, 10.0)).unwrap();
        let upper = partition.root().upper().unwrap();

        let prefixes: Vec<&str> = partition.leaves_under(upper).map(|n| n.prefix()).collect();
        assert_eq!(prefixes, vec!["10", "11"]);
    }

    #[test]
    fn stats_summarize_leaves() {
        let partition = Partition::build(quadrant_points(), &config(10, 1, 10.0)).unwrap();
        let stats = partition.stats();

        assert_eq!(
            stats,
            PartitionStats {
                nodes: 7,
                leaves: 4,
                empty_leaves: 4,
                max_depth: 2,
                max_leaf_points: 0,
            }
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = Partition::build(quadrant_points(), &config(10, 1, 0.0));
        assert!(result.is_err());
    }

    #[test]
    fn points_outside_field_are_rejected() {
        let points = PointSet::from_rows(1, [[20.0], [40.0]]).unwrap();
        let err = Partition::build(points, &config(10, 1, 10.0)).unwrap_err();
        assert!(matches!(
            err,
            AreaError::PointOutsideField {
                index: 0,
                field_size
            } if field_size == 10.0
        ));
    }
}
