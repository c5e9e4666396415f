//! Visitor pattern for leaf traversal.
//!
//! Visitors allow custom processing of the final areas without coupling the
//! traversal order to a particular output format.

use crate::io::Area;

use super::node::PartitionNode;

/// Visitor for processing leaves during a partition traversal.
pub trait LeafVisitor {
    /// Called once per leaf, depth-first, lower child before upper child.
    fn visit(&mut self, leaf: &PartitionNode);
}

/// A simple visitor that collects every leaf as an [`Area`].
#[derive(Debug, Default)]
pub struct CollectingVisitor {
    collected: Vec<Area>,
}

impl CollectingVisitor {
    /// Creates a new empty collecting visitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected areas.
    pub fn into_areas(self) -> Vec<Area> {
        self.collected
    }

    /// Returns a reference to the collected areas.
    pub fn areas(&self) -> &[Area] {
        &self.collected
    }
}

impl LeafVisitor for CollectingVisitor {
    fn visit(&mut self, leaf: &PartitionNode) {
        self.collected
            .push(Area::new(leaf.bounds().clone(), leaf.prefix().to_owned()));
    }
}

/// A visitor that calls a closure for each leaf.
pub struct FnVisitor<F>
where
    F: FnMut(&PartitionNode),
{
    func: F,
}

impl<F> FnVisitor<F>
where
    F: FnMut(&PartitionNode),
{
    /// Creates a new visitor from a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> LeafVisitor for FnVisitor<F>
where
    F: FnMut(&PartitionNode),
{
    fn visit(&mut self, leaf: &PartitionNode) {
        (self.func)(leaf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::node::NodeId;
    use crate::BoundingBox;

    fn make_leaf(prefix: &str) -> PartitionNode {
        PartitionNode::new(
            NodeId(0),
            None,
            prefix.to_owned(),
            prefix.len(),
            BoundingBox::cube(2, 1.0),
            None,
        )
    }

    #[test]
    fn collecting_visitor_empty() {
        let visitor = CollectingVisitor::new();
        assert!(visitor.areas().is_empty());
    }

    #[test]
    fn collecting_visitor_collects() {
        let mut visitor = CollectingVisitor::new();
        visitor.visit(&make_leaf("0"));
        visitor.visit(&make_leaf("1"));

        let areas = visitor.into_areas();
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].prefix(), "0");
        assert_eq!(areas[1].prefix(), "1");
    }

    #[test]
    fn fn_visitor_calls_closure() {
        let mut depth_sum = 0;
        {
            let mut visitor = FnVisitor::new(|leaf: &PartitionNode| {
                depth_sum += leaf.depth();
            });
            visitor.visit(&make_leaf("01"));
            visitor.visit(&make_leaf("110"));
        }
        assert_eq!(depth_sum, 5);
    }
}
