//! Partition navigation utilities for interactive visualization.

use area_tree::{Partition, PartitionNode};
use macroquad::prelude::*;

use crate::{Viewport, draw_leaf_2d, draw_leaf_3d};

/// Child taken at each node in the navigation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Lower,
    Upper,
}

/// Interactive navigator for exploring the split structure.
///
/// The leaves below the current node are drawn in color, everything else
/// as a dim outline.
pub struct TreeNavigator {
    path: Vec<Direction>,
}

impl Default for TreeNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeNavigator {
    /// Creates a new navigator starting at the root.
    pub fn new() -> Self {
        Self { path: Vec::new() }
    }

    pub fn path(&self) -> &[Direction] {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Attempts to navigate to the lower child. Returns true if successful.
    pub fn go_lower(&mut self, partition: &Partition) -> bool {
        self.descend(partition, Direction::Lower)
    }

    /// Attempts to navigate to the upper child. Returns true if successful.
    pub fn go_upper(&mut self, partition: &Partition) -> bool {
        self.descend(partition, Direction::Upper)
    }

    fn descend(&mut self, partition: &Partition, direction: Direction) -> bool {
        if self.current_node(partition).is_leaf() {
            return false;
        }
        self.path.push(direction);
        true
    }

    /// Navigates to the parent node. Returns true if not already at root.
    pub fn go_parent(&mut self) -> bool {
        self.path.pop().is_some()
    }

    pub fn go_root(&mut self) {
        self.path.clear();
    }

    /// Handles keyboard input for navigation.
    /// Returns true if navigation state changed.
    pub fn update(&mut self, partition: &Partition) -> bool {
        let mut changed = false;

        if is_key_pressed(KeyCode::L) {
            changed = self.go_lower(partition);
        }
        if is_key_pressed(KeyCode::U) {
            changed = self.go_upper(partition);
        }
        if is_key_pressed(KeyCode::P) {
            changed = self.go_parent();
        }
        if is_key_pressed(KeyCode::R) && !self.path.is_empty() {
            self.go_root();
            changed = true;
        }

        changed
    }

    /// Returns the current node. A path that no longer fits the partition
    /// stops at the deepest node it reaches.
    pub fn current_node<'a>(&self, partition: &'a Partition) -> &'a PartitionNode {
        let mut current = partition.root();
        for dir in &self.path {
            let next = match dir {
                Direction::Lower => current.lower(),
                Direction::Upper => current.upper(),
            };
            match next {
                Some(id) => current = partition.node(id),
                None => break,
            }
        }
        current
    }

    /// Draws every leaf of a 2D partition, highlighting the current subtree.
    pub fn render_2d(&self, partition: &Partition, viewport: &Viewport) {
        for leaf in partition.leaves() {
            draw_leaf_2d(leaf, viewport, false);
        }
        for leaf in partition.leaves_under(self.current_node(partition).id()) {
            draw_leaf_2d(leaf, viewport, true);
        }
    }

    /// Draws the current subtree of a 3D partition as wire boxes.
    pub fn render_3d(&self, partition: &Partition) {
        let current = self.current_node(partition);
        if !self.path.is_empty() {
            draw_leaf_3d(partition.root(), false);
        }
        for leaf in partition.leaves_under(current.id()) {
            draw_leaf_3d(leaf, true);
        }
    }

    /// Draws the navigation UI overlay with its left edge at `x`.
    pub fn draw_ui_at(&self, partition: &Partition, x: f32, y_offset: f32) {
        let node = self.current_node(partition);
        let leaves = partition.leaves_under(node.id()).count();

        let prefix = if node.prefix().is_empty() {
            "root"
        } else {
            node.prefix()
        };

        draw_text(
            &format!("Subtree: {} areas", leaves),
            x + 10.0,
            y_offset,
            18.0,
            WHITE,
        );
        draw_text(
            &format!("Prefix: {} (depth {})", prefix, node.depth()),
            x + 10.0,
            y_offset + 20.0,
            18.0,
            YELLOW,
        );

        let (detail, color) = match node.split() {
            Some(split) => (
                format!("Split: dim {} at {:.3} | [L]ower [U]pper", split.dim, split.coord),
                GREEN,
            ),
            None => (format!("Leaf: {} nodes left", node.point_count()), ORANGE),
        };
        draw_text(&detail, x + 10.0, y_offset + 40.0, 18.0, color);
        draw_text(
            "[P]arent | [R]oot",
            x + 10.0,
            y_offset + 60.0,
            16.0,
            DARKGRAY,
        );
    }
}
