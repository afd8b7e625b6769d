//! Tree nodes for the hierarchical cut-list view.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Write;

use super::record::CutListRecord;

/// Grouping value of a tree level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum TreeKey {
    Root,
    Thickness(Decimal),
    Length(Decimal),
    Room(u32),
    Cabinet(u32),
}

impl std::fmt::Display for TreeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeKey::Root => write!(f, "Cut list"),
            TreeKey::Thickness(width) => write!(f, "Width {}", width.normalize()),
            TreeKey::Length(length) => write!(f, "Length {}", length.normalize()),
            TreeKey::Room(room) => write!(f, "Room {}", room),
            TreeKey::Cabinet(cabinet) => write!(f, "Cabinet {}", cabinet),
        }
    }
}

/// A node of the cut-list hierarchy. Leaves borrow the records they display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode<'a> {
    pub key: TreeKey,
    /// Child nodes in ascending key order.
    pub children: Vec<TreeNode<'a>>,
    /// Records attached at terminal depth.
    pub records: Vec<&'a CutListRecord>,
}

impl<'a> TreeNode<'a> {
    /// Create an empty node.
    pub fn new(key: TreeKey) -> Self {
        Self {
            key,
            children: Vec::new(),
            records: Vec::new(),
        }
    }

    /// Check if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Find or create a direct child by key.
    pub(crate) fn child_mut(&mut self, key: TreeKey) -> &mut TreeNode<'a> {
        let index = match self.children.iter().position(|c| c.key == key) {
            Some(index) => index,
            None => {
                self.children.push(TreeNode::new(key));
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }

    /// Sort children by key at every depth.
    pub(crate) fn sort_children(&mut self) {
        self.children.sort_by(|a, b| a.key.cmp(&b.key));
        for child in &mut self.children {
            child.sort_children();
        }
    }

    /// Count leaf nodes below (or at) this node.
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            return usize::from(self.key != TreeKey::Root);
        }
        self.children.iter().map(TreeNode::leaf_count).sum()
    }

    /// Render this tree as an indented text outline. Records show their counted quantity.
    pub fn render(&self) -> String {
        let mut output = String::new();
        self.render_into(&mut output, 0);
        output
    }

    fn render_into(&self, output: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        writeln!(output, "{}{}", indent, self.key).unwrap();
        for record in &self.records {
            write!(
                output,
                "{}  {} x {} {}x{}",
                indent,
                record.counted_quantity(),
                record.material(),
                record.thickness().normalize(),
                record.length().normalize()
            )
            .unwrap();
            if record.has_note() {
                write!(output, " ({})", record.note()).unwrap();
            }
            writeln!(output).unwrap();
        }
        for child in &self.children {
            child.render_into(output, depth + 1);
        }
    }
}
