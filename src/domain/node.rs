//! Component tree entities

use std::path::{Path, PathBuf};

use serde::Serialize;

/// What happened when the builder reached a node's source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expansion {
    /// File was scanned; children reflect its usages
    #[default]
    Expanded,
    /// File could not be opened (silent leaf)
    Missing,
    /// File is already being scanned further up the path
    Cycle,
    /// Not scanned because the depth limit was reached
    DepthLimit,
}

/// One discovered component, or the entry file at the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentNode {
    /// Entry file stem for the root, otherwise the tag that produced the node
    pub label: String,
    /// File the node was resolved to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    pub expansion: Expansion,
    /// Children in discovery order
    pub children: Vec<ComponentNode>,
}

impl ComponentNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            source: None,
            expansion: Expansion::default(),
            children: Vec::new(),
        }
    }

    pub fn with_source(label: impl Into<String>, source: impl AsRef<Path>) -> Self {
        Self {
            source: Some(source.as_ref().to_path_buf()),
            ..Self::new(label)
        }
    }

    pub fn add_child(&mut self, child: ComponentNode) {
        self.children.push(child);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of levels, a lone node has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(ComponentNode::depth)
            .max()
            .unwrap_or(0)
    }

    /// Total number of nodes including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ComponentNode::node_count).sum::<usize>()
    }

    /// Labels of all leaves, left to right.
    pub fn leaf_labels(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.label.as_str())
            .collect()
    }

    /// Pre-order traversal yielding `(depth, node)`, root at depth 0.
    pub fn iter(&self) -> PreOrderIter<'_> {
        PreOrderIter { stack: vec![(0, self)] }
    }

    /// True when no node in the subtree was cut off by the cycle guard or depth limit.
    pub fn is_complete(&self) -> bool {
        self.iter()
            .all(|(_, node)| matches!(node.expansion, Expansion::Expanded | Expansion::Missing))
    }
}

pub struct PreOrderIter<'a> {
    stack: Vec<(usize, &'a ComponentNode)>,
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = (usize, &'a ComponentNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        // reversed so the leftmost child is visited first
        for child in node.children.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}
