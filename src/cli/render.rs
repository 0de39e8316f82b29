//! Rendering of a component tree for stdout

use termtree::Tree;
use tracing::instrument;

use crate::domain::{ComponentNode, Expansion};

/*
Workaround for error: https://doc.rust-lang.org/error_codes/E0116.html
termtree::Tree is foreign, so conversion goes through a local trait
 */
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for ComponentNode {
    #[instrument(level = "trace", skip(self), fields(label = %self.label))]
    fn to_tree_string(&self) -> Tree<String> {
        let root = match self.expansion {
            Expansion::Cycle => format!("{} (cycle)", self.label),
            Expansion::DepthLimit => format!("{} (depth limit)", self.label),
            Expansion::Expanded | Expansion::Missing => self.label.clone(),
        };

        let leaves: Vec<_> = self.children.iter().map(|c| c.to_tree_string()).collect();

        Tree::new(root).with_leaves(leaves)
    }
}

/// One label per line in pre-order, indented two spaces per level.
pub fn render_indented(root: &ComponentNode) -> String {
    let mut out = String::new();
    for (depth, node) in root.iter() {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&node.label);
        out.push('\n');
    }
    out
}

pub fn render_tree(root: &ComponentNode) -> String {
    root.to_tree_string().to_string()
}

pub fn render_json(root: &ComponentNode) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(root)
}
