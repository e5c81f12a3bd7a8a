//! Document-context tree and its breadth-first traversal.
//!
//! Pages are trees: a main document plus nested iframe documents. The
//! engine needs a stable, deterministic visit order so repeated runs try
//! the same context first; an explicit breadth-first walk over the tree
//! gives that and bounds recursion depth.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Identifier for one document context (main document or a nested frame).
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ContextId(pub String);

impl ContextId {
    pub fn main() -> Self {
        Self("main".to_string())
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One node of the document-context tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FrameNode {
    pub id: ContextId,
    #[serde(default)]
    pub children: Vec<FrameNode>,
}

impl FrameNode {
    pub fn leaf(id: ContextId) -> Self {
        Self {
            id,
            children: Vec::new(),
        }
    }
}

/// Flatten the context tree breadth-first: the root (main document) first,
/// then its direct frames in order, then their frames, and so on.
pub fn walk_breadth_first(root: &FrameNode) -> Vec<ContextId> {
    let mut out = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back(root);
    while let Some(node) = queue.pop_front() {
        out.push(node.id.clone());
        for child in &node.children {
            queue.push_back(child);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(s: &str) -> ContextId {
        ContextId(s.to_string())
    }

    #[test]
    fn bfs_visits_main_first_then_levels() {
        let tree = FrameNode {
            id: ctx("main"),
            children: vec![
                FrameNode {
                    id: ctx("a"),
                    children: vec![FrameNode::leaf(ctx("a.0"))],
                },
                FrameNode::leaf(ctx("b")),
            ],
        };

        let order = walk_breadth_first(&tree);
        let names: Vec<&str> = order.iter().map(|c| c.0.as_str()).collect();
        assert_eq!(names, vec!["main", "a", "b", "a.0"]);
    }

    #[test]
    fn bfs_is_deterministic() {
        let tree = FrameNode {
            id: ctx("main"),
            children: vec![FrameNode::leaf(ctx("x")), FrameNode::leaf(ctx("y"))],
        };
        assert_eq!(walk_breadth_first(&tree), walk_breadth_first(&tree));
    }
}
