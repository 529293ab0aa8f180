//! Table-of-contents extraction.
//!
//! Headings are recorded in document order. Each one is placed by walking
//! down the most recent ("open") node at every depth of the tree:
//!
//! - empty level: the heading starts it
//! - last node shallower than the heading: descend into its children
//! - same level: the heading becomes a sibling
//! - last node deeper than the heading: the heading becomes its child
//!
//! The last rule nests `H2 X, H1 Y` as `X > Y` rather than closing `X`.

use serde::Serialize;
use tracing::trace;

use crate::slug::slugify;

/// One heading and the headings nested under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingNode {
    /// Heading depth, 1 through 6.
    pub level: u8,
    pub text: String,
    pub anchor: String,
    pub children: Vec<HeadingNode>,
}

impl HeadingNode {
    /// Build a leaf node. `level` is clamped into `1..=6`, so `0` becomes an
    /// `h1` and anything above `6` an `h6`.
    #[must_use]
    pub fn new(level: u8, text: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            level: level.clamp(1, 6),
            text: text.into(),
            anchor: anchor.into(),
            children: Vec::new(),
        }
    }
}

/// Accumulates the heading tree of a single render pass.
#[derive(Debug, Default, Clone)]
pub struct HeadingTree {
    roots: Vec<HeadingNode>,
}

impl HeadingTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a heading, deriving its anchor from `text`. Returns the anchor.
    pub fn record(&mut self, level: u8, text: impl Into<String>) -> String {
        let text = text.into();
        let anchor = slugify(&text);
        self.insert(HeadingNode::new(level, text, anchor.clone()));
        anchor
    }

    /// Place `node` in the tree. Any children it already has are kept.
    pub fn insert(&mut self, node: HeadingNode) {
        trace!(level = node.level, anchor = %node.anchor, "toc heading");
        let mut siblings = &mut self.roots;
        loop {
            let open = siblings.len().checked_sub(1);
            match open.map(|i| (i, siblings[i].level)) {
                None => break siblings.push(node),
                Some((i, level)) if level < node.level => siblings = &mut siblings[i].children,
                Some((_, level)) if level == node.level => break siblings.push(node),
                Some((i, _)) => break siblings[i].children.push(node),
            }
        }
    }

    /// Root-level headings recorded so far.
    #[must_use]
    pub fn snapshot(&self) -> &[HeadingNode] {
        &self.roots
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    #[must_use]
    pub fn into_nodes(self) -> Vec<HeadingNode> {
        self.roots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Compact `text{children}` form for asserting tree shapes.
    fn shape(nodes: &[HeadingNode]) -> String {
        nodes
            .iter()
            .map(|n| {
                if n.children.is_empty() {
                    n.text.clone()
                } else {
                    format!("{}{{{}}}", n.text, shape(&n.children))
                }
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    fn build(headings: &[(u8, &str)]) -> HeadingTree {
        let mut tree = HeadingTree::new();
        for (level, text) in headings {
            tree.record(*level, *text);
        }
        tree
    }

    #[test]
    fn siblings_and_children() {
        let tree = build(&[(1, "A"), (2, "B"), (2, "C"), (1, "D")]);
        assert_eq!(shape(tree.snapshot()), "A{B,C},D");
    }

    #[test]
    fn shallower_heading_nests_under_deeper_one() {
        let tree = build(&[(2, "X"), (1, "Y")]);
        assert_eq!(shape(tree.snapshot()), "X{Y}");
        assert_eq!(tree.snapshot()[0].children[0].level, 1);
    }

    #[test]
    fn deep_descent_follows_last_open_nodes() {
        let tree = build(&[(1, "A"), (2, "B"), (3, "C"), (3, "D"), (2, "E"), (4, "F")]);
        assert_eq!(shape(tree.snapshot()), "A{B{C,D},E{F}}");
    }

    #[test]
    fn shallower_heading_attaches_at_first_deeper_node_on_path() {
        // G descends into A, then meets the deeper C and nests under it.
        let tree = build(&[(1, "A"), (3, "C"), (2, "G")]);
        assert_eq!(shape(tree.snapshot()), "A{C{G}}");
    }

    #[test]
    fn record_returns_anchor() {
        let mut tree = HeadingTree::new();
        assert_eq!(tree.record(2, "C++ Tips"), "c-tips");
        assert_eq!(tree.snapshot()[0].anchor, "c-tips");
        assert_eq!(tree.snapshot()[0].text, "C++ Tips");
    }

    #[test]
    fn duplicate_anchors_are_kept() {
        let tree = build(&[(2, "Setup"), (2, "Setup")]);
        let anchors: Vec<&str> = tree.snapshot().iter().map(|n| n.anchor.as_str()).collect();
        assert_eq!(anchors, vec!["setup", "setup"]);
    }

    #[test]
    fn empty_tree() {
        let tree = HeadingTree::new();
        assert!(tree.is_empty());
        assert!(tree.into_nodes().is_empty());
    }

    #[test]
    fn nodes_serialize_with_children() {
        let tree = build(&[(1, "A"), (2, "B")]);
        let json = serde_json::to_value(tree.snapshot()).unwrap();
        assert_eq!(json[0]["anchor"], "a");
        assert_eq!(json[0]["children"][0]["level"], 2);
        assert_eq!(json[0]["children"][0]["children"], serde_json::json!([]));
    }

    fn count(nodes: &[HeadingNode]) -> usize {
        nodes.iter().map(|n| 1 + count(&n.children)).sum()
    }

    proptest! {
        #[test]
        fn every_recorded_heading_lands_once(levels in prop::collection::vec(1u8..=6, 0..40)) {
            let mut tree = HeadingTree::new();
            for (i, level) in levels.iter().enumerate() {
                tree.record(*level, format!("h{i}"));
            }
            prop_assert_eq!(count(tree.snapshot()), levels.len());
            if let Some(first) = levels.first() {
                prop_assert_eq!(tree.snapshot()[0].level, *first);
            }
        }
    }

    #[test]
    fn level_is_clamped() {
        assert_eq!(HeadingNode::new(9, "x", "x").level, 6);
        assert_eq!(HeadingNode::new(0, "x", "x").level, 1);

        let mut tree = HeadingTree::new();
        tree.record(0, "Zero");
        tree.record(7, "Seven");
        assert_eq!(tree.snapshot()[0].level, 1);
        assert_eq!(tree.snapshot()[0].children[0].level, 6);
    }
}
