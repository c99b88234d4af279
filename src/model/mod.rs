//! Tree model: the hierarchy a diagram is drawn from.
//!
//! Trees are supplied by the host and never mutated by the engine.

mod data;

use std::collections::HashSet;

use crate::error::ModelError;

pub use data::system_model_tree;

/// A named, described node with ordered children.
///
/// Child order is meaningful: it decides angular position in every variant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreeNode {
    pub name: String,
    /// May be empty; consumers show the name only in that case.
    pub description: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            children: Vec::new(),
        }
    }

    /// Node without a description.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, "")
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Description, or `None` when missing.
    pub fn description(&self) -> Option<&str> {
        let d = self.description.trim();
        if d.is_empty() {
            None
        } else {
            Some(d)
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Depth of the deepest descendant (a leaf has depth 0).
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Number of leaves below (a leaf counts itself).
    pub fn leaf_count(&self) -> usize {
        if self.children.is_empty() {
            1
        } else {
            self.children.iter().map(TreeNode::leaf_count).sum()
        }
    }

    /// Split the top-level children into ring-bearing nodes and the
    /// auxiliary groups that only feed the legend.
    pub fn partition_rings(&self, ring_limit: usize) -> (&[TreeNode], &[TreeNode]) {
        let split = ring_limit.min(self.children.len());
        self.children.split_at(split)
    }

    /// Check names: non-empty everywhere, unique among siblings.
    ///
    /// Returns every problem found rather than stopping at the first one.
    pub fn validate(&self) -> Result<(), Vec<ModelError>> {
        let mut errors = Vec::new();
        validate_node(self, &self.name, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn validate_node(node: &TreeNode, path: &str, errors: &mut Vec<ModelError>) {
    if node.name.trim().is_empty() {
        errors.push(ModelError::EmptyName {
            path: path.to_string(),
        });
    }
    let mut seen = HashSet::new();
    for (i, child) in node.children.iter().enumerate() {
        if !child.name.is_empty() && !seen.insert(child.name.as_str()) {
            errors.push(ModelError::DuplicateSibling {
                parent: node.name.clone(),
                name: child.name.clone(),
            });
        }
        let child_path = if child.name.is_empty() {
            format!("{}/#{}", path, i)
        } else {
            format!("{}/{}", path, child.name)
        };
        validate_node(child, &child_path, errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeNode {
        TreeNode::new("root", "the root").with_children(vec![
            TreeNode::new("a", "first").with_children(vec![
                TreeNode::named("a1"),
                TreeNode::named("a2"),
            ]),
            TreeNode::named("b"),
        ])
    }

    #[test]
    fn missing_description_is_none() {
        assert_eq!(TreeNode::named("x").description(), None);
        assert_eq!(TreeNode::new("x", "  ").description(), None);
        assert_eq!(TreeNode::new("x", "desc").description(), Some("desc"));
    }

    #[test]
    fn depth_and_leaves() {
        let t = sample();
        assert_eq!(t.depth(), 2);
        assert_eq!(t.leaf_count(), 3);
        assert_eq!(TreeNode::named("leaf").depth(), 0);
    }

    #[test]
    fn partition_respects_limit() {
        let t = sample();
        let (rings, aux) = t.partition_rings(1);
        assert_eq!(rings.len(), 1);
        assert_eq!(aux.len(), 1);
        assert_eq!(aux[0].name, "b");

        let (rings, aux) = t.partition_rings(10);
        assert_eq!(rings.len(), 2);
        assert!(aux.is_empty());
    }

    #[test]
    fn validate_reports_duplicates_and_empty_names() {
        assert!(sample().validate().is_ok());

        let bad = TreeNode::named("root").with_children(vec![
            TreeNode::named("dup"),
            TreeNode::named("dup"),
            TreeNode::named(""),
        ]);
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&ModelError::DuplicateSibling {
            parent: "root".into(),
            name: "dup".into(),
        }));
        assert!(errors.contains(&ModelError::EmptyName {
            path: "root/#2".into(),
        }));
    }
}
