//! Permission forest and depth-first lookups

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::node::{Leaf, PermissionNode};

/// Immutable forest of permission nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PermissionTree {
    roots: Vec<PermissionNode>,
}

impl PermissionTree {
    /// Build a forest, rejecting duplicate ids
    pub fn new(roots: Vec<PermissionNode>) -> Result<Self> {
        let tree = PermissionTree { roots };
        if let Some(dup) = tree.first_duplicate() {
            return Err(Error::Catalog(format!("duplicate permission id '{dup}'")));
        }
        Ok(tree)
    }

    fn first_duplicate(&self) -> Option<String> {
        let mut seen = HashSet::new();
        self.walk().map(|(_, n)| n.id()).find(|id| !seen.insert(*id)).map(String::from)
    }

    /// Parse a forest from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        let roots: Vec<PermissionNode> = serde_json::from_str(json).map_err(|e| Error::Catalog(e.to_string()))?;
        Self::new(roots)
    }

    pub fn roots(&self) -> &[PermissionNode] {
        &self.roots
    }

    /// Pre-order traversal yielding (depth, node). Iterative - no recursion.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: self.roots.iter().rev().map(|n| (0, n)).collect() }
    }

    /// Depth-first search for a node by id
    pub fn find(&self, id: &str) -> Option<&PermissionNode> {
        self.walk().map(|(_, n)| n).find(|n| n.id() == id)
    }

    pub fn leaf(&self, id: &str) -> Option<&Leaf> {
        self.find(id).and_then(PermissionNode::as_leaf)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Label for an id, or the id itself when the tree does not know it
    pub fn lookup_label(&self, id: &str) -> String {
        self.find(id).map(|n| n.label().to_string()).unwrap_or_else(|| id.to_string())
    }

    /// Every grantable id, in pre-order
    pub fn leaf_ids(&self) -> Vec<&str> {
        self.walk().filter(|(_, n)| !n.is_group()).map(|(_, n)| n.id()).collect()
    }

    /// Dependency edges pointing outside the tree, as (leaf, missing target)
    pub fn dangling_dependencies(&self) -> Vec<(&str, &str)> {
        let ids: HashSet<&str> = self.walk().map(|(_, n)| n.id()).collect();
        self.walk()
            .filter_map(|(_, n)| n.as_leaf())
            .flat_map(|l| {
                l.depends_on
                    .iter()
                    .chain(l.depends_on_or.iter())
                    .map(move |d| (l.id.as_str(), d.as_str()))
            })
            .filter(|(_, d)| !ids.contains(d))
            .collect()
    }
}

/// Pre-order iterator over a forest
pub struct Walk<'a> {
    stack: Vec<(usize, &'a PermissionNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a PermissionNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev().map(|c| (depth + 1, c)));
        Some((depth, node))
    }
}
