//! Selection state and the dependency resolver
//!
//! Resolution is single-hop: selecting a leaf adds its own `depends_on`
//! and at most one `depends_on_or` default, never the dependencies of those.
//! Deselection removes only the toggled id.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::node::PermissionNode;
use crate::tree::PermissionTree;

/// Set of granted leaf ids. Ordered only for stable serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(BTreeSet<String>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a role's permission array
    pub fn from_permissions<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection(ids.into_iter().map(Into::into).collect())
    }

    /// Permission array for the role store
    pub fn to_permissions(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Toggle a node of `tree`. Unknown ids toggle without edges, groups are ignored.
    pub fn toggle_in(&self, tree: &PermissionTree, id: &str) -> Selection {
        match tree.find(id) {
            Some(PermissionNode::Group(_)) => self.clone(),
            Some(PermissionNode::Leaf(l)) => toggle(self, id, &l.depends_on, &l.depends_on_or),
            None => toggle(self, id, &[], &[]),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Selection::from_permissions(iter)
    }
}

/// Next selection after clicking `id` with the given dependency edges
pub fn toggle(selection: &Selection, id: &str, depends_on: &[String], depends_on_or: &[String]) -> Selection {
    let mut next = selection.0.clone();
    if next.remove(id) {
        tracing::debug!(id, "deselected");
        return Selection(next);
    }

    next.insert(id.to_string());
    next.extend(depends_on.iter().cloned());
    let or_add = match depends_on_or.first() {
        Some(first) if !depends_on_or.iter().any(|d| selection.contains(d)) => Some(first),
        _ => None,
    };
    if let Some(first) = or_add {
        next.insert(first.clone());
    }
    tracing::debug!(id, mandatory = depends_on.len(), or_default = ?or_add, "selected");
    Selection(next)
}

/// Groups whose children are shown in the tree view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpandedGroups(BTreeSet<String>);

impl ExpandedGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flip(&mut self, id: &str) {
        if !self.0.remove(id) {
            self.0.insert(id.to_string());
        }
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }
}

impl<S: Into<String>> FromIterator<S> for ExpandedGroups {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ExpandedGroups(iter.into_iter().map(Into::into).collect())
    }
}
