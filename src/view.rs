//! Editable tree view projection

use serde::Serialize;

use crate::graph::{graph_view, GraphView};
use crate::node::PermissionNode;
use crate::selection::{ExpandedGroups, Selection};
use crate::tree::PermissionTree;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RowState {
    Group { expanded: bool },
    Leaf { checked: bool },
}

/// One visible line of the tree view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeRow {
    pub id: String,
    pub label: String,
    pub depth: usize,
    #[serde(flatten)]
    pub state: RowState,
}

/// Visible rows; children of collapsed groups are skipped
pub fn tree_rows(tree: &PermissionTree, selection: &Selection, expanded: &ExpandedGroups) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    for node in tree.roots() {
        push_rows(node, 0, selection, expanded, &mut rows);
    }
    rows
}

fn push_rows(node: &PermissionNode, depth: usize, sel: &Selection, exp: &ExpandedGroups, out: &mut Vec<TreeRow>) {
    let state = match node {
        PermissionNode::Group(g) => RowState::Group { expanded: exp.contains(&g.id) },
        PermissionNode::Leaf(l) => RowState::Leaf { checked: sel.contains(&l.id) },
    };
    let open = matches!(state, RowState::Group { expanded: true });
    out.push(TreeRow { id: node.id().to_string(), label: node.label().to_string(), depth, state });
    if open {
        for child in node.children() {
            push_rows(child, depth + 1, sel, exp, out);
        }
    }
}

/// A selection together with its tree view expansion state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeEditor {
    pub selection: Selection,
    pub expanded: ExpandedGroups,
}

impl TreeEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Editor seeded from a role's permission array, all groups collapsed
    pub fn seeded<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TreeEditor { selection: Selection::from_permissions(permissions), expanded: ExpandedGroups::new() }
    }

    /// Click on a row: groups expand/collapse, everything else toggles
    pub fn click(&mut self, tree: &PermissionTree, id: &str) {
        match tree.find(id) {
            Some(PermissionNode::Group(_)) => self.expanded.flip(id),
            _ => self.selection = self.selection.toggle_in(tree, id),
        }
    }

    pub fn rows(&self, tree: &PermissionTree) -> Vec<TreeRow> {
        tree_rows(tree, &self.selection, &self.expanded)
    }

    pub fn graph(&self, tree: &PermissionTree) -> GraphView {
        graph_view(tree, &self.selection)
    }

    /// Drop the selection; expansion is kept
    pub fn reset(&mut self) {
        self.selection.clear();
    }
}
