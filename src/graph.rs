//! Read-only dependency graph projection
//!
//! Shows only relevant nodes: selected leaves, and groups with a selected
//! descendant at any depth. Groups are never selected themselves, so they
//! always appear de-emphasized as connective nodes.

use std::collections::HashSet;

use serde::Serialize;

use crate::node::PermissionNode;
use crate::selection::Selection;
use crate::tree::PermissionTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeKind {
    /// Group to shown child
    Contains,
    /// Leaf to a selected mandatory dependency
    Requires,
    /// Leaf to a selected OR alternative
    RequiresAny,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub depth: usize,
    pub group: bool,
    pub emphasized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphView {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn group_ids(&self) -> HashSet<&str> {
        self.nodes.iter().filter(|n| n.group).map(|n| n.id.as_str()).collect()
    }
}

/// Project a selection onto the tree. Recomputed from scratch on every call.
pub fn graph_view(tree: &PermissionTree, selection: &Selection) -> GraphView {
    let mut view = GraphView::default();
    for node in tree.roots() {
        emit(node, None, 0, selection, &mut view);
    }
    // Legacy ids stay visible under their own name
    for id in selection.iter().filter(|id| !tree.contains(id)) {
        view.nodes.push(GraphNode {
            id: id.to_string(),
            label: tree.lookup_label(id),
            depth: 0,
            group: false,
            emphasized: true,
        });
    }
    view
}

fn relevant(node: &PermissionNode, sel: &Selection) -> bool {
    match node {
        PermissionNode::Leaf(l) => sel.contains(&l.id),
        PermissionNode::Group(g) => sel.contains(&g.id) || g.children.iter().any(|c| relevant(c, sel)),
    }
}

fn emit(node: &PermissionNode, parent: Option<&str>, depth: usize, sel: &Selection, view: &mut GraphView) {
    if !relevant(node, sel) {
        return;
    }
    view.nodes.push(GraphNode {
        id: node.id().to_string(),
        label: node.label().to_string(),
        depth,
        group: node.is_group(),
        emphasized: sel.contains(node.id()),
    });
    if let Some(p) = parent {
        view.edges.push(GraphEdge { from: p.to_string(), to: node.id().to_string(), kind: EdgeKind::Contains });
    }
    match node {
        PermissionNode::Leaf(l) => {
            let deps = l.depends_on.iter().map(|d| (d, EdgeKind::Requires))
                .chain(l.depends_on_or.iter().map(|d| (d, EdgeKind::RequiresAny)));
            for (d, kind) in deps.filter(|(d, _)| sel.contains(d)) {
                view.edges.push(GraphEdge { from: l.id.clone(), to: d.clone(), kind });
            }
        }
        PermissionNode::Group(g) => {
            for child in &g.children {
                emit(child, Some(&g.id), depth + 1, sel, view);
            }
        }
    }
}

/// Groups that are selected or have a selected descendant, from a single
/// bottom-up pass. Every child is visited so nested groups are marked too.
pub fn relevant_groups(tree: &PermissionTree, selection: &Selection) -> HashSet<String> {
    let mut out = HashSet::new();
    for node in tree.roots() {
        mark(node, selection, &mut out);
    }
    out
}

fn mark(node: &PermissionNode, sel: &Selection, out: &mut HashSet<String>) -> bool {
    match node {
        PermissionNode::Leaf(l) => sel.contains(&l.id),
        PermissionNode::Group(g) => {
            let hit = g.children.iter().fold(sel.contains(&g.id), |acc, c| mark(c, sel, out) | acc);
            if hit {
                out.insert(g.id.clone());
            }
            hit
        }
    }
}
