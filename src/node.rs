//! Permission node schema
//!
//! A node is either a grantable [`Leaf`] carrying dependency edges, or a
//! navigational [`Group`] carrying children. The JSON form is a single
//! loosely shaped object (`id`, `label`, optional `children`, `dependsOn`,
//! `dependsOnOr`); a group that declares dependencies is rejected on parse.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A grantable permission. Its id is the permission string stored on roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub id: String,
    pub label: String,
    /// All of these are added when the leaf is selected
    pub depends_on: Vec<String>,
    /// At least one of these must be present; the first is added otherwise
    pub depends_on_or: Vec<String>,
}

impl Leaf {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Leaf { id: id.into(), label: label.into(), depends_on: Vec::new(), depends_on_or: Vec::new() }
    }

    /// Add mandatory dependencies
    pub fn requires<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Add OR alternatives, in preference order
    pub fn requires_any<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on_or.extend(ids.into_iter().map(Into::into));
        self
    }
}

/// A navigational grouping. Never selected, never carries dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub label: String,
    pub children: Vec<PermissionNode>,
}

impl Group {
    pub fn new(id: impl Into<String>, label: impl Into<String>, children: Vec<PermissionNode>) -> Self {
        Group { id: id.into(), label: label.into(), children }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub enum PermissionNode {
    Leaf(Leaf),
    Group(Group),
}

impl PermissionNode {
    pub fn id(&self) -> &str {
        match self {
            PermissionNode::Leaf(l) => &l.id,
            PermissionNode::Group(g) => &g.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PermissionNode::Leaf(l) => &l.label,
            PermissionNode::Group(g) => &g.label,
        }
    }

    #[inline]
    pub fn is_group(&self) -> bool {
        matches!(self, PermissionNode::Group(_))
    }

    /// Children of a group; empty for a leaf
    pub fn children(&self) -> &[PermissionNode] {
        match self {
            PermissionNode::Leaf(_) => &[],
            PermissionNode::Group(g) => &g.children,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            PermissionNode::Leaf(l) => Some(l),
            PermissionNode::Group(_) => None,
        }
    }
}

impl From<Leaf> for PermissionNode {
    fn from(l: Leaf) -> Self {
        PermissionNode::Leaf(l)
    }
}

impl From<Group> for PermissionNode {
    fn from(g: Group) -> Self {
        PermissionNode::Group(g)
    }
}

/// Wire shape shared by both variants
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    id: String,
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<PermissionNode>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    depends_on: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    depends_on_or: Vec<String>,
}

impl TryFrom<RawNode> for PermissionNode {
    type Error = Error;

    fn try_from(raw: RawNode) -> Result<Self, Error> {
        match raw.children {
            Some(children) => {
                if !raw.depends_on.is_empty() || !raw.depends_on_or.is_empty() {
                    return Err(Error::Catalog(format!("group '{}' cannot declare dependencies", raw.id)));
                }
                Ok(Group { id: raw.id, label: raw.label, children }.into())
            }
            None => Ok(Leaf {
                id: raw.id,
                label: raw.label,
                depends_on: raw.depends_on,
                depends_on_or: raw.depends_on_or,
            }
            .into()),
        }
    }
}

impl From<PermissionNode> for RawNode {
    fn from(node: PermissionNode) -> Self {
        match node {
            PermissionNode::Leaf(l) => RawNode {
                id: l.id,
                label: l.label,
                children: None,
                depends_on: l.depends_on,
                depends_on_or: l.depends_on_or,
            },
            PermissionNode::Group(g) => RawNode {
                id: g.id,
                label: g.label,
                children: Some(g.children),
                depends_on: Vec::new(),
                depends_on_or: Vec::new(),
            },
        }
    }
}
