//! permgraph - permission tree with dependency resolution
//!
//! A static forest of permission nodes, a single-hop dependency resolver
//! for toggling leaves in a [`Selection`], tree and graph projections of a
//! selection, and the role lifecycle against a remote REST role store.

pub mod catalog;
pub mod config;
pub mod error;
pub mod graph;
pub mod node;
pub mod panel;
pub mod role;
pub mod selection;
pub mod store;
pub mod tree;
pub mod view;

#[cfg(feature = "server")]
pub mod server;

pub use catalog::catalog;
pub use config::Config;
pub use error::{Error, Result};
pub use graph::{graph_view, relevant_groups, EdgeKind, GraphEdge, GraphNode, GraphView};
pub use node::{Group, Leaf, PermissionNode};
pub use panel::{EditingRole, Notice, NoticeLevel, RoleDraft, RolePanel};
pub use role::{NewRole, Role, RoleUpdate, User};
pub use selection::{toggle, ExpandedGroups, Selection};
pub use store::{HttpStore, RoleStore, UserDirectory};
pub use tree::PermissionTree;
pub use view::{tree_rows, RowState, TreeEditor, TreeRow};
