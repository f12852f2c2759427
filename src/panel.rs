//! Role lifecycle: design, create, edit, update, assign
//!
//! Selections change synchronously through [`TreeEditor`]. Store calls are
//! async and each action carries a busy flag, so a second submit of the same
//! action while one is pending is rejected without reaching the store.
//! Failures become notices and leave prior state untouched.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::GraphView;
use crate::role::{NewRole, Role, RoleUpdate, User};
use crate::store::{RoleStore, UserDirectory};
use crate::tree::PermissionTree;
use crate::view::{TreeEditor, TreeRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Non-blocking message for the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Working state of the "new role" designer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDraft {
    pub name: String,
    pub editor: TreeEditor,
}

/// Working copy of a fetched role being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingRole {
    pub role_id: String,
    pub name: String,
    pub editor: TreeEditor,
}

#[derive(Default)]
struct PanelState {
    roles: Vec<Role>,
    draft: RoleDraft,
    editing: Option<EditingRole>,
    notices: Vec<Notice>,
}

/// Clears its busy flag when the action finishes or is dropped mid-flight
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn begin(flag: &'a AtomicBool, action: &'static str) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::Busy(action))?;
        Ok(InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct RolePanel<'t, S> {
    tree: &'t PermissionTree,
    store: S,
    state: Mutex<PanelState>,
    creating: AtomicBool,
    updating: AtomicBool,
    assigning: AtomicBool,
}

impl<'t, S> RolePanel<'t, S> {
    pub fn new(tree: &'t PermissionTree, store: S) -> Self {
        RolePanel {
            tree,
            store,
            state: Mutex::new(PanelState::default()),
            creating: AtomicBool::new(false),
            updating: AtomicBool::new(false),
            assigning: AtomicBool::new(false),
        }
    }

    pub fn tree(&self) -> &'t PermissionTree {
        self.tree
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // Never held across an await
    fn state(&self) -> MutexGuard<'_, PanelState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn notify(&self, level: NoticeLevel, message: String) {
        self.state().notices.push(Notice { level, message });
    }

    fn fail(&self, action: &str, e: Error) -> Error {
        tracing::warn!(action, error = %e, "role panel action failed");
        self.notify(NoticeLevel::Error, format!("Failed to {action}: {e}"));
        e
    }

    /// Last fetched role list
    pub fn roles(&self) -> Vec<Role> {
        self.state().roles.clone()
    }

    /// Drain pending notices
    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.state().notices)
    }

    pub fn is_busy(&self) -> bool {
        [&self.creating, &self.updating, &self.assigning].iter().any(|f| f.load(Ordering::Acquire))
    }

    // Designer

    pub fn draft(&self) -> RoleDraft {
        self.state().draft.clone()
    }

    pub fn set_draft_name(&self, name: impl Into<String>) {
        self.state().draft.name = name.into();
    }

    pub fn click_draft(&self, id: &str) {
        self.state().draft.editor.click(self.tree, id);
    }

    pub fn draft_rows(&self) -> Vec<TreeRow> {
        self.state().draft.editor.rows(self.tree)
    }

    pub fn draft_graph(&self) -> GraphView {
        self.state().draft.editor.graph(self.tree)
    }

    // Editor

    /// Open the editor on a fetched role, replacing any open edit
    pub fn load_role_for_edit(&self, role: &Role) {
        tracing::debug!(role_id = %role.id, permissions = role.permissions.len(), "editing role");
        self.state().editing = Some(EditingRole {
            role_id: role.id.clone(),
            name: role.name.clone(),
            editor: TreeEditor::seeded(role.permissions.iter().cloned()),
        });
    }

    pub fn editing(&self) -> Option<EditingRole> {
        self.state().editing.clone()
    }

    pub fn close_editor(&self) {
        self.state().editing = None;
    }

    pub fn set_editing_name(&self, name: impl Into<String>) -> Result<()> {
        let mut st = self.state();
        let ed = st.editing.as_mut().ok_or(Error::NoEditor)?;
        ed.name = name.into();
        Ok(())
    }

    pub fn click_editing(&self, id: &str) -> Result<()> {
        let mut st = self.state();
        let ed = st.editing.as_mut().ok_or(Error::NoEditor)?;
        ed.editor.click(self.tree, id);
        Ok(())
    }

    pub fn editing_rows(&self) -> Option<Vec<TreeRow>> {
        self.state().editing.as_ref().map(|ed| ed.editor.rows(self.tree))
    }

    pub fn editing_graph(&self) -> Option<GraphView> {
        self.state().editing.as_ref().map(|ed| ed.editor.graph(self.tree))
    }
}

impl<S: RoleStore> RolePanel<'_, S> {
    /// Re-fetch the role list
    pub async fn refresh_roles(&self) -> Result<Vec<Role>> {
        match self.store.list_roles().await {
            Ok(roles) => {
                self.state().roles = roles.clone();
                Ok(roles)
            }
            Err(e) => Err(self.fail("load roles", e)),
        }
    }

    /// Persist the designer as a new role, then clear it and refresh
    pub async fn create_role(&self) -> Result<Role> {
        let _busy = InFlight::begin(&self.creating, "create role")?;
        let body = {
            let st = self.state();
            NewRole { name: st.draft.name.trim().to_string(), permissions: st.draft.editor.selection.to_permissions() }
        };
        if body.name.is_empty() {
            let e = Error::Validation("role name is required".into());
            self.notify(NoticeLevel::Error, e.to_string());
            return Err(e);
        }

        let role = self.store.create_role(&body).await.map_err(|e| self.fail("create role", e))?;
        tracing::info!(role_id = %role.id, name = %role.name, permissions = role.permissions.len(), "role created");
        {
            let mut st = self.state();
            st.draft.name.clear();
            st.draft.editor.reset();
        }
        self.notify(NoticeLevel::Success, format!("Role '{}' created", role.name));
        // creation already succeeded; a failed refresh is reported on its own
        let _ = self.refresh_roles().await;
        Ok(role)
    }

    /// Persist the open editor. Closes it on success, keeps it on failure.
    pub async fn update_role(&self) -> Result<Role> {
        let _busy = InFlight::begin(&self.updating, "update role")?;
        let body = {
            let st = self.state();
            let ed = st.editing.as_ref().ok_or(Error::NoEditor)?;
            RoleUpdate { id: ed.role_id.clone(), name: ed.name.clone(), permissions: ed.editor.selection.to_permissions() }
        };

        let role = self.store.update_role(&body).await.map_err(|e| self.fail("update role", e))?;
        tracing::info!(role_id = %body.id, permissions = body.permissions.len(), "role updated");
        {
            let mut st = self.state();
            if st.editing.as_ref().is_some_and(|ed| ed.role_id == body.id) {
                st.editing = None;
            }
        }
        self.notify(NoticeLevel::Success, format!("Role '{}' updated", body.name));
        let _ = self.refresh_roles().await;
        Ok(role)
    }
}

impl<S: UserDirectory> RolePanel<'_, S> {
    pub async fn find_user(&self, identifier: &str) -> Result<User> {
        self.store.find_user(identifier).await.map_err(|e| self.fail("find user", e))
    }

    pub async fn assign_role_to_user(&self, user_id: &str, role_id: &str) -> Result<()> {
        let _busy = InFlight::begin(&self.assigning, "assign role")?;
        self.store.assign_role(user_id, role_id).await.map_err(|e| self.fail("assign role", e))?;
        tracing::info!(user_id, role_id, "role assigned");
        self.notify(NoticeLevel::Success, "Role assigned".into());
        Ok(())
    }
}
