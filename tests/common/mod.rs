//! Shared test fixtures: small trees and an in-memory store

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use permgraph::{Error, Group, Leaf, NewRole, PermissionTree, Result, Role, RoleStore, RoleUpdate, User, UserDirectory};
use tokio::sync::Notify;

/// The four-leaf tree used by the end-to-end scenario
pub fn scenario_tree() -> PermissionTree {
    PermissionTree::new(vec![
        Group::new("enquiry", "Enquiries", vec![
            Leaf::new("enquiry:read", "View enquiries").into(),
            Leaf::new("enquiry:edit", "Edit enquiries").requires(["enquiry:read"]).into(),
        ])
        .into(),
        Group::new("service", "Services", vec![
            Group::new("service:air", "Air", vec![
                Leaf::new("service:air:read", "View air").into(),
                Leaf::new("service:air:write", "Edit air").requires(["service:air:read", "enquiry:edit"]).into(),
            ])
            .into(),
        ])
        .into(),
        Leaf::new("report:view", "View reports").requires_any(["enquiry:read", "service:air:read"]).into(),
    ])
    .unwrap()
}

/// Role store and user directory kept in memory
#[derive(Default)]
pub struct MemoryStore {
    pub roles: Mutex<Vec<Role>>,
    pub users: Mutex<HashMap<String, User>>,
    /// Every call, as "method name"
    pub calls: Mutex<Vec<String>>,
    /// When set, every call fails with a server error
    pub failing: AtomicBool,
    /// When set, create, update and assign wait for a notification before answering
    pub gate: Mutex<Option<Arc<Notify>>>,
}

impl MemoryStore {
    pub fn with_roles(roles: Vec<Role>) -> Self {
        MemoryStore { roles: Mutex::new(roles), ..Default::default() }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_failing(&self, on: bool) {
        self.failing.store(on, Ordering::SeqCst);
    }

    async fn pass_gate(&self) {
        let gate = self.gate.lock().unwrap().clone();
        if let Some(g) = gate {
            g.notified().await;
        }
    }

    fn enter(&self, call: &str) -> Result<()> {
        self.calls.lock().unwrap().push(call.to_string());
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Server { status: 500, message: "store unavailable".into() });
        }
        Ok(())
    }
}

pub fn role(id: &str, name: &str, perms: &[&str]) -> Role {
    Role { id: id.into(), name: name.into(), permissions: perms.iter().map(|p| p.to_string()).collect() }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn list_roles(&self) -> Result<Vec<Role>> {
        self.enter("list_roles")?;
        Ok(self.roles.lock().unwrap().clone())
    }

    async fn create_role(&self, body: &NewRole) -> Result<Role> {
        self.pass_gate().await;
        self.enter("create_role")?;
        let mut roles = self.roles.lock().unwrap();
        let created = Role { id: format!("r{}", roles.len() + 1), name: body.name.clone(), permissions: body.permissions.clone() };
        roles.push(created.clone());
        Ok(created)
    }

    async fn update_role(&self, body: &RoleUpdate) -> Result<Role> {
        self.pass_gate().await;
        self.enter("update_role")?;
        let mut roles = self.roles.lock().unwrap();
        let r = roles
            .iter_mut()
            .find(|r| r.id == body.id)
            .ok_or_else(|| Error::Server { status: 404, message: "role not found".into() })?;
        r.name = body.name.clone();
        r.permissions = body.permissions.clone();
        Ok(r.clone())
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn find_user(&self, identifier: &str) -> Result<User> {
        self.enter("find_user")?;
        self.users
            .lock()
            .unwrap()
            .get(identifier)
            .cloned()
            .ok_or_else(|| Error::Server { status: 404, message: "user not found".into() })
    }

    async fn assign_role(&self, user_id: &str, role_id: &str) -> Result<()> {
        self.pass_gate().await;
        self.enter("assign_role")?;
        let mut users = self.users.lock().unwrap();
        let u = users.get_mut(user_id).ok_or_else(|| Error::Server { status: 404, message: "user not found".into() })?;
        u.role = Some(role_id.to_string());
        Ok(())
    }
}
