//! Wire records for the role store and user directory

use serde::{Deserialize, Serialize};

use crate::selection::Selection;

/// A persisted, named bundle of permission ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Role {
    pub fn selection(&self) -> Selection {
        Selection::from_permissions(self.permissions.iter().cloned())
    }
}

/// `POST roles` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRole {
    pub name: String,
    pub permissions: Vec<String>,
}

/// `PUT roles` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleUpdate {
    pub id: String,
    pub name: String,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    /// Assigned role id, if any
    #[serde(default)]
    pub role: Option<String>,
}

/// `GET users/{identifier}` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserEnvelope {
    pub user: User,
}

/// `PATCH users/{id}/role` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRole {
    pub role_id: String,
}
