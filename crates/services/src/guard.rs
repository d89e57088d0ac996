use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use taskhive_db::models::{
    Role, WorkspaceMember,
    role::{self, permissions},
};
use thiserror::Error;

use crate::dao::base::{DaoError, DaoResult};

#[async_trait]
pub trait GuardStore: Send + Sync {
    async fn member_role(
        &self,
        workspace_id: ObjectId,
        user_id: ObjectId,
    ) -> DaoResult<Option<(WorkspaceMember, Role)>>;
}

/// Denials are ordinary outcomes the caller maps to distinct responses;
/// only `Store` is an actual failure.
#[derive(Debug, Error)]
pub enum GuardError {
    #[error("not a member of this workspace")]
    NotMember,
    #[error("insufficient permissions")]
    InsufficientPermissions,
    #[error("action is reserved for workspace admins")]
    AdminOnly,
    #[error(transparent)]
    Store(#[from] DaoError),
}

/// Workspace-scoped authorization for management endpoints. A deny must
/// short-circuit the guarded mutation entirely.
pub struct Guard {
    store: Arc<dyn GuardStore>,
}

impl Guard {
    pub fn new(store: Arc<dyn GuardStore>) -> Self {
        Self { store }
    }

    /// Allows the action iff the caller is a member whose role mask holds
    /// `capability`. Returns the resolved role on success.
    pub async fn authorize(
        &self,
        workspace_id: ObjectId,
        user_id: ObjectId,
        capability: u64,
    ) -> Result<Role, GuardError> {
        let (_, role) = self
            .store
            .member_role(workspace_id, user_id)
            .await?
            .ok_or(GuardError::NotMember)?;

        if !permissions::has(role.permissions, capability) {
            return Err(GuardError::InsufficientPermissions);
        }
        Ok(role)
    }

    /// Stricter gate for workspace deletion: only a role literally named
    /// "Admin" or one holding the full admin mask (Owner does) passes.
    pub async fn authorize_admin_action(
        &self,
        workspace_id: ObjectId,
        user_id: ObjectId,
    ) -> Result<Role, GuardError> {
        let (_, role) = self
            .store
            .member_role(workspace_id, user_id)
            .await?
            .ok_or(GuardError::NotMember)?;

        let full_admin = role.permissions & permissions::ADMIN == permissions::ADMIN;
        if role.name == role::ADMIN_ROLE || full_admin {
            Ok(role)
        } else {
            Err(GuardError::AdminOnly)
        }
    }
}
