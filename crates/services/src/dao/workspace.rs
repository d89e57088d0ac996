use bson::{doc, oid::ObjectId, DateTime};
use mongodb::{ClientSession, Database};
use taskhive_db::models::{
    Application, ApplicationStatus, Role, Workspace, WorkspaceMember,
    role::{self, permissions},
};

use super::base::{BaseDao, DaoError, DaoResult};

/// Requested changes to a custom role. `None` fields are left untouched.
#[derive(Debug, Default, Clone)]
pub struct RoleChanges {
    pub name: Option<String>,
    pub color: Option<u32>,
    pub permissions: Option<u64>,
}

pub struct WorkspaceDao {
    pub base: BaseDao<Workspace>,
    pub members: BaseDao<WorkspaceMember>,
    pub roles: BaseDao<Role>,
    pub applications: BaseDao<Application>,
    db: Database,
}

impl WorkspaceDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Workspace::COLLECTION),
            members: BaseDao::new(db, WorkspaceMember::COLLECTION),
            roles: BaseDao::new(db, Role::COLLECTION),
            applications: BaseDao::new(db, Application::COLLECTION),
            db: db.clone(),
        }
    }

    /// Creates the workspace, its three default roles and the creator's
    /// Owner membership in one transaction. Either all of it exists
    /// afterwards or none of it does.
    pub async fn create(
        &self,
        name: String,
        description: Option<String>,
        owner_id: ObjectId,
    ) -> DaoResult<Workspace> {
        let mut session = self.db.client().start_session().await?;
        session.start_transaction().await?;

        let workspace_id = match self
            .create_in_session(&mut session, name, description, owner_id)
            .await
        {
            Ok(id) => {
                session.commit_transaction().await?;
                id
            }
            Err(e) => {
                let _ = session.abort_transaction().await;
                return Err(e);
            }
        };

        self.base.find_by_id(workspace_id).await
    }

    async fn create_in_session(
        &self,
        session: &mut ClientSession,
        name: String,
        description: Option<String>,
        owner_id: ObjectId,
    ) -> DaoResult<ObjectId> {
        let now = DateTime::now();
        let workspace = Workspace {
            id: None,
            name,
            description,
            owner_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let workspace_id = self.base.insert_one_with_session(&workspace, session).await?;

        let defaults = [
            (role::OWNER_ROLE, Some(0xE91E63), permissions::ALL),
            (role::ADMIN_ROLE, Some(0x2196F3), permissions::ADMIN),
            (role::MEMBER_ROLE, None, permissions::MEMBER),
        ];

        let mut owner_role_id = None;
        for (role_name, color, mask) in defaults {
            let role = Role {
                id: None,
                workspace_id,
                name: role_name.to_string(),
                color,
                permissions: mask,
                is_default: true,
                created_at: now,
                updated_at: now,
            };
            let role_id = self.roles.insert_one_with_session(&role, session).await?;
            if role_name == role::OWNER_ROLE {
                owner_role_id = Some(role_id);
            }
        }

        let owner_role_id = owner_role_id
            .ok_or_else(|| DaoError::Storage("owner role was not created".to_string()))?;
        self.insert_member_in_session(session, workspace_id, owner_id, owner_role_id, None)
            .await?;

        Ok(workspace_id)
    }

    /// Soft-deletes the workspace. Call sites gate this behind the
    /// admin-action authorization check.
    pub async fn delete(&self, workspace_id: ObjectId) -> DaoResult<bool> {
        self.base
            .update_one(
                doc! { "_id": workspace_id, "deleted_at": null },
                doc! { "$set": { "deleted_at": DateTime::now() } },
            )
            .await
    }

    // --- Roles ---

    pub async fn get_role(&self, workspace_id: ObjectId, role_id: ObjectId) -> DaoResult<Role> {
        self.roles
            .find_one(doc! { "_id": role_id, "workspace_id": workspace_id })
            .await?
            .ok_or(DaoError::NotFound)
    }

    pub async fn get_role_by_name(&self, workspace_id: ObjectId, name: &str) -> DaoResult<Role> {
        self.roles
            .find_one(doc! { "workspace_id": workspace_id, "name": name })
            .await?
            .ok_or(DaoError::NotFound)
    }

    pub async fn create_role(
        &self,
        workspace_id: ObjectId,
        name: String,
        color: Option<u32>,
        permissions: u64,
    ) -> DaoResult<Role> {
        if role::is_reserved_name(&name) {
            return Err(DaoError::Validation(format!(
                "'{name}' is a reserved role name"
            )));
        }
        let now = DateTime::now();
        let role = Role {
            id: None,
            workspace_id,
            name,
            color,
            permissions,
            is_default: false,
            created_at: now,
            updated_at: now,
        };
        let role_id = self.roles.insert_one(&role).await?;
        self.roles.find_by_id(role_id).await
    }

    pub async fn update_role(
        &self,
        workspace_id: ObjectId,
        role_id: ObjectId,
        changes: RoleChanges,
    ) -> DaoResult<bool> {
        let role = self.get_role(workspace_id, role_id).await?;
        if role.is_protected() {
            return Err(DaoError::Forbidden(
                "default roles cannot be modified".to_string(),
            ));
        }

        let mut set = doc! {};
        if let Some(name) = changes.name {
            if role::is_reserved_name(&name) {
                return Err(DaoError::Validation(format!(
                    "'{name}' is a reserved role name"
                )));
            }
            set.insert("name", name);
        }
        if let Some(color) = changes.color {
            set.insert("color", color as i64);
        }
        if let Some(mask) = changes.permissions {
            set.insert("permissions", mask as i64);
        }
        if set.is_empty() {
            return Ok(false);
        }

        self.roles
            .update_one(doc! { "_id": role_id }, doc! { "$set": set })
            .await
    }

    /// Refused while any member still holds the role; the refusal is final,
    /// not a retry condition.
    pub async fn delete_role(&self, workspace_id: ObjectId, role_id: ObjectId) -> DaoResult<bool> {
        let role = self.get_role(workspace_id, role_id).await?;
        if role.is_protected() {
            return Err(DaoError::Forbidden(
                "default roles cannot be deleted".to_string(),
            ));
        }

        let holders = self.members.count(doc! { "role_id": role_id }).await?;
        if holders > 0 {
            return Err(DaoError::Forbidden(format!(
                "role is still assigned to {holders} member(s)"
            )));
        }

        self.roles.delete_one(doc! { "_id": role_id }).await
    }

    // --- Members ---

    pub async fn add_member(
        &self,
        workspace_id: ObjectId,
        user_id: ObjectId,
        role_id: ObjectId,
        invited_by: Option<ObjectId>,
    ) -> DaoResult<WorkspaceMember> {
        let now = DateTime::now();
        let member = WorkspaceMember {
            id: None,
            workspace_id,
            user_id,
            role_id,
            invited_by,
            joined_at: now,
            created_at: now,
            updated_at: now,
        };
        let id = self.members.insert_one(&member).await?;
        self.members.find_by_id(id).await
    }

    async fn insert_member_in_session(
        &self,
        session: &mut ClientSession,
        workspace_id: ObjectId,
        user_id: ObjectId,
        role_id: ObjectId,
        invited_by: Option<ObjectId>,
    ) -> DaoResult<ObjectId> {
        let now = DateTime::now();
        let member = WorkspaceMember {
            id: None,
            workspace_id,
            user_id,
            role_id,
            invited_by,
            joined_at: now,
            created_at: now,
            updated_at: now,
        };
        self.members.insert_one_with_session(&member, session).await
    }

    pub async fn change_member_role(
        &self,
        workspace_id: ObjectId,
        user_id: ObjectId,
        role_id: ObjectId,
    ) -> DaoResult<bool> {
        let workspace = self.base.find_by_id(workspace_id).await?;
        if workspace.owner_id == user_id {
            return Err(DaoError::Forbidden(
                "the workspace creator's role cannot be changed".to_string(),
            ));
        }
        // The role must belong to this workspace.
        self.get_role(workspace_id, role_id).await?;

        self.members
            .update_one(
                doc! { "workspace_id": workspace_id, "user_id": user_id },
                doc! { "$set": { "role_id": role_id } },
            )
            .await
    }

    pub async fn remove_member(
        &self,
        workspace_id: ObjectId,
        user_id: ObjectId,
    ) -> DaoResult<bool> {
        let workspace = self.base.find_by_id(workspace_id).await?;
        if workspace.owner_id == user_id {
            return Err(DaoError::Forbidden(
                "the workspace creator cannot be removed".to_string(),
            ));
        }

        self.members
            .delete_one(doc! { "workspace_id": workspace_id, "user_id": user_id })
            .await
    }

    /// Membership and role of a user within a workspace, if any.
    pub async fn member_role(
        &self,
        workspace_id: ObjectId,
        user_id: ObjectId,
    ) -> DaoResult<Option<(WorkspaceMember, Role)>> {
        let Some(member) = self
            .members
            .find_one(doc! { "workspace_id": workspace_id, "user_id": user_id })
            .await?
        else {
            return Ok(None);
        };
        let role = self.roles.find_by_id(member.role_id).await?;
        Ok(Some((member, role)))
    }

    // --- Applications ---

    pub async fn submit_application(
        &self,
        workspace_id: ObjectId,
        user_id: ObjectId,
        message: Option<String>,
    ) -> DaoResult<Application> {
        let pending = bson::to_bson(&ApplicationStatus::Pending)?;
        let already_pending = self
            .applications
            .exists(doc! {
                "workspace_id": workspace_id,
                "user_id": user_id,
                "status": pending,
            })
            .await?;
        if already_pending {
            return Err(DaoError::Validation(
                "an application is already pending for this user".to_string(),
            ));
        }

        let now = DateTime::now();
        let application = Application {
            id: None,
            workspace_id,
            user_id,
            message,
            status: ApplicationStatus::Pending,
            resolved_by: None,
            resolved_at: None,
            created_at: now,
            updated_at: now,
        };
        let id = self.applications.insert_one(&application).await?;
        self.applications.find_by_id(id).await
    }

    pub async fn pending_applications(
        &self,
        workspace_id: ObjectId,
    ) -> DaoResult<Vec<Application>> {
        let pending = bson::to_bson(&ApplicationStatus::Pending)?;
        self.applications
            .find_many(
                doc! { "workspace_id": workspace_id, "status": pending },
                Some(doc! { "created_at": 1 }),
            )
            .await
    }

    /// Flips the application to approved and inserts the membership (with
    /// the default Member role) in one transaction.
    pub async fn approve_application(
        &self,
        workspace_id: ObjectId,
        application_id: ObjectId,
        resolver_id: ObjectId,
    ) -> DaoResult<WorkspaceMember> {
        let application = self
            .applications
            .find_one(doc! { "_id": application_id, "workspace_id": workspace_id })
            .await?
            .ok_or(DaoError::NotFound)?;
        if application.status != ApplicationStatus::Pending {
            return Err(DaoError::Validation(
                "application is already resolved".to_string(),
            ));
        }

        let member_role = self
            .get_role_by_name(workspace_id, role::MEMBER_ROLE)
            .await?;
        let member_role_id = member_role
            .id
            .ok_or_else(|| DaoError::Storage("member role has no id".to_string()))?;

        let mut session = self.db.client().start_session().await?;
        session.start_transaction().await?;

        let member_id = match self
            .resolve_application_in_session(
                &mut session,
                application_id,
                &application,
                member_role_id,
                resolver_id,
            )
            .await
        {
            Ok(id) => {
                session.commit_transaction().await?;
                id
            }
            Err(e) => {
                let _ = session.abort_transaction().await;
                return Err(e);
            }
        };

        self.members.find_by_id(member_id).await
    }

    async fn resolve_application_in_session(
        &self,
        session: &mut ClientSession,
        application_id: ObjectId,
        application: &Application,
        member_role_id: ObjectId,
        resolver_id: ObjectId,
    ) -> DaoResult<ObjectId> {
        let approved = bson::to_bson(&ApplicationStatus::Approved)?;
        self.applications
            .update_one_with_session(
                doc! { "_id": application_id },
                doc! { "$set": {
                    "status": approved,
                    "resolved_by": resolver_id,
                    "resolved_at": DateTime::now(),
                } },
                session,
            )
            .await?;

        self.insert_member_in_session(
            session,
            application.workspace_id,
            application.user_id,
            member_role_id,
            Some(resolver_id),
        )
        .await
    }

    pub async fn reject_application(
        &self,
        workspace_id: ObjectId,
        application_id: ObjectId,
        resolver_id: ObjectId,
    ) -> DaoResult<bool> {
        let application = self
            .applications
            .find_one(doc! { "_id": application_id, "workspace_id": workspace_id })
            .await?
            .ok_or(DaoError::NotFound)?;
        if application.status != ApplicationStatus::Pending {
            return Err(DaoError::Validation(
                "application is already resolved".to_string(),
            ));
        }

        let rejected = bson::to_bson(&ApplicationStatus::Rejected)?;
        self.applications
            .update_one(
                doc! { "_id": application_id },
                doc! { "$set": {
                    "status": rejected,
                    "resolved_by": resolver_id,
                    "resolved_at": DateTime::now(),
                } },
            )
            .await
    }
}
