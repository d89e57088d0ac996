use std::sync::Arc;

use async_trait::async_trait;
use bson::{oid::ObjectId, DateTime};
use parking_lot::Mutex;
use taskhive_db::models::{
    Activity, Notification, NotificationType, Role, TaskStatus, WorkspaceMember,
};
use taskhive_services::activity::ActivityStore;
use taskhive_services::dao::base::{DaoError, DaoResult};
use taskhive_services::guard::GuardStore;
use taskhive_services::notify::{DueTask, NotifyStore};

#[derive(Debug, Clone)]
pub struct SeededTask {
    pub id: ObjectId,
    pub status: TaskStatus,
    pub due_at: Option<DateTime>,
    pub assignee_ids: Vec<ObjectId>,
}

/// In-memory stand-in for the MongoDB store, good enough to drive the
/// engine, recorder and guard without a database.
#[derive(Default)]
pub struct MemStore {
    pub notifications: Mutex<Vec<Notification>>,
    pub activities: Mutex<Vec<Activity>>,
    users: Mutex<Vec<(ObjectId, String)>>,
    tasks: Mutex<Vec<SeededTask>>,
    members: Mutex<Vec<WorkspaceMember>>,
    roles: Mutex<Vec<Role>>,
    /// `Some(n)`: allow `n` more notification inserts, then fail.
    notification_budget: Mutex<Option<usize>>,
}

impl MemStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed_user(&self, username: &str) -> ObjectId {
        let id = ObjectId::new();
        self.users.lock().push((id, username.to_string()));
        id
    }

    pub fn seed_task(
        &self,
        status: TaskStatus,
        due_at: Option<DateTime>,
        assignee_ids: &[ObjectId],
    ) -> ObjectId {
        let id = ObjectId::new();
        self.tasks.lock().push(SeededTask {
            id,
            status,
            due_at,
            assignee_ids: assignee_ids.to_vec(),
        });
        id
    }

    pub fn seed_role(
        &self,
        workspace_id: ObjectId,
        name: &str,
        permissions: u64,
        is_default: bool,
    ) -> ObjectId {
        let id = ObjectId::new();
        let now = DateTime::now();
        self.roles.lock().push(Role {
            id: Some(id),
            workspace_id,
            name: name.to_string(),
            color: None,
            permissions,
            is_default,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn seed_member(&self, workspace_id: ObjectId, user_id: ObjectId, role_id: ObjectId) {
        let now = DateTime::now();
        self.members.lock().push(WorkspaceMember {
            id: Some(ObjectId::new()),
            workspace_id,
            user_id,
            role_id,
            invited_by: None,
            joined_at: now,
            created_at: now,
            updated_at: now,
        });
    }

    /// Lets `n` more notification writes through, then fails each one.
    pub fn fail_notification_inserts_after(&self, n: usize) {
        *self.notification_budget.lock() = Some(n);
    }

    pub fn notifications_for(&self, user_id: ObjectId) -> Vec<Notification> {
        self.notifications
            .lock()
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn notification_count(&self) -> usize {
        self.notifications.lock().len()
    }
}

#[async_trait]
impl NotifyStore for MemStore {
    async fn insert_notification(&self, notification: &Notification) -> DaoResult<ObjectId> {
        {
            let mut budget = self.notification_budget.lock();
            if let Some(remaining) = budget.as_mut() {
                if *remaining == 0 {
                    return Err(DaoError::Storage("simulated write failure".to_string()));
                }
                *remaining -= 1;
            }
        }
        let id = ObjectId::new();
        let mut stored = notification.clone();
        stored.id = Some(id);
        self.notifications.lock().push(stored);
        Ok(id)
    }

    async fn notification_exists(
        &self,
        user_id: ObjectId,
        task_id: ObjectId,
        notification_type: NotificationType,
    ) -> DaoResult<bool> {
        Ok(self.notifications.lock().iter().any(|n| {
            n.user_id == user_id
                && n.task_id == Some(task_id)
                && n.notification_type == notification_type
        }))
    }

    async fn task_assignees(&self, task_id: ObjectId) -> DaoResult<Vec<ObjectId>> {
        self.tasks
            .lock()
            .iter()
            .find(|t| t.id == task_id)
            .map(|t| t.assignee_ids.clone())
            .ok_or(DaoError::NotFound)
    }

    async fn resolve_username(&self, username: &str) -> DaoResult<Option<ObjectId>> {
        Ok(self
            .users
            .lock()
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(username))
            .map(|(id, _)| *id))
    }

    async fn tasks_due_between(&self, after: DateTime, until: DateTime) -> DaoResult<Vec<DueTask>> {
        Ok(self
            .tasks
            .lock()
            .iter()
            .filter(|t| t.status != TaskStatus::Done)
            .filter(|t| t.due_at.is_some_and(|due| due > after && due <= until))
            .map(|t| DueTask {
                task_id: t.id,
                assignee_ids: t.assignee_ids.clone(),
            })
            .collect())
    }

    async fn tasks_overdue(&self, at: DateTime) -> DaoResult<Vec<DueTask>> {
        Ok(self
            .tasks
            .lock()
            .iter()
            .filter(|t| t.status != TaskStatus::Done)
            .filter(|t| t.due_at.is_some_and(|due| due <= at))
            .map(|t| DueTask {
                task_id: t.id,
                assignee_ids: t.assignee_ids.clone(),
            })
            .collect())
    }
}

#[async_trait]
impl ActivityStore for MemStore {
    async fn insert_activity(&self, activity: &Activity) -> DaoResult<ObjectId> {
        let id = ObjectId::new();
        let mut stored = activity.clone();
        stored.id = Some(id);
        self.activities.lock().push(stored);
        Ok(id)
    }
}

#[async_trait]
impl GuardStore for MemStore {
    async fn member_role(
        &self,
        workspace_id: ObjectId,
        user_id: ObjectId,
    ) -> DaoResult<Option<(WorkspaceMember, Role)>> {
        let Some(member) = self
            .members
            .lock()
            .iter()
            .find(|m| m.workspace_id == workspace_id && m.user_id == user_id)
            .cloned()
        else {
            return Ok(None);
        };
        let role = self
            .roles
            .lock()
            .iter()
            .find(|r| r.id == Some(member.role_id))
            .cloned()
            .ok_or(DaoError::NotFound)?;
        Ok(Some((member, role)))
    }
}
