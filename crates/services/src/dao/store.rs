use async_trait::async_trait;
use bson::{oid::ObjectId, DateTime};
use mongodb::Database;
use taskhive_db::models::{Activity, Notification, NotificationType, Role, Task, WorkspaceMember};

use crate::activity::ActivityStore;
use crate::guard::GuardStore;
use crate::notify::{DueTask, NotifyStore};

use super::activity::ActivityDao;
use super::base::DaoResult;
use super::notification::NotificationDao;
use super::task::TaskDao;
use super::user::UserDao;
use super::workspace::WorkspaceDao;

/// MongoDB-backed implementation of the storage interfaces the decision
/// components are constructed with.
pub struct MongoStore {
    pub users: UserDao,
    pub tasks: TaskDao,
    pub workspaces: WorkspaceDao,
    pub notifications: NotificationDao,
    pub activities: ActivityDao,
}

impl MongoStore {
    pub fn new(db: &Database) -> Self {
        Self {
            users: UserDao::new(db),
            tasks: TaskDao::new(db),
            workspaces: WorkspaceDao::new(db),
            notifications: NotificationDao::new(db),
            activities: ActivityDao::new(db),
        }
    }
}

#[async_trait]
impl NotifyStore for MongoStore {
    async fn insert_notification(&self, notification: &Notification) -> DaoResult<ObjectId> {
        self.notifications.create(notification).await
    }

    async fn notification_exists(
        &self,
        user_id: ObjectId,
        task_id: ObjectId,
        notification_type: NotificationType,
    ) -> DaoResult<bool> {
        self.notifications
            .exists_for(user_id, task_id, notification_type)
            .await
    }

    async fn task_assignees(&self, task_id: ObjectId) -> DaoResult<Vec<ObjectId>> {
        self.tasks.assignee_ids(task_id).await
    }

    async fn resolve_username(&self, username: &str) -> DaoResult<Option<ObjectId>> {
        Ok(self
            .users
            .find_by_username(username)
            .await?
            .and_then(|user| user.id))
    }

    async fn tasks_due_between(&self, after: DateTime, until: DateTime) -> DaoResult<Vec<DueTask>> {
        let tasks = self.tasks.find_due_between(after, until).await?;
        Ok(tasks.into_iter().filter_map(into_due_task).collect())
    }

    async fn tasks_overdue(&self, at: DateTime) -> DaoResult<Vec<DueTask>> {
        let tasks = self.tasks.find_overdue(at).await?;
        Ok(tasks.into_iter().filter_map(into_due_task).collect())
    }
}

fn into_due_task(task: Task) -> Option<DueTask> {
    Some(DueTask {
        task_id: task.id?,
        assignee_ids: task.assignee_ids,
    })
}

#[async_trait]
impl ActivityStore for MongoStore {
    async fn insert_activity(&self, activity: &Activity) -> DaoResult<ObjectId> {
        self.activities.insert(activity).await
    }
}

#[async_trait]
impl GuardStore for MongoStore {
    async fn member_role(
        &self,
        workspace_id: ObjectId,
        user_id: ObjectId,
    ) -> DaoResult<Option<(WorkspaceMember, Role)>> {
        self.workspaces.member_role(workspace_id, user_id).await
    }
}
