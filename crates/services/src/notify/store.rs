use async_trait::async_trait;
use bson::{oid::ObjectId, DateTime};
use taskhive_db::models::{Notification, NotificationType};

use crate::dao::base::DaoResult;

/// A task surfaced by a due-date query, together with who is assigned.
#[derive(Debug, Clone)]
pub struct DueTask {
    pub task_id: ObjectId,
    pub assignee_ids: Vec<ObjectId>,
}

/// Storage the notification engine is constructed with. Production uses
/// the MongoDB implementation; tests inject an in-memory double.
#[async_trait]
pub trait NotifyStore: Send + Sync {
    async fn insert_notification(&self, notification: &Notification) -> DaoResult<ObjectId>;

    async fn notification_exists(
        &self,
        user_id: ObjectId,
        task_id: ObjectId,
        notification_type: NotificationType,
    ) -> DaoResult<bool>;

    async fn task_assignees(&self, task_id: ObjectId) -> DaoResult<Vec<ObjectId>>;

    /// Case-insensitive username lookup against the user directory.
    async fn resolve_username(&self, username: &str) -> DaoResult<Option<ObjectId>>;

    /// Open tasks due in `(after, until]`.
    async fn tasks_due_between(&self, after: DateTime, until: DateTime)
        -> DaoResult<Vec<DueTask>>;

    /// Open tasks due at or before `at`.
    async fn tasks_overdue(&self, at: DateTime) -> DaoResult<Vec<DueTask>>;
}
