use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// One fact surfaced to one user. Owned by `user_id`: only that user (or a
/// batch operation scoped to them) may toggle or delete it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub notification_type: NotificationType,
    pub severity: Severity,
    pub message: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    pub read_at: Option<DateTime>,
    /// Links: only the ones relevant to `notification_type` are set.
    pub task_id: Option<ObjectId>,
    pub comment_id: Option<ObjectId>,
    pub activity_id: Option<ObjectId>,
    pub created_at: DateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Mention,
    NearOverdue,
    Overdue,
    TaskEdited,
    TaskReassigned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Medium,
    Critical,
}

impl Notification {
    pub const COLLECTION: &'static str = "notifications";
}
