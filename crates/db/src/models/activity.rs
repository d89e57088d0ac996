use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::task::TaskStatus;

/// Immutable audit record of a task-level event. Never updated or deleted
/// once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub task_id: ObjectId,
    /// The acting user.
    pub user_id: ObjectId,
    pub activity_type: ActivityType,
    /// Set for move activities only, together with `new_status`.
    pub previous_status: Option<TaskStatus>,
    pub new_status: Option<TaskStatus>,
    /// Set for edit activities only: a short human-readable description of
    /// the changed aspect, e.g. "updated the title".
    pub edit_field: Option<String>,
    pub created_at: DateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    CreateTask,
    MoveTask,
    EditTask,
}

impl Activity {
    pub const COLLECTION: &'static str = "activities";
}
