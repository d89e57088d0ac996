use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// A request to join a workspace, resolved by a member holding the
/// manage-applications capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub workspace_id: ObjectId,
    pub user_id: ObjectId,
    pub message: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
    pub resolved_by: Option<ObjectId>,
    pub resolved_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl Application {
    pub const COLLECTION: &'static str = "applications";
}
