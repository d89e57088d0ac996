use std::sync::Arc;

use async_trait::async_trait;
use bson::{oid::ObjectId, DateTime};
use taskhive_db::models::{Activity, ActivityType, TaskStatus};

use crate::dao::base::{DaoError, DaoResult};

#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn insert_activity(&self, activity: &Activity) -> DaoResult<ObjectId>;
}

/// A not-yet-validated activity, typically assembled from a request by
/// the calling controller. Callers record one activity per logically
/// changed aspect (title, status, due date, ...) so the task-edit
/// notification rule can fan out per change.
#[derive(Debug, Clone)]
pub struct ActivityDraft {
    pub task_id: ObjectId,
    pub user_id: ObjectId,
    pub activity_type: ActivityType,
    pub previous_status: Option<TaskStatus>,
    pub new_status: Option<TaskStatus>,
    pub edit_field: Option<String>,
}

impl ActivityDraft {
    pub fn task_created(task_id: ObjectId, user_id: ObjectId) -> Self {
        Self {
            task_id,
            user_id,
            activity_type: ActivityType::CreateTask,
            previous_status: None,
            new_status: None,
            edit_field: None,
        }
    }

    pub fn task_moved(
        task_id: ObjectId,
        user_id: ObjectId,
        previous_status: TaskStatus,
        new_status: TaskStatus,
    ) -> Self {
        Self {
            task_id,
            user_id,
            activity_type: ActivityType::MoveTask,
            previous_status: Some(previous_status),
            new_status: Some(new_status),
            edit_field: None,
        }
    }

    pub fn task_edited(task_id: ObjectId, user_id: ObjectId, edit_field: impl Into<String>) -> Self {
        Self {
            task_id,
            user_id,
            activity_type: ActivityType::EditTask,
            previous_status: None,
            new_status: None,
            edit_field: Some(edit_field.into()),
        }
    }

    /// Field presence is conditional on the type in both directions:
    /// required fields must be there, fields of other types must not.
    fn validate(&self) -> DaoResult<()> {
        let has_statuses = self.previous_status.is_some() || self.new_status.is_some();
        let edit_field_blank = self
            .edit_field
            .as_deref()
            .is_none_or(|field| field.trim().is_empty());

        match self.activity_type {
            ActivityType::MoveTask => {
                if self.previous_status.is_none() || self.new_status.is_none() {
                    return Err(DaoError::Validation(
                        "a move activity requires both the previous and the new status"
                            .to_string(),
                    ));
                }
                if self.edit_field.is_some() {
                    return Err(DaoError::Validation(
                        "a move activity does not carry an edit description".to_string(),
                    ));
                }
            }
            ActivityType::EditTask => {
                if edit_field_blank {
                    return Err(DaoError::Validation(
                        "an edit activity requires a non-empty edit description".to_string(),
                    ));
                }
                if has_statuses {
                    return Err(DaoError::Validation(
                        "an edit activity does not carry status fields".to_string(),
                    ));
                }
            }
            ActivityType::CreateTask => {
                if has_statuses || self.edit_field.is_some() {
                    return Err(DaoError::Validation(
                        "a create activity carries no extra fields".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Writes the immutable audit trail of task events. Drafts that violate
/// the field-presence rules are rejected before anything is written.
pub struct ActivityRecorder {
    store: Arc<dyn ActivityStore>,
}

impl ActivityRecorder {
    pub fn new(store: Arc<dyn ActivityStore>) -> Self {
        Self { store }
    }

    pub async fn record(&self, draft: ActivityDraft) -> DaoResult<Activity> {
        draft.validate()?;

        let mut activity = Activity {
            id: None,
            task_id: draft.task_id,
            user_id: draft.user_id,
            activity_type: draft.activity_type,
            previous_status: draft.previous_status,
            new_status: draft.new_status,
            edit_field: draft.edit_field,
            created_at: DateTime::now(),
        };
        let id = self.store.insert_activity(&activity).await?;
        activity.id = Some(id);
        Ok(activity)
    }
}
