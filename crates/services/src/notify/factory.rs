use std::sync::Arc;

use bson::{oid::ObjectId, DateTime};
use taskhive_db::models::{Notification, NotificationType, Severity};

use crate::dao::base::DaoResult;

use super::store::NotifyStore;

/// What to notify whom about. The constructors populate exactly the links
/// that belong to each notification type.
#[derive(Debug, Clone)]
pub struct NotificationDraft {
    pub recipient_id: ObjectId,
    pub notification_type: NotificationType,
    pub severity: Severity,
    pub message: Option<String>,
    pub task_id: Option<ObjectId>,
    pub comment_id: Option<ObjectId>,
    pub activity_id: Option<ObjectId>,
}

impl NotificationDraft {
    pub fn mention(recipient_id: ObjectId, task_id: ObjectId, comment_id: ObjectId) -> Self {
        Self {
            recipient_id,
            notification_type: NotificationType::Mention,
            severity: Severity::Info,
            message: None,
            task_id: Some(task_id),
            comment_id: Some(comment_id),
            activity_id: None,
        }
    }

    pub fn task_edited(recipient_id: ObjectId, task_id: ObjectId, activity_id: ObjectId) -> Self {
        Self {
            recipient_id,
            notification_type: NotificationType::TaskEdited,
            severity: Severity::Info,
            message: None,
            task_id: Some(task_id),
            comment_id: None,
            activity_id: Some(activity_id),
        }
    }

    pub fn assigned(recipient_id: ObjectId, task_id: ObjectId) -> Self {
        Self {
            recipient_id,
            notification_type: NotificationType::TaskReassigned,
            severity: Severity::Info,
            message: Some("assigned".to_string()),
            task_id: Some(task_id),
            comment_id: None,
            activity_id: None,
        }
    }

    pub fn unassigned(recipient_id: ObjectId, task_id: ObjectId) -> Self {
        Self {
            recipient_id,
            notification_type: NotificationType::TaskReassigned,
            severity: Severity::Info,
            message: Some("removed".to_string()),
            task_id: Some(task_id),
            comment_id: None,
            activity_id: None,
        }
    }

    pub fn near_overdue(recipient_id: ObjectId, task_id: ObjectId) -> Self {
        Self {
            recipient_id,
            notification_type: NotificationType::NearOverdue,
            severity: Severity::Info,
            message: None,
            task_id: Some(task_id),
            comment_id: None,
            activity_id: None,
        }
    }

    pub fn overdue(recipient_id: ObjectId, task_id: ObjectId) -> Self {
        Self {
            recipient_id,
            notification_type: NotificationType::Overdue,
            severity: Severity::Critical,
            message: None,
            task_id: Some(task_id),
            comment_id: None,
            activity_id: None,
        }
    }
}

/// Thin persistence primitive: builds the record and writes exactly one
/// row. No validation beyond what the draft constructors guarantee, and
/// no retry; storage errors go straight back to the caller.
pub struct NotificationFactory {
    store: Arc<dyn NotifyStore>,
}

impl NotificationFactory {
    pub fn new(store: Arc<dyn NotifyStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, draft: NotificationDraft) -> DaoResult<Notification> {
        let mut notification = Notification {
            id: None,
            user_id: draft.recipient_id,
            notification_type: draft.notification_type,
            severity: draft.severity,
            message: draft.message,
            is_read: false,
            read_at: None,
            task_id: draft.task_id,
            comment_id: draft.comment_id,
            activity_id: draft.activity_id,
            created_at: DateTime::now(),
        };
        let id = self.store.insert_notification(&notification).await?;
        notification.id = Some(id);
        Ok(notification)
    }
}
