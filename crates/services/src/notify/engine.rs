use std::collections::HashSet;
use std::sync::Arc;

use bson::{oid::ObjectId, DateTime};
use taskhive_db::models::{Notification, NotificationType};
use tracing::debug;

use crate::dao::base::DaoResult;

use super::factory::{NotificationDraft, NotificationFactory};
use super::mentions::parse_mentions;
use super::store::NotifyStore;

/// Counts from one due-date sweep run, for the trigger to log.
#[derive(Debug, Default, Clone, Copy)]
pub struct SweepReport {
    pub near_due_created: u64,
    pub overdue_created: u64,
}

/// Turns domain events into notifications. One shared policy across all
/// rules: the user who caused an event is never notified about it.
pub struct NotificationEngine {
    store: Arc<dyn NotifyStore>,
    factory: NotificationFactory,
    near_due_window: chrono::Duration,
}

impl NotificationEngine {
    pub fn new(store: Arc<dyn NotifyStore>, near_due_window: chrono::Duration) -> Self {
        Self {
            factory: NotificationFactory::new(Arc::clone(&store)),
            store,
            near_due_window,
        }
    }

    /// Mention rule. Invoked once per stored comment: parses the text,
    /// resolves each username case-insensitively, drops names that resolve
    /// to nobody and any self-mention by the author, and notifies each
    /// remaining recipient once.
    pub async fn notify_mentions(
        &self,
        comment_id: ObjectId,
        task_id: ObjectId,
        author_id: ObjectId,
        text: &str,
    ) -> DaoResult<Vec<Notification>> {
        let mut created = Vec::new();
        let mut notified = HashSet::new();

        for username in parse_mentions(text) {
            let Some(user_id) = self.store.resolve_username(&username).await? else {
                debug!(%username, "mention does not resolve to a user, skipping");
                continue;
            };
            if user_id == author_id || !notified.insert(user_id) {
                continue;
            }
            let notification = self
                .factory
                .create(NotificationDraft::mention(user_id, task_id, comment_id))
                .await?;
            created.push(notification);
        }

        Ok(created)
    }

    /// Task-edit rule. Invoked once per recorded activity, so an edit that
    /// touches several aspects fans out once per aspect.
    pub async fn notify_task_edited(
        &self,
        task_id: ObjectId,
        activity_id: ObjectId,
        editor_id: ObjectId,
    ) -> DaoResult<Vec<Notification>> {
        let mut created = Vec::new();
        for assignee_id in self.store.task_assignees(task_id).await? {
            if assignee_id == editor_id {
                continue;
            }
            let notification = self
                .factory
                .create(NotificationDraft::task_edited(
                    assignee_id,
                    task_id,
                    activity_id,
                ))
                .await?;
            created.push(notification);
        }
        Ok(created)
    }

    /// Reassignment rule. `added` and `removed` are the set difference the
    /// caller computed between the old and new assignee lists; for a fresh
    /// task, `added` is the initial assignees and `removed` is empty.
    pub async fn notify_reassigned(
        &self,
        task_id: ObjectId,
        added: &[ObjectId],
        removed: &[ObjectId],
        changed_by: ObjectId,
    ) -> DaoResult<Vec<Notification>> {
        let mut created = Vec::new();
        for &user_id in added {
            if user_id == changed_by {
                continue;
            }
            created.push(
                self.factory
                    .create(NotificationDraft::assigned(user_id, task_id))
                    .await?,
            );
        }
        for &user_id in removed {
            if user_id == changed_by {
                continue;
            }
            created.push(
                self.factory
                    .create(NotificationDraft::unassigned(user_id, task_id))
                    .await?,
            );
        }
        Ok(created)
    }

    /// Due-date sweep. Safe to re-run at any cadence: a (recipient, task,
    /// type) triple is only ever notified once, checked against storage
    /// before each insert. A task that slides from near-overdue into
    /// overdue picks up one additional notification of the new type.
    pub async fn run_due_sweep(&self, now: DateTime) -> DaoResult<SweepReport> {
        let mut report = SweepReport::default();

        let until = DateTime::from_millis(
            now.timestamp_millis() + self.near_due_window.num_milliseconds(),
        );
        for task in self.store.tasks_due_between(now, until).await? {
            for user_id in task.assignee_ids {
                if self
                    .store
                    .notification_exists(user_id, task.task_id, NotificationType::NearOverdue)
                    .await?
                {
                    continue;
                }
                self.factory
                    .create(NotificationDraft::near_overdue(user_id, task.task_id))
                    .await?;
                report.near_due_created += 1;
            }
        }

        for task in self.store.tasks_overdue(now).await? {
            for user_id in task.assignee_ids {
                if self
                    .store
                    .notification_exists(user_id, task.task_id, NotificationType::Overdue)
                    .await?
                {
                    continue;
                }
                self.factory
                    .create(NotificationDraft::overdue(user_id, task.task_id))
                    .await?;
                report.overdue_created += 1;
            }
        }

        Ok(report)
    }
}
