use bson::{doc, oid::ObjectId, DateTime};
use mongodb::Database;
use taskhive_db::models::{Task, TaskStatus};

use super::base::{BaseDao, DaoResult};

pub struct TaskDao {
    pub base: BaseDao<Task>,
}

impl TaskDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Task::COLLECTION),
        }
    }

    pub async fn assignee_ids(&self, task_id: ObjectId) -> DaoResult<Vec<ObjectId>> {
        let task = self.base.find_by_id(task_id).await?;
        Ok(task.assignee_ids)
    }

    /// Open tasks with a due date in `(after, until]`.
    pub async fn find_due_between(&self, after: DateTime, until: DateTime) -> DaoResult<Vec<Task>> {
        let done = bson::to_bson(&TaskStatus::Done)?;
        self.base
            .find_many(
                doc! {
                    "status": { "$ne": done },
                    "due_at": { "$gt": after, "$lte": until },
                    "deleted_at": null,
                },
                Some(doc! { "due_at": 1 }),
            )
            .await
    }

    /// Open tasks whose due date has passed.
    pub async fn find_overdue(&self, at: DateTime) -> DaoResult<Vec<Task>> {
        let done = bson::to_bson(&TaskStatus::Done)?;
        self.base
            .find_many(
                doc! {
                    "status": { "$ne": done },
                    "due_at": { "$lte": at },
                    "deleted_at": null,
                },
                Some(doc! { "due_at": 1 }),
            )
            .await
    }
}
