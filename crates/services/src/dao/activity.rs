use bson::{doc, oid::ObjectId};
use mongodb::Database;
use taskhive_db::models::Activity;

use super::base::{BaseDao, DaoResult, PaginatedResult, PaginationParams};

pub struct ActivityDao {
    pub base: BaseDao<Activity>,
}

impl ActivityDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Activity::COLLECTION),
        }
    }

    pub async fn insert(&self, activity: &Activity) -> DaoResult<ObjectId> {
        self.base.insert_one(activity).await
    }

    /// Audit trail of a task, newest first.
    pub async fn find_for_task(
        &self,
        task_id: ObjectId,
        params: &PaginationParams,
    ) -> DaoResult<PaginatedResult<Activity>> {
        self.base
            .find_paginated(
                doc! { "task_id": task_id },
                Some(doc! { "created_at": -1 }),
                params,
            )
            .await
    }
}
