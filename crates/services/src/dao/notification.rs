use bson::{doc, oid::ObjectId, DateTime};
use mongodb::Database;
use taskhive_db::models::{Notification, NotificationType};

use super::base::{BaseDao, DaoResult, PaginatedResult, PaginationParams};

pub struct NotificationDao {
    pub base: BaseDao<Notification>,
}

impl NotificationDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Notification::COLLECTION),
        }
    }

    pub async fn create(&self, notification: &Notification) -> DaoResult<ObjectId> {
        self.base.insert_one(notification).await
    }

    /// Whether the (recipient, task, type) triple has been notified before.
    /// The due-date sweep relies on this as its only dedup mechanism.
    pub async fn exists_for(
        &self,
        user_id: ObjectId,
        task_id: ObjectId,
        notification_type: NotificationType,
    ) -> DaoResult<bool> {
        let notification_type = bson::to_bson(&notification_type)?;
        self.base
            .exists(doc! {
                "user_id": user_id,
                "task_id": task_id,
                "notification_type": notification_type,
            })
            .await
    }

    pub async fn find_for_user(
        &self,
        user_id: ObjectId,
        unread_only: bool,
        params: &PaginationParams,
    ) -> DaoResult<PaginatedResult<Notification>> {
        let mut filter = doc! { "user_id": user_id };
        if unread_only {
            filter.insert("is_read", false);
        }
        self.base
            .find_paginated(filter, Some(doc! { "created_at": -1 }), params)
            .await
    }

    // Read-state toggles write through the raw collection: notifications
    // carry no updated_at field for the timestamped update path to stamp.

    pub async fn mark_read(
        &self,
        user_id: ObjectId,
        notification_id: ObjectId,
    ) -> DaoResult<bool> {
        let result = self
            .base
            .collection()
            .update_one(
                doc! { "_id": notification_id, "user_id": user_id },
                doc! { "$set": { "is_read": true, "read_at": DateTime::now() } },
            )
            .await?;
        Ok(result.modified_count > 0)
    }

    pub async fn mark_unread(
        &self,
        user_id: ObjectId,
        notification_id: ObjectId,
    ) -> DaoResult<bool> {
        let result = self
            .base
            .collection()
            .update_one(
                doc! { "_id": notification_id, "user_id": user_id },
                doc! { "$set": { "is_read": false, "read_at": null } },
            )
            .await?;
        Ok(result.modified_count > 0)
    }

    pub async fn mark_all_read(&self, user_id: ObjectId) -> DaoResult<u64> {
        let result = self
            .base
            .collection()
            .update_many(
                doc! { "user_id": user_id, "is_read": false },
                doc! { "$set": { "is_read": true, "read_at": DateTime::now() } },
            )
            .await?;
        Ok(result.modified_count)
    }

    /// Batch delete, scoped to the owning user: ids belonging to someone
    /// else are silently left alone.
    pub async fn delete_many(&self, user_id: ObjectId, ids: &[ObjectId]) -> DaoResult<u64> {
        self.base
            .delete_many(doc! {
                "_id": { "$in": ids.to_vec() },
                "user_id": user_id,
            })
            .await
    }
}
