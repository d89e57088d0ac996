use bson::doc;
use mongodb::Database;
use taskhive_db::models::User;

use super::base::{BaseDao, DaoResult};

/// Read-only view of the user directory. Account creation and profile
/// updates happen in the identity service.
pub struct UserDao {
    pub base: BaseDao<User>,
}

impl UserDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, User::COLLECTION),
        }
    }

    /// Case-insensitive username lookup, used to resolve `@mention` tokens.
    pub async fn find_by_username(&self, username: &str) -> DaoResult<Option<User>> {
        let pattern = format!("^{}$", regex::escape(username));
        self.base
            .find_one(doc! { "username": { "$regex": pattern, "$options": "i" } })
            .await
    }
}
