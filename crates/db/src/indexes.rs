use mongodb::{Database, IndexModel, options::IndexOptions};
use tracing::info;

pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    // Users
    create_indexes(
        db,
        "users",
        vec![
            index_unique(bson::doc! { "email": 1 }),
            index_unique(bson::doc! { "username": 1 }),
        ],
    )
    .await?;

    // Workspaces
    create_indexes(db, "workspaces", vec![index(bson::doc! { "owner_id": 1 })]).await?;

    // Workspace Members
    create_indexes(
        db,
        "workspace_members",
        vec![
            index_unique(bson::doc! { "workspace_id": 1, "user_id": 1 }),
            index(bson::doc! { "role_id": 1 }),
            index(bson::doc! { "user_id": 1 }),
        ],
    )
    .await?;

    // Roles
    create_indexes(
        db,
        "roles",
        vec![index_unique(bson::doc! { "workspace_id": 1, "name": 1 })],
    )
    .await?;

    // Applications
    create_indexes(
        db,
        "applications",
        vec![
            index(bson::doc! { "workspace_id": 1, "status": 1 }),
            index(bson::doc! { "user_id": 1 }),
        ],
    )
    .await?;

    // Tasks
    create_indexes(
        db,
        "tasks",
        vec![
            index(bson::doc! { "due_at": 1 }),
            index(bson::doc! { "workspace_id": 1, "status": 1 }),
        ],
    )
    .await?;

    // Notifications
    create_indexes(
        db,
        "notifications",
        vec![
            index(bson::doc! { "user_id": 1, "is_read": 1, "created_at": -1 }),
            // Existence probe for the due-date sweep.
            index(bson::doc! { "user_id": 1, "task_id": 1, "notification_type": 1 }),
        ],
    )
    .await?;

    // Activities
    create_indexes(
        db,
        "activities",
        vec![index(bson::doc! { "task_id": 1, "created_at": -1 })],
    )
    .await?;

    info!("All indexes ensured");
    Ok(())
}

fn index(keys: bson::Document) -> IndexModel {
    IndexModel::builder().keys(keys).build()
}

fn index_unique(keys: bson::Document) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(true).build())
        .build()
}

async fn create_indexes(
    db: &Database,
    collection: &str,
    indexes: Vec<IndexModel>,
) -> Result<(), mongodb::error::Error> {
    db.collection::<bson::Document>(collection)
        .create_indexes(indexes)
        .await?;
    info!(collection, "Indexes created");
    Ok(())
}
