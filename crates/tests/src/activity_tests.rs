use bson::oid::ObjectId;
use taskhive_db::models::{ActivityType, TaskStatus};
use taskhive_services::activity::ActivityDraft;
use taskhive_services::dao::base::DaoError;

use crate::fixtures::{recorder, MemStore};

#[tokio::test]
async fn move_without_statuses_fails_before_any_write() {
    let store = MemStore::new();
    let draft = ActivityDraft {
        task_id: ObjectId::new(),
        user_id: ObjectId::new(),
        activity_type: ActivityType::MoveTask,
        previous_status: None,
        new_status: None,
        edit_field: None,
    };

    let result = recorder(&store).record(draft).await;

    assert!(matches!(result, Err(DaoError::Validation(_))));
    assert!(store.activities.lock().is_empty());
}

#[tokio::test]
async fn move_with_half_a_status_pair_is_rejected() {
    let store = MemStore::new();
    let draft = ActivityDraft {
        task_id: ObjectId::new(),
        user_id: ObjectId::new(),
        activity_type: ActivityType::MoveTask,
        previous_status: Some(TaskStatus::Todo),
        new_status: None,
        edit_field: None,
    };

    let result = recorder(&store).record(draft).await;

    assert!(matches!(result, Err(DaoError::Validation(_))));
    assert!(store.activities.lock().is_empty());
}

#[tokio::test]
async fn blank_edit_field_is_rejected_like_a_missing_one() {
    let store = MemStore::new();
    let recorder = recorder(&store);

    for edit_field in ["", "   "] {
        let draft = ActivityDraft::task_edited(ObjectId::new(), ObjectId::new(), edit_field);
        let result = recorder.record(draft).await;
        assert!(matches!(result, Err(DaoError::Validation(_))));
    }

    let missing = ActivityDraft {
        task_id: ObjectId::new(),
        user_id: ObjectId::new(),
        activity_type: ActivityType::EditTask,
        previous_status: None,
        new_status: None,
        edit_field: None,
    };
    assert!(matches!(
        recorder.record(missing).await,
        Err(DaoError::Validation(_))
    ));
    assert!(store.activities.lock().is_empty());
}

#[tokio::test]
async fn create_activity_with_stray_fields_is_rejected() {
    let store = MemStore::new();
    let mut draft = ActivityDraft::task_created(ObjectId::new(), ObjectId::new());
    draft.edit_field = Some("updated the title".to_string());

    let result = recorder(&store).record(draft).await;

    assert!(matches!(result, Err(DaoError::Validation(_))));
    assert!(store.activities.lock().is_empty());
}

#[tokio::test]
async fn valid_drafts_persist_with_their_fields() {
    let store = MemStore::new();
    let recorder = recorder(&store);
    let task_id = ObjectId::new();
    let user_id = ObjectId::new();

    let created = recorder
        .record(ActivityDraft::task_created(task_id, user_id))
        .await
        .unwrap();
    assert!(created.id.is_some());
    assert_eq!(created.activity_type, ActivityType::CreateTask);

    let moved = recorder
        .record(ActivityDraft::task_moved(
            task_id,
            user_id,
            TaskStatus::Todo,
            TaskStatus::InProgress,
        ))
        .await
        .unwrap();
    assert_eq!(moved.previous_status, Some(TaskStatus::Todo));
    assert_eq!(moved.new_status, Some(TaskStatus::InProgress));

    let edited = recorder
        .record(ActivityDraft::task_edited(task_id, user_id, "updated the title"))
        .await
        .unwrap();
    assert_eq!(edited.edit_field.as_deref(), Some("updated the title"));

    assert_eq!(store.activities.lock().len(), 3);
}
