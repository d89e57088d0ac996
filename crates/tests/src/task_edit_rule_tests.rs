use bson::oid::ObjectId;
use taskhive_db::models::{NotificationType, TaskStatus};
use taskhive_services::activity::ActivityDraft;

use crate::fixtures::{engine, recorder, MemStore};

#[tokio::test]
async fn assignees_other_than_the_editor_are_notified() {
    let store = MemStore::new();
    let a = ObjectId::new();
    let b = ObjectId::new();
    let editor = ObjectId::new();
    let task_id = store.seed_task(TaskStatus::InProgress, None, &[a, b]);
    let activity_id = ObjectId::new();

    let created = engine(&store)
        .notify_task_edited(task_id, activity_id, editor)
        .await
        .unwrap();

    assert_eq!(created.len(), 2);
    for notification in &created {
        assert_eq!(
            notification.notification_type,
            NotificationType::TaskEdited
        );
        assert_eq!(notification.task_id, Some(task_id));
        assert_eq!(notification.activity_id, Some(activity_id));
        assert!(notification.comment_id.is_none());
    }
}

#[tokio::test]
async fn an_assignee_editing_their_own_task_is_not_notified() {
    let store = MemStore::new();
    let a = ObjectId::new();
    let b = ObjectId::new();
    let task_id = store.seed_task(TaskStatus::Todo, None, &[a, b]);

    let created = engine(&store)
        .notify_task_edited(task_id, ObjectId::new(), a)
        .await
        .unwrap();

    assert_eq!(created.len(), 1);
    assert_eq!(created[0].user_id, b);
    assert!(store.notifications_for(a).is_empty());
}

/// Two changed aspects recorded as two activities produce
/// 2 assignees x 2 activities = 4 notifications, none for the editor.
#[tokio::test]
async fn multi_aspect_edit_fans_out_per_activity() {
    let store = MemStore::new();
    let a = ObjectId::new();
    let b = ObjectId::new();
    let editor = ObjectId::new();
    let task_id = store.seed_task(TaskStatus::InProgress, None, &[a, b]);

    let recorder = recorder(&store);
    let engine = engine(&store);

    let mut activity_ids = Vec::new();
    for edit_field in ["updated the title", "set the due date"] {
        let activity = recorder
            .record(ActivityDraft::task_edited(task_id, editor, edit_field))
            .await
            .unwrap();
        let activity_id = activity.id.unwrap();
        engine
            .notify_task_edited(task_id, activity_id, editor)
            .await
            .unwrap();
        activity_ids.push(activity_id);
    }

    assert_eq!(store.notification_count(), 4);
    assert!(store.notifications_for(editor).is_empty());

    for user in [a, b] {
        let notifications = store.notifications_for(user);
        assert_eq!(notifications.len(), 2);
        let linked: Vec<_> = notifications
            .iter()
            .map(|n| n.activity_id.unwrap())
            .collect();
        assert_eq!(linked, activity_ids);
        for notification in &notifications {
            assert_eq!(notification.task_id, Some(task_id));
        }
    }
}
