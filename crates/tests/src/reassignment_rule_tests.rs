use bson::oid::ObjectId;
use taskhive_db::models::NotificationType;

use crate::fixtures::{engine, MemStore};

#[tokio::test]
async fn added_and_removed_users_get_distinct_messages() {
    let store = MemStore::new();
    let x = ObjectId::new();
    let y = ObjectId::new();
    let z = ObjectId::new();
    let changer = ObjectId::new();
    let task_id = ObjectId::new();

    let created = engine(&store)
        .notify_reassigned(task_id, &[x, y], &[z], changer)
        .await
        .unwrap();

    assert_eq!(created.len(), 3);
    for user in [x, y] {
        let notifications = store.notifications_for(user);
        assert_eq!(notifications.len(), 1);
        assert_eq!(
            notifications[0].notification_type,
            NotificationType::TaskReassigned
        );
        assert_eq!(notifications[0].message.as_deref(), Some("assigned"));
        assert_eq!(notifications[0].task_id, Some(task_id));
        assert!(notifications[0].comment_id.is_none());
        assert!(notifications[0].activity_id.is_none());
    }

    let for_z = store.notifications_for(z);
    assert_eq!(for_z.len(), 1);
    assert_eq!(for_z[0].message.as_deref(), Some("removed"));
}

#[tokio::test]
async fn the_changer_is_excluded_from_both_sets() {
    let store = MemStore::new();
    let changer = ObjectId::new();
    let other = ObjectId::new();

    let created = engine(&store)
        .notify_reassigned(ObjectId::new(), &[changer, other], &[changer], changer)
        .await
        .unwrap();

    assert_eq!(created.len(), 1);
    assert_eq!(created[0].user_id, other);
    assert!(store.notifications_for(changer).is_empty());
}

/// Task creation with initial assignees reuses the added path.
#[tokio::test]
async fn initial_assignees_are_notified_as_assigned() {
    let store = MemStore::new();
    let a = ObjectId::new();
    let b = ObjectId::new();
    let author = ObjectId::new();

    let created = engine(&store)
        .notify_reassigned(ObjectId::new(), &[a, b], &[], author)
        .await
        .unwrap();

    assert_eq!(created.len(), 2);
    for notification in &created {
        assert_eq!(notification.message.as_deref(), Some("assigned"));
    }
}

#[tokio::test]
async fn empty_sets_create_nothing() {
    let store = MemStore::new();

    let created = engine(&store)
        .notify_reassigned(ObjectId::new(), &[], &[], ObjectId::new())
        .await
        .unwrap();

    assert!(created.is_empty());
}
