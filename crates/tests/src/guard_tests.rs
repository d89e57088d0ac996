use bson::oid::ObjectId;
use taskhive_db::models::role::permissions;
use taskhive_services::guard::GuardError;

use crate::fixtures::{guard, MemStore};

#[tokio::test]
async fn non_members_are_rejected() {
    let store = MemStore::new();
    let result = guard(&store)
        .authorize(ObjectId::new(), ObjectId::new(), permissions::INVITE_MEMBERS)
        .await;
    assert!(matches!(result, Err(GuardError::NotMember)));
}

#[tokio::test]
async fn members_without_the_capability_are_rejected() {
    let store = MemStore::new();
    let workspace_id = ObjectId::new();
    let user_id = ObjectId::new();
    let role_id = store.seed_role(workspace_id, "Member", permissions::MEMBER, true);
    store.seed_member(workspace_id, user_id, role_id);

    let result = guard(&store)
        .authorize(workspace_id, user_id, permissions::EDIT_MEMBER_ROLES)
        .await;

    assert!(matches!(result, Err(GuardError::InsufficientPermissions)));
}

#[tokio::test]
async fn members_with_the_capability_pass() {
    let store = MemStore::new();
    let workspace_id = ObjectId::new();
    let user_id = ObjectId::new();
    let role_id = store.seed_role(workspace_id, "Member", permissions::MEMBER, true);
    store.seed_member(workspace_id, user_id, role_id);

    let role = guard(&store)
        .authorize(workspace_id, user_id, permissions::INVITE_MEMBERS)
        .await
        .unwrap();

    assert_eq!(role.name, "Member");
}

#[tokio::test]
async fn membership_is_scoped_per_workspace() {
    let store = MemStore::new();
    let home = ObjectId::new();
    let elsewhere = ObjectId::new();
    let user_id = ObjectId::new();
    let role_id = store.seed_role(home, "Owner", permissions::ALL, true);
    store.seed_member(home, user_id, role_id);

    let result = guard(&store)
        .authorize(elsewhere, user_id, permissions::INVITE_MEMBERS)
        .await;

    assert!(matches!(result, Err(GuardError::NotMember)));
}

#[tokio::test]
async fn admin_actions_accept_admins_owners_and_full_admin_masks() {
    let store = MemStore::new();
    let workspace_id = ObjectId::new();
    let guard = guard(&store);

    let admin = ObjectId::new();
    let admin_role = store.seed_role(workspace_id, "Admin", permissions::ADMIN, true);
    store.seed_member(workspace_id, admin, admin_role);
    assert!(guard
        .authorize_admin_action(workspace_id, admin)
        .await
        .is_ok());

    let owner = ObjectId::new();
    let owner_role = store.seed_role(workspace_id, "Owner", permissions::ALL, true);
    store.seed_member(workspace_id, owner, owner_role);
    assert!(guard
        .authorize_admin_action(workspace_id, owner)
        .await
        .is_ok());

    // A custom role holding the full admin mask qualifies too.
    let ops = ObjectId::new();
    let ops_role = store.seed_role(workspace_id, "Ops", permissions::ADMIN, false);
    store.seed_member(workspace_id, ops, ops_role);
    assert!(guard.authorize_admin_action(workspace_id, ops).await.is_ok());
}

#[tokio::test]
async fn admin_actions_reject_plain_members() {
    let store = MemStore::new();
    let workspace_id = ObjectId::new();
    let user_id = ObjectId::new();
    let role_id = store.seed_role(workspace_id, "Member", permissions::MEMBER, true);
    store.seed_member(workspace_id, user_id, role_id);

    let result = guard(&store)
        .authorize_admin_action(workspace_id, user_id)
        .await;

    assert!(matches!(result, Err(GuardError::AdminOnly)));
}
