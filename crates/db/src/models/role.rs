use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub workspace_id: ObjectId,
    pub name: String,
    /// Display color as 0xRRGGBB.
    pub color: Option<u32>,
    #[serde(default)]
    pub permissions: u64,
    #[serde(default)]
    pub is_default: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// Capability bits (u64 bitfield)
pub mod permissions {
    pub const DELETE_WORKSPACE: u64 = 1 << 0;
    pub const EDIT_INFO: u64 = 1 << 1;
    pub const INVITE_MEMBERS: u64 = 1 << 2;
    pub const EDIT_MEMBER_ROLES: u64 = 1 << 3;
    pub const MANAGE_APPLICATIONS: u64 = 1 << 4;

    /// Owner permissions (everything)
    pub const ALL: u64 = DELETE_WORKSPACE
        | EDIT_INFO
        | INVITE_MEMBERS
        | EDIT_MEMBER_ROLES
        | MANAGE_APPLICATIONS;

    /// Admin permissions (all except DELETE_WORKSPACE)
    pub const ADMIN: u64 = ALL & !DELETE_WORKSPACE;

    /// Default member permissions
    pub const MEMBER: u64 = INVITE_MEMBERS;

    pub fn has(permissions: u64, flag: u64) -> bool {
        permissions & flag != 0
    }
}

pub const OWNER_ROLE: &str = "Owner";
pub const ADMIN_ROLE: &str = "Admin";
pub const MEMBER_ROLE: &str = "Member";

/// The three role names every workspace is created with.
pub fn is_reserved_name(name: &str) -> bool {
    matches!(name, OWNER_ROLE | ADMIN_ROLE | MEMBER_ROLE)
}

impl Role {
    pub const COLLECTION: &'static str = "roles";

    /// Protected roles can never be renamed, recolored, re-permissioned
    /// or deleted.
    pub fn is_protected(&self) -> bool {
        self.is_default || is_reserved_name(&self.name)
    }
}
