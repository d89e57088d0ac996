pub mod activity;
pub mod application;
pub mod notification;
pub mod role;
pub mod task;
pub mod user;
pub mod workspace;
pub mod workspace_member;

pub use activity::{Activity, ActivityType};
pub use application::{Application, ApplicationStatus};
pub use notification::{Notification, NotificationType, Severity};
pub use role::Role;
pub use task::{Task, TaskPriority, TaskStatus};
pub use user::User;
pub use workspace::Workspace;
pub use workspace_member::WorkspaceMember;
