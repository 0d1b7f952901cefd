//! Core types for the sprintboard engine

mod ids;
mod issue;
mod log;
mod notification;
mod operation;
mod project;
pub mod serde_ext;
mod sprint;
mod user;

pub use ids::{ActorId, IssueId, MemberId, NotificationId, ProjectId, SprintId};
pub use issue::{Issue, IssueStatus, IssueType, Priority};
pub use log::OperationResult;
pub use notification::{InviteStatus, Notification, NotificationKind};
pub use operation::{is_valid_operation, valid_operations, Noun, Operation, Verb};
pub use project::{Member, MemberRole, Project};
pub use sprint::{Sprint, SprintStatus};
pub use user::User;
