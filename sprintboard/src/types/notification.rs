//! Notifications. The only kind today is a project invite.

use super::ids::{ActorId, NotificationId, ProjectId};
use super::project::MemberRole;
use serde::{Deserialize, Serialize};

/// What a notification is about
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    #[default]
    ProjectInvite,
}

/// Lifecycle of an invite: pending until the recipient answers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
}

impl std::fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        };
        f.write_str(s)
    }
}

/// An invitation for `recipient_id` to join `project_id` with `role`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    pub recipient_id: ActorId,
    pub sender_id: ActorId,
    pub project_id: ProjectId,
    pub role: MemberRole,
    #[serde(default)]
    pub status: InviteStatus,
}

impl Notification {
    /// Create a pending project invite
    pub fn invite(
        project_id: ProjectId,
        sender_id: ActorId,
        recipient_id: ActorId,
        role: MemberRole,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            kind: NotificationKind::ProjectInvite,
            recipient_id,
            sender_id,
            project_id,
            role,
            status: InviteStatus::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == InviteStatus::Pending
    }
}
