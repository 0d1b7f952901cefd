//! Invite commands
//!
//! An invite is a `project_invite` notification addressed to one actor.
//! At most one invite per (project, recipient) may be pending; answered
//! invites stay on record and a new one can be sent afterwards.

mod accept;
mod decline;
mod list;
mod send;

pub use accept::AcceptInvite;
pub use decline::DeclineInvite;
pub use list::ListInvites;
pub use send::SendInvite;

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::types::{ActorId, Notification, NotificationId};

/// Load an invite that the caller may still answer
pub(crate) async fn pending_invite_for(
    ctx: &SprintboardContext,
    id: &NotificationId,
    actor: &ActorId,
) -> Result<Notification> {
    let invite = ctx.read_notification(id).await?;
    if &invite.recipient_id != actor {
        return Err(SprintboardError::Forbidden {
            actor: actor.to_string(),
            project_id: invite.project_id.to_string(),
            required: "the invitee",
        });
    }
    if !invite.is_pending() {
        return Err(SprintboardError::InviteAnswered {
            id: invite.id.to_string(),
            status: invite.status.to_string(),
        });
    }
    Ok(invite)
}
