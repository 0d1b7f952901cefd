//! AcceptInvite command

use super::pending_invite_for;
use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::WriteBatch;
use crate::types::{InviteStatus, Member, NotificationId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use tracing::info;

/// Accept an invite addressed to the caller; creates the membership
#[operation(
    verb = "accept",
    noun = "invite",
    description = "Accept a project invite and join the project"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct AcceptInvite {
    /// The invite (notification) ID
    pub id: NotificationId,
}

impl AcceptInvite {
    pub fn new(id: impl Into<NotificationId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for AcceptInvite {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let actor = ctx.current_actor().await?;
            let _tx = ctx.transaction().await?;
            let mut invite = pending_invite_for(ctx, &self.id, &actor).await?;
            ctx.read_project(&invite.project_id).await?;

            invite.status = InviteStatus::Accepted;
            let mut batch = WriteBatch::new();
            batch.put(&invite)?;

            // Joined by other means since the invite was sent: keep that membership
            let member = match ctx.find_member(&invite.project_id, &actor).await? {
                Some(existing) => existing,
                None => {
                    let member = Member::new(invite.project_id.clone(), actor, invite.role);
                    batch.put(&member)?;
                    member
                }
            };
            ctx.commit(batch).await?;

            info!(invite_id = %invite.id, project_id = %invite.project_id, "invite accepted");
            Ok(json!({
                "invite": invite,
                "member": member,
            }))
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::invite::SendInvite;
    use crate::test_support::{memory_context, run, seed_project};
    use crate::types::{ActorId, MemberRole};

    #[tokio::test]
    async fn test_accept_creates_member() {
        let ctx = memory_context("alice");
        let project_id = seed_project(&ctx, "Apollo").await;
        let invite = run(&ctx, SendInvite::new(&project_id, "bob").with_role(MemberRole::Admin))
            .await
            .unwrap();

        let bob = ctx.as_actor("bob");
        let result = run(&bob, AcceptInvite::new(invite["id"].as_str().unwrap()))
            .await
            .unwrap();
        assert_eq!(result["invite"]["status"], "accepted");
        assert_eq!(result["member"]["role"], "admin");

        let member = ctx
            .find_member(&project_id, &ActorId::from_string("bob"))
            .await
            .unwrap();
        assert!(member.is_some());
    }

    #[tokio::test]
    async fn test_only_recipient_may_accept() {
        let ctx = memory_context("alice");
        let project_id = seed_project(&ctx, "Apollo").await;
        let invite = run(&ctx, SendInvite::new(&project_id, "bob")).await.unwrap();

        let err = run(&ctx.as_actor("mallory"), AcceptInvite::new(invite["id"].as_str().unwrap()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_cannot_accept_twice() {
        let ctx = memory_context("alice");
        let project_id = seed_project(&ctx, "Apollo").await;
        let invite = run(&ctx, SendInvite::new(&project_id, "bob")).await.unwrap();
        let id = invite["id"].as_str().unwrap();

        let bob = ctx.as_actor("bob");
        run(&bob, AcceptInvite::new(id)).await.unwrap();
        let err = run(&bob, AcceptInvite::new(id)).await.unwrap_err();
        assert!(matches!(err, SprintboardError::InviteAnswered { .. }));
        assert_eq!(ctx.project_members(&project_id).await.unwrap().len(), 2);
    }
}
