//! SendInvite command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::WriteBatch;
use crate::types::{ActorId, MemberRole, Notification, ProjectId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use tracing::info;

/// Invite an actor to a project (admin only)
#[operation(
    verb = "send",
    noun = "invite",
    description = "Invite an actor to join a project"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct SendInvite {
    /// The project ID
    pub project_id: ProjectId,
    /// The invited actor
    pub recipient_id: ActorId,
    /// Role granted on acceptance
    #[serde(default)]
    pub role: MemberRole,
}

impl SendInvite {
    pub fn new(project_id: impl Into<ProjectId>, recipient_id: impl Into<ActorId>) -> Self {
        Self {
            project_id: project_id.into(),
            recipient_id: recipient_id.into(),
            role: MemberRole::Member,
        }
    }

    pub fn with_role(mut self, role: MemberRole) -> Self {
        self.role = role;
        self
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for SendInvite {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let actor = ctx.current_actor().await?;
            let _tx = ctx.transaction().await?;
            ctx.read_project(&self.project_id).await?;
            ctx.require_admin(&self.project_id, &actor).await?;

            if ctx
                .find_member(&self.project_id, &self.recipient_id)
                .await?
                .is_some()
            {
                return Err(SprintboardError::DuplicateMember {
                    project_id: self.project_id.to_string(),
                    actor: self.recipient_id.to_string(),
                });
            }

            let existing: Vec<Notification> = ctx
                .query_by("project_id", self.project_id.as_str())
                .await?;
            if existing
                .iter()
                .any(|n| n.recipient_id == self.recipient_id && n.is_pending())
            {
                return Err(SprintboardError::DuplicateInvite {
                    project_id: self.project_id.to_string(),
                    recipient: self.recipient_id.to_string(),
                });
            }

            let invite = Notification::invite(
                self.project_id.clone(),
                actor,
                self.recipient_id.clone(),
                self.role,
            );
            let mut batch = WriteBatch::new();
            batch.put(&invite)?;
            ctx.commit(batch).await?;

            info!(invite_id = %invite.id, recipient = %invite.recipient_id, "invite sent");
            Ok(serde_json::to_value(&invite)?)
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::invite::DeclineInvite;
    use crate::test_support::{memory_context, run, seed_project};

    #[tokio::test]
    async fn test_send_invite() {
        let ctx = memory_context("alice");
        let project_id = seed_project(&ctx, "Apollo").await;

        let result = run(&ctx, SendInvite::new(&project_id, "bob").with_role(MemberRole::Admin))
            .await
            .unwrap();
        assert_eq!(result["type"], "project_invite");
        assert_eq!(result["sender_id"], "alice");
        assert_eq!(result["recipient_id"], "bob");
        assert_eq!(result["role"], "admin");
        assert_eq!(result["status"], "pending");
    }

    #[tokio::test]
    async fn test_one_pending_invite_per_recipient() {
        let ctx = memory_context("alice");
        let project_id = seed_project(&ctx, "Apollo").await;
        let first = run(&ctx, SendInvite::new(&project_id, "bob")).await.unwrap();

        let err = run(&ctx, SendInvite::new(&project_id, "bob")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);

        // Another recipient on the same project is fine
        run(&ctx, SendInvite::new(&project_id, "carol")).await.unwrap();

        // Once answered, bob can be invited again
        run(&ctx.as_actor("bob"), DeclineInvite::new(first["id"].as_str().unwrap()))
            .await
            .unwrap();
        run(&ctx, SendInvite::new(&project_id, "bob")).await.unwrap();
    }

    #[tokio::test]
    async fn test_cannot_invite_existing_member() {
        let ctx = memory_context("alice");
        let project_id = seed_project(&ctx, "Apollo").await;

        let err = run(&ctx, SendInvite::new(&project_id, "alice")).await.unwrap_err();
        assert!(matches!(err, SprintboardError::DuplicateMember { .. }));
    }
}
