//! DeclineInvite command

use super::pending_invite_for;
use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::WriteBatch;
use crate::types::{InviteStatus, NotificationId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Decline an invite addressed to the caller
#[operation(verb = "decline", noun = "invite", description = "Decline a project invite")]
#[derive(Debug, Deserialize, Serialize)]
pub struct DeclineInvite {
    /// The invite (notification) ID
    pub id: NotificationId,
}

impl DeclineInvite {
    pub fn new(id: impl Into<NotificationId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for DeclineInvite {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let actor = ctx.current_actor().await?;
            let _tx = ctx.transaction().await?;
            let mut invite = pending_invite_for(ctx, &self.id, &actor).await?;

            invite.status = InviteStatus::Declined;
            let mut batch = WriteBatch::new();
            batch.put(&invite)?;
            ctx.commit(batch).await?;

            Ok(serde_json::to_value(&invite)?)
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }
}
