//! DeleteMember command

use super::ensure_admin_remains;
use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::{Collection, WriteBatch};
use crate::types::MemberId;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Remove a member from a project (admin only)
#[operation(
    verb = "delete",
    noun = "member",
    description = "Remove a member from a project"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteMember {
    /// The member ID
    pub id: MemberId,
}

impl DeleteMember {
    pub fn new(id: impl Into<MemberId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for DeleteMember {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let actor = ctx.current_actor().await?;
            let _tx = ctx.transaction().await?;
            let member = ctx.read_member(&self.id).await?;
            ctx.require_admin(&member.project_id, &actor).await?;

            if member.role.is_admin() {
                let members = ctx.project_members(&member.project_id).await?;
                ensure_admin_remains(&member.project_id, &members, &member.id)?;
            }

            let mut batch = WriteBatch::new();
            batch.delete(Collection::Members, &member.id);
            ctx.commit(batch).await?;

            Ok(json!({
                "deleted": true,
                "id": member.id,
                "project_id": member.project_id,
                "actor_id": member.actor_id,
            }))
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }
}
