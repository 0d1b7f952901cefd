//! UpdateMember command

use super::ensure_admin_remains;
use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::WriteBatch;
use crate::types::{MemberId, MemberRole};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Change a member's role (admin only)
#[operation(
    verb = "update",
    noun = "member",
    description = "Change a member's role"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateMember {
    /// The member ID
    pub id: MemberId,
    /// New role
    pub role: MemberRole,
}

impl UpdateMember {
    pub fn new(id: impl Into<MemberId>, role: MemberRole) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for UpdateMember {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let actor = ctx.current_actor().await?;
            let _tx = ctx.transaction().await?;
            let mut member = ctx.read_member(&self.id).await?;
            ctx.require_admin(&member.project_id, &actor).await?;

            if member.role.is_admin() && !self.role.is_admin() {
                let members = ctx.project_members(&member.project_id).await?;
                ensure_admin_remains(&member.project_id, &members, &member.id)?;
            }

            member.role = self.role;
            let mut batch = WriteBatch::new();
            batch.put(&member)?;
            ctx.commit(batch).await?;

            Ok(serde_json::to_value(&member)?)
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }
}
