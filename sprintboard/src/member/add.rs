//! AddMember command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::WriteBatch;
use crate::types::{ActorId, Member, MemberRole, ProjectId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Add an actor to a project directly, without an invite (admin only)
#[operation(
    verb = "add",
    noun = "member",
    description = "Add an actor to a project with a role"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct AddMember {
    /// The project ID
    pub project_id: ProjectId,
    /// The actor to add
    pub actor_id: ActorId,
    /// Role in the project (admin or member)
    #[serde(default)]
    pub role: MemberRole,
}

impl AddMember {
    pub fn new(project_id: impl Into<ProjectId>, actor_id: impl Into<ActorId>) -> Self {
        Self {
            project_id: project_id.into(),
            actor_id: actor_id.into(),
            role: MemberRole::Member,
        }
    }

    pub fn with_role(mut self, role: MemberRole) -> Self {
        self.role = role;
        self
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for AddMember {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let actor = ctx.current_actor().await?;
            let _tx = ctx.transaction().await?;
            ctx.read_project(&self.project_id).await?;
            ctx.require_admin(&self.project_id, &actor).await?;

            if ctx.find_member(&self.project_id, &self.actor_id).await?.is_some() {
                return Err(SprintboardError::DuplicateMember {
                    project_id: self.project_id.to_string(),
                    actor: self.actor_id.to_string(),
                });
            }

            let member = Member::new(self.project_id.clone(), self.actor_id.clone(), self.role);
            let mut batch = WriteBatch::new();
            batch.put(&member)?;
            ctx.commit(batch).await?;

            Ok(serde_json::to_value(&member)?)
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }
}
