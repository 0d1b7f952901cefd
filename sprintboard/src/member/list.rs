//! ListMembers command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::types::ProjectId;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult};

/// List a project's members with their user profiles
#[operation(
    verb = "list",
    noun = "members",
    description = "List project members with resolved user profiles"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct ListMembers {
    /// The project ID
    pub project_id: ProjectId,
}

impl ListMembers {
    pub fn new(project_id: impl Into<ProjectId>) -> Self {
        Self {
            project_id: project_id.into(),
        }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for ListMembers {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let result: Result<Value> = async {
            ctx.read_project(&self.project_id).await?;
            let members = ctx.project_members(&self.project_id).await?;

            let mut entries = Vec::with_capacity(members.len());
            for member in &members {
                let user = ctx.resolve_user(Some(&member.actor_id)).await?;
                let mut entry = serde_json::to_value(member)?;
                entry["user"] = serde_json::to_value(user)?;
                entries.push(entry);
            }

            Ok(json!({
                "count": entries.len(),
                "members": entries,
            }))
        }
        .await;

        ExecutionResult::unlogged(result)
    }
}
