//! DeleteProject command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::{Collection, WriteBatch};
use crate::types::{Notification, ProjectId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use tracing::info;

/// Hard-delete a project.
///
/// Members and invites go with it. Sprints stay until `prune sprints`;
/// issues stay addressable by id.
#[operation(
    verb = "delete",
    noun = "project",
    description = "Hard-delete a project with its members and invites"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteProject {
    /// The project ID
    pub id: ProjectId,
}

impl DeleteProject {
    pub fn new(id: impl Into<ProjectId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for DeleteProject {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let actor = ctx.current_actor().await?;
            let _tx = ctx.transaction().await?;
            ctx.read_project(&self.id).await?;
            ctx.require_admin(&self.id, &actor).await?;

            let members = ctx.project_members(&self.id).await?;
            let invites: Vec<Notification> = ctx.query_by("project_id", self.id.as_str()).await?;

            let mut batch = WriteBatch::new();
            batch.delete(Collection::Projects, &self.id);
            for member in &members {
                batch.delete(Collection::Members, &member.id);
            }
            for invite in &invites {
                batch.delete(Collection::Notifications, &invite.id);
            }
            ctx.commit(batch).await?;

            info!(
                project_id = %self.id,
                members = members.len(),
                invites = invites.len(),
                "project deleted"
            );
            Ok(json!({
                "deleted": true,
                "id": self.id,
                "members_removed": members.len(),
                "invites_removed": invites.len(),
            }))
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }
}
