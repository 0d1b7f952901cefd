//! DeleteSprint command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::{Collection, WriteBatch};
use crate::types::SprintId;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use tracing::info;

/// Delete a sprint; its issues return to the backlog in the same batch
#[operation(
    verb = "delete",
    noun = "sprint",
    description = "Delete a sprint and return its issues to the backlog"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteSprint {
    /// The sprint ID
    pub id: SprintId,
}

impl DeleteSprint {
    pub fn new(id: impl Into<SprintId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for DeleteSprint {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let _tx = ctx.transaction().await?;
            let sprint = ctx.read_sprint(&self.id).await?;
            let issues = ctx.sprint_issues(&sprint.id).await?;

            let mut batch = WriteBatch::new();
            let mut returned = Vec::with_capacity(issues.len());
            for mut issue in issues {
                issue.sprint_id = None;
                batch.put(&issue)?;
                returned.push(issue.id);
            }
            batch.delete(Collection::Sprints, sprint.id.as_str());
            ctx.commit(batch).await?;

            info!(sprint_id = %sprint.id, returned = returned.len(), "sprint deleted");
            Ok(json!({
                "deleted": true,
                "id": sprint.id,
                "returned_to_backlog": returned,
            }))
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }

    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        vec![self.id.to_string()]
    }
}
