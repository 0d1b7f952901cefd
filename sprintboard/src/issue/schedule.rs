//! ScheduleIssue command

use super::placement_target;
use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::WriteBatch;
use crate::types::{IssueId, SprintId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Put an issue into a sprint. Status, assignee and sequence are untouched.
#[operation(
    verb = "schedule",
    noun = "issue",
    description = "Move an issue into a sprint"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct ScheduleIssue {
    /// The issue ID
    pub id: IssueId,
    /// Target sprint in the same project
    pub sprint_id: SprintId,
}

impl ScheduleIssue {
    pub fn new(id: impl Into<IssueId>, sprint_id: impl Into<SprintId>) -> Self {
        Self {
            id: id.into(),
            sprint_id: sprint_id.into(),
        }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for ScheduleIssue {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let _tx = ctx.transaction().await?;
            let mut issue = ctx.read_issue(&self.id).await?;
            let sprint = placement_target(ctx, &self.sprint_id, &issue.project_id).await?;

            issue.sprint_id = Some(sprint.id);
            let mut batch = WriteBatch::new();
            batch.put(&issue)?;
            ctx.commit(batch).await?;

            Ok(serde_json::to_value(&issue)?)
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }

    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        vec![self.id.to_string(), self.sprint_id.to_string()]
    }
}
