//! UnscheduleIssue command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::WriteBatch;
use crate::types::IssueId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Return an issue to the backlog; it keeps its sequence and status
#[operation(
    verb = "unschedule",
    noun = "issue",
    description = "Move an issue back to the backlog"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct UnscheduleIssue {
    /// The issue ID
    pub id: IssueId,
}

impl UnscheduleIssue {
    pub fn new(id: impl Into<IssueId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for UnscheduleIssue {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let _tx = ctx.transaction().await?;
            let mut issue = ctx.read_issue(&self.id).await?;

            issue.sprint_id = None;
            let mut batch = WriteBatch::new();
            batch.put(&issue)?;
            ctx.commit(batch).await?;

            Ok(serde_json::to_value(&issue)?)
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }

    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        vec![self.id.to_string()]
    }
}
