//! TransitionIssue command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::WriteBatch;
use crate::types::{IssueId, IssueStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use tracing::debug;

/// Move an issue to a status column; any status may follow any other
#[operation(
    verb = "transition",
    noun = "issue",
    description = "Set an issue's status (not_started, in_progress, completed)"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct TransitionIssue {
    /// The issue ID
    pub id: IssueId,
    /// Target status
    pub status: IssueStatus,
}

impl TransitionIssue {
    pub fn new(id: impl Into<IssueId>, status: IssueStatus) -> Self {
        Self {
            id: id.into(),
            status,
        }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for TransitionIssue {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let _tx = ctx.transaction().await?;
            let mut issue = ctx.read_issue(&self.id).await?;

            debug!(issue_id = %issue.id, from = ?issue.status, to = ?self.status, "issue transition");
            issue.status = self.status;
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
