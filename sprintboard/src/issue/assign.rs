//! AssignIssue command

use super::assignee_from;
use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::WriteBatch;
use crate::types::serde_ext::empty_as_none;
use crate::types::{ActorId, IssueId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Set or clear an issue's assignee. Status and sprint are untouched.
#[operation(
    verb = "assign",
    noun = "issue",
    description = "Assign an issue, or unassign it with an empty or missing assignee"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct AssignIssue {
    /// The issue ID
    pub id: IssueId,
    /// New assignee; empty or null unassigns
    #[serde(default, deserialize_with = "empty_as_none")]
    pub assignee_id: Option<ActorId>,
}

impl AssignIssue {
    pub fn new(id: impl Into<IssueId>, assignee_id: Option<&str>) -> Self {
        Self {
            id: id.into(),
            assignee_id: assignee_from(assignee_id),
        }
    }

    pub fn unassign(id: impl Into<IssueId>) -> Self {
        Self::new(id, None)
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for AssignIssue {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let _tx = ctx.transaction().await?;
            let mut issue = ctx.read_issue(&self.id).await?;

            issue.assignee_id = self.assignee_id.clone();
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
