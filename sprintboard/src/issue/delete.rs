//! DeleteIssue command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::{Collection, WriteBatch};
use crate::types::IssueId;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Delete an issue. Remaining sequences are left as they are.
#[operation(verb = "delete", noun = "issue", description = "Delete an issue")]
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteIssue {
    /// The issue ID
    pub id: IssueId,
}

impl DeleteIssue {
    pub fn new(id: impl Into<IssueId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for DeleteIssue {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let _tx = ctx.transaction().await?;
            let issue = ctx.read_issue(&self.id).await?;

            let mut batch = WriteBatch::new();
            batch.delete(Collection::Issues, issue.id.as_str());
            ctx.commit(batch).await?;

            Ok(json!({
                "deleted": true,
                "id": issue.id,
                "title": issue.title,
            }))
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }

    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        vec![self.id.to_string()]
    }
}
