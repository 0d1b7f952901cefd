//! PromoteIssue command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::sequencing::{self, Promotion};
use crate::store::WriteBatch;
use crate::types::{IssueId, ProjectId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use std::collections::HashMap;
use tracing::debug;

/// Move an issue to the top of its project's backlog.
///
/// Rewrites the whole project to a contiguous `0..N` ordering with the
/// target first. Promoting the current top issue writes nothing.
#[operation(
    verb = "promote",
    noun = "issue",
    description = "Move an issue to the top of the backlog"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct PromoteIssue {
    /// The issue ID
    pub id: IssueId,
    /// Expected project of the issue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
}

impl PromoteIssue {
    pub fn new(id: impl Into<IssueId>) -> Self {
        Self {
            id: id.into(),
            project_id: None,
        }
    }

    pub fn in_project(mut self, project_id: impl Into<ProjectId>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for PromoteIssue {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let _tx = ctx.transaction().await?;
            let target = ctx.read_issue(&self.id).await?;
            if let Some(project_id) = &self.project_id {
                if &target.project_id != project_id {
                    return Err(SprintboardError::CrossProject {
                        resource: "issue",
                        id: target.id.to_string(),
                        project_id: project_id.to_string(),
                    });
                }
            }

            let issues = ctx.project_issues(&target.project_id).await?;
            let ordered: Vec<IssueId> = issues.iter().map(|i| i.id.clone()).collect();
            let promotion = sequencing::promote(&ordered, &target.id)
                .ok_or_else(|| SprintboardError::IssueNotFound { id: target.id.to_string() })?;

            let assignments = match promotion {
                Promotion::AlreadyFirst => {
                    debug!(issue_id = %target.id, "issue already at top");
                    return Ok(json!({ "id": target.id, "promoted": false, "updated": 0 }));
                }
                Promotion::Reordered(assignments) => assignments,
            };

            let mut by_id: HashMap<IssueId, _> =
                issues.into_iter().map(|i| (i.id.clone(), i)).collect();
            let mut batch = WriteBatch::new();
            for (id, sequence) in assignments {
                if let Some(mut issue) = by_id.remove(&id) {
                    if issue.sequence != sequence {
                        issue.sequence = sequence;
                        batch.put(&issue)?;
                    }
                }
            }
            let updated = batch.len();
            ctx.commit(batch).await?;

            debug!(issue_id = %target.id, updated, "issue promoted");
            Ok(json!({ "id": target.id, "promoted": true, "updated": updated }))
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }

    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        vec![self.id.to_string()]
    }
}
