//! ListIssues command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::types::ProjectId;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult};

/// List a project's issues in backlog order
#[operation(
    verb = "list",
    noun = "issues",
    description = "List issues of a project ordered by sequence"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct ListIssues {
    /// The project ID
    pub project_id: ProjectId,
    /// Only issues not scheduled into a sprint
    #[serde(default)]
    pub backlog_only: bool,
}

impl ListIssues {
    pub fn new(project_id: impl Into<ProjectId>) -> Self {
        Self {
            project_id: project_id.into(),
            backlog_only: false,
        }
    }

    pub fn backlog(mut self) -> Self {
        self.backlog_only = true;
        self
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for ListIssues {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let result: Result<Value> = async {
            let mut issues = ctx.project_issues(&self.project_id).await?;
            if self.backlog_only {
                issues.retain(|i| i.in_backlog());
            }

            Ok(json!({
                "count": issues.len(),
                "issues": issues,
            }))
        }
        .await;

        ExecutionResult::unlogged(result)
    }
}
