//! ListSprints command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::types::{ProjectId, SprintStatus};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult};

/// List a project's sprints ordered by id
#[operation(
    verb = "list",
    noun = "sprints",
    description = "List sprints of a project, optionally by status"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct ListSprints {
    /// The project ID
    pub project_id: ProjectId,
    /// Only sprints with this status
    pub status: Option<SprintStatus>,
}

impl ListSprints {
    pub fn new(project_id: impl Into<ProjectId>) -> Self {
        Self {
            project_id: project_id.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: SprintStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for ListSprints {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let result: Result<Value> = async {
            let sprints: Vec<_> = ctx
                .project_sprints(&self.project_id)
                .await?
                .into_iter()
                .filter(|s| self.status.map_or(true, |status| s.status == status))
                .collect();

            Ok(json!({
                "count": sprints.len(),
                "sprints": sprints,
            }))
        }
        .await;

        ExecutionResult::unlogged(result)
    }
}
