//! GetProject command

use crate::context::SprintboardContext;
use crate::error::SprintboardError;
use crate::types::ProjectId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult};

/// Get a project with its members
#[operation(verb = "get", noun = "project", description = "Get a project by ID")]
#[derive(Debug, Deserialize, Serialize)]
pub struct GetProject {
    /// The project ID
    pub id: ProjectId,
}

impl GetProject {
    pub fn new(id: impl Into<ProjectId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for GetProject {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        match async {
            let project = ctx.read_project(&self.id).await?;
            let members = ctx.project_members(&self.id).await?;
            let sprints = ctx.project_sprints(&self.id).await?;

            let mut result = serde_json::to_value(&project)?;
            result["members"] = serde_json::to_value(&members)?;
            result["sprint_count"] = Value::from(sprints.len());
            Ok(result)
        }
        .await
        {
            Ok(value) => ExecutionResult::Unlogged { value },
            Err(error) => ExecutionResult::Failed {
                error,
                log_entry: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{memory_context, seed_project, seed_sprint};

    #[tokio::test]
    async fn test_get_project() {
        let ctx = memory_context("alice");
        let project_id = seed_project(&ctx, "Apollo").await;
        seed_sprint(&ctx, &project_id, "Sprint 1").await;

        let result = GetProject::new(&project_id)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["name"], "Apollo");
        assert_eq!(result["members"].as_array().unwrap().len(), 1);
        assert_eq!(result["members"][0]["role"], "admin");
        assert_eq!(result["sprint_count"], 1);
    }

    #[tokio::test]
    async fn test_get_project_not_found() {
        let ctx = memory_context("alice");

        let result = GetProject::new("missing").execute(&ctx).await;
        assert!(!result.should_log());
        assert!(matches!(
            result.into_result(),
            Err(SprintboardError::ProjectNotFound { .. })
        ));
    }
}
