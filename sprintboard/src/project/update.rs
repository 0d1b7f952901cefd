//! UpdateProject command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::WriteBatch;
use crate::types::ProjectId;
use crate::validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Rename a project (admin only)
#[operation(verb = "update", noun = "project", description = "Rename a project")]
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateProject {
    /// The project ID
    pub id: ProjectId,
    /// New name, 3 to 64 characters after trimming
    pub name: String,
}

impl UpdateProject {
    pub fn new(id: impl Into<ProjectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for UpdateProject {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let actor = ctx.current_actor().await?;
            let name = validate::project_name(&self.name)?;

            let _tx = ctx.transaction().await?;
            let mut project = ctx.read_project(&self.id).await?;
            ctx.require_admin(&self.id, &actor).await?;

            project.name = name;
            let mut batch = WriteBatch::new();
            batch.put(&project)?;
            ctx.commit(batch).await?;

            Ok(serde_json::to_value(&project)?)
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }

    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        vec![self.id.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::{memory_context, run, seed_project};

    #[tokio::test]
    async fn test_rename_project() {
        let ctx = memory_context("alice");
        let project_id = seed_project(&ctx, "Apollo").await;

        let result = run(&ctx, UpdateProject::new(&project_id, "Artemis"))
            .await
            .unwrap();
        assert_eq!(result["name"], "Artemis");
        assert_eq!(ctx.read_project(&project_id).await.unwrap().name, "Artemis");
    }

    #[tokio::test]
    async fn test_rename_requires_admin() {
        let ctx = memory_context("alice");
        let project_id = seed_project(&ctx, "Apollo").await;

        let err = run(&ctx.as_actor("mallory"), UpdateProject::new(&project_id, "Hijacked"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert_eq!(ctx.read_project(&project_id).await.unwrap().name, "Apollo");
    }
}
