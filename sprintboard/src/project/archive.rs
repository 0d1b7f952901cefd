//! ArchiveProject command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::WriteBatch;
use crate::types::ProjectId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use tracing::info;

/// Soft-delete a project: hidden from listings, nothing purged
#[operation(
    verb = "archive",
    noun = "project",
    description = "Soft-delete a project (hidden, not purged)"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct ArchiveProject {
    /// The project ID
    pub id: ProjectId,
}

impl ArchiveProject {
    pub fn new(id: impl Into<ProjectId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for ArchiveProject {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let actor = ctx.current_actor().await?;
            let _tx = ctx.transaction().await?;
            let mut project = ctx.read_project(&self.id).await?;
            ctx.require_admin(&self.id, &actor).await?;

            if !project.soft_deleted {
                project.soft_deleted = true;
                let mut batch = WriteBatch::new();
                batch.put(&project)?;
                ctx.commit(batch).await?;
                info!(project_id = %project.id, "project archived");
            }

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
    use crate::test_support::{memory_context, run, seed_project};

    #[tokio::test]
    async fn test_archive_is_soft() {
        let ctx = memory_context("alice");
        let project_id = seed_project(&ctx, "Apollo").await;

        let result = run(&ctx, ArchiveProject::new(&project_id)).await.unwrap();
        assert_eq!(result["soft_deleted"], true);

        // Still readable, members intact
        assert!(ctx.read_project(&project_id).await.unwrap().soft_deleted);
        assert_eq!(ctx.project_members(&project_id).await.unwrap().len(), 1);

        // Archiving twice is harmless
        run(&ctx, ArchiveProject::new(&project_id)).await.unwrap();
    }
}
