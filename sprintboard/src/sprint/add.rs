//! AddSprint command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::WriteBatch;
use crate::types::{ProjectId, Sprint};
use crate::validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use tracing::info;

/// Create a not-started sprint in a project
#[operation(verb = "add", noun = "sprint", description = "Create a new sprint")]
#[derive(Debug, Deserialize, Serialize)]
pub struct AddSprint {
    /// The sprint name
    pub name: String,
    /// Owning project
    pub project_id: ProjectId,
}

impl AddSprint {
    pub fn new(name: impl Into<String>, project_id: impl Into<ProjectId>) -> Self {
        Self {
            name: name.into(),
            project_id: project_id.into(),
        }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for AddSprint {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let name = validate::non_empty("name", &self.name)?;

            let _tx = ctx.transaction().await?;
            ctx.read_project(&self.project_id).await?;

            let sprint = Sprint::new(self.project_id.clone(), name);
            let mut batch = WriteBatch::new();
            batch.put(&sprint)?;
            ctx.commit(batch).await?;

            info!(sprint_id = %sprint.id, project_id = %sprint.project_id, "sprint created");
            Ok(serde_json::to_value(&sprint)?)
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }

    fn affected_resource_ids(&self, result: &Value) -> Vec<String> {
        result["id"]
            .as_str()
            .map(|id| vec![id.to_string()])
            .unwrap_or_default()
    }
}
