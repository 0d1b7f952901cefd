//! AddProject command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::WriteBatch;
use crate::types::{Member, MemberRole, Project};
use crate::validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{
    async_trait, operation, Execute, ExecutionResult, LogEntry, Operation,
};
use tracing::info;

/// Create a project; the creator becomes its first admin
#[operation(
    verb = "add",
    noun = "project",
    description = "Create a project with the caller as admin"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct AddProject {
    /// Project name, 3 to 64 characters after trimming
    pub name: String,
}

impl AddProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for AddProject {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let actor = ctx.current_actor().await?;
            let name = validate::project_name(&self.name)?;

            let _tx = ctx.transaction().await?;
            let project = Project::new(name, actor.clone());
            let member = Member::new(project.id.clone(), actor, MemberRole::Admin);

            let mut batch = WriteBatch::new();
            batch.put(&project)?.put(&member)?;
            ctx.commit(batch).await?;

            info!(project_id = %project.id, owner = %project.owner_id, "project created");
            Ok(serde_json::to_value(&project)?)
        }
        .await;

        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(value) => ExecutionResult::Logged {
                value: value.clone(),
                log_entry: LogEntry::new(self.op_string(), input, value, None, duration_ms),
            },
            Err(error) => {
                let error_msg = error.to_string();
                ExecutionResult::Failed {
                    error,
                    log_entry: Some(LogEntry::new(
                        self.op_string(),
                        input,
                        serde_json::json!({"error": error_msg}),
                        None,
                        duration_ms,
                    )),
                }
            }
        }
    }

    fn affected_resource_ids(&self, result: &Value) -> Vec<String> {
        result["id"]
            .as_str()
            .map(|id| vec![id.to_string()])
            .unwrap_or_default()
    }
}
