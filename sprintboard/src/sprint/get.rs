//! GetSprint command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::types::SprintId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult};

/// Get a sprint with its issues
#[operation(verb = "get", noun = "sprint", description = "Get a sprint by ID")]
#[derive(Debug, Deserialize, Serialize)]
pub struct GetSprint {
    /// The sprint ID
    pub id: SprintId,
}

impl GetSprint {
    pub fn new(id: impl Into<SprintId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for GetSprint {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let result: Result<Value> = async {
            let sprint = ctx.read_sprint(&self.id).await?;
            let issues = ctx.sprint_issues(&self.id).await?;

            let mut result = serde_json::to_value(&sprint)?;
            result["issues"] = serde_json::to_value(&issues)?;
            Ok(result)
        }
        .await;

        ExecutionResult::unlogged(result)
    }
}
