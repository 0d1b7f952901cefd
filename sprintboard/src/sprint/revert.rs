//! RevertSprint command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::WriteBatch;
use crate::types::{SprintId, SprintStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use tracing::{info, warn};

/// Send a sprint back to not-started, clearing its dates.
///
/// Reopening a completed sprint is governed by `allow_reopen_completed`.
#[operation(
    verb = "revert",
    noun = "sprint",
    description = "Revert a sprint to not started and clear its dates"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct RevertSprint {
    /// The sprint ID
    pub id: SprintId,
}

impl RevertSprint {
    pub fn new(id: impl Into<SprintId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for RevertSprint {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let _tx = ctx.transaction().await?;
            let mut sprint = ctx.read_sprint(&self.id).await?;

            if sprint.status == SprintStatus::Completed {
                if !ctx.config().allow_reopen_completed {
                    return Err(SprintboardError::InvalidTransition {
                        id: sprint.id.to_string(),
                        from: sprint.status,
                        action: "revert",
                    });
                }
                warn!(sprint_id = %sprint.id, "reopening completed sprint");
            }

            let from = sprint.status;
            sprint.reset();
            let mut batch = WriteBatch::new();
            batch.put(&sprint)?;
            ctx.commit(batch).await?;

            info!(sprint_id = %sprint.id, %from, "sprint reverted to not started");
            Ok(serde_json::to_value(&sprint)?)
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }

    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        vec![self.id.to_string()]
    }
}
