//! StartSprint command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::WriteBatch;
use crate::types::{SprintId, SprintStatus};
use crate::validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use tracing::info;

/// Activate a not-started sprint.
///
/// The project must have no other active sprint; the check runs inside the
/// same critical section as the write.
#[operation(
    verb = "start",
    noun = "sprint",
    description = "Start a sprint with a start and end date"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct StartSprint {
    /// The sprint ID
    pub id: SprintId,
    /// Start of the sprint window (defaults to now)
    pub start_date: Option<DateTime<Utc>>,
    /// End of the sprint window
    pub end_date: DateTime<Utc>,
}

impl StartSprint {
    pub fn new(id: impl Into<SprintId>, end_date: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            start_date: None,
            end_date,
        }
    }

    pub fn with_start(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = Some(start_date);
        self
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for StartSprint {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let start_date = self.start_date.unwrap_or_else(Utc::now);
            validate::date_window(start_date, self.end_date)?;

            let _tx = ctx.transaction().await?;
            let mut sprint = ctx.read_sprint(&self.id).await?;
            if sprint.status != SprintStatus::NotStarted {
                return Err(SprintboardError::InvalidTransition {
                    id: sprint.id.to_string(),
                    from: sprint.status,
                    action: "start",
                });
            }

            let siblings = ctx.project_sprints(&sprint.project_id).await?;
            if let Some(active) = siblings.iter().find(|s| s.is_active() && s.id != sprint.id) {
                return Err(SprintboardError::SprintAlreadyActive {
                    project_id: sprint.project_id.to_string(),
                    active_id: active.id.to_string(),
                });
            }

            sprint.start(start_date, self.end_date);
            let mut batch = WriteBatch::new();
            batch.put(&sprint)?;
            ctx.commit(batch).await?;

            info!(sprint_id = %sprint.id, project_id = %sprint.project_id, "sprint started");
            Ok(serde_json::to_value(&sprint)?)
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }

    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        vec![self.id.to_string()]
    }
}
