//! ListActivity command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult};

/// Read the activity log, newest first
#[operation(
    verb = "list",
    noun = "activity",
    description = "List recorded operations, newest first"
)]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListActivity {
    /// Maximum number of entries
    pub limit: Option<usize>,
}

impl ListActivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for ListActivity {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let result: Result<Value> = async {
            let entries = ctx.read_activity(self.limit).await?;
            Ok(json!({
                "count": entries.len(),
                "entries": entries,
            }))
        }
        .await;

        ExecutionResult::unlogged(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::AddIssue;
    use crate::processor::SprintboardProcessor;
    use crate::project::AddProject;
    use crate::test_support::{memory_context, run};
    use sprintboard_operations::OperationProcessor;

    #[tokio::test]
    async fn test_list_activity_newest_first() {
        let ctx = memory_context("alice");
        let processor = SprintboardProcessor::new();

        let project = processor
            .process(&AddProject::new("Apollo"), &ctx)
            .await
            .unwrap();
        let project_id = project["id"].as_str().unwrap();
        processor
            .process(&AddIssue::new("A", project_id), &ctx)
            .await
            .unwrap();
        // Reads are not recorded
        processor.process(&ListActivity::new(), &ctx).await.unwrap();

        let result = run(&ctx, ListActivity::new()).await.unwrap();
        assert_eq!(result["count"], 2);
        assert_eq!(result["entries"][0]["op"], "add issue");
        assert_eq!(result["entries"][0]["actor"], "alice");
        assert_eq!(result["entries"][1]["op"], "add project");

        let result = run(&ctx, ListActivity::with_limit(1)).await.unwrap();
        assert_eq!(result["count"], 1);
    }
}
