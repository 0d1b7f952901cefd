//! PruneSprints command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::{Collection, WriteBatch};
use crate::types::{Project, Sprint};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use std::collections::HashSet;
use tracing::info;

/// Maintenance: delete sprints whose project no longer exists.
///
/// Issues still pointing at a pruned sprint are returned to the backlog.
#[operation(
    verb = "prune",
    noun = "sprints",
    description = "Delete sprints whose project no longer exists"
)]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PruneSprints {}

impl PruneSprints {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for PruneSprints {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let _tx = ctx.transaction().await?;
            let projects: HashSet<_> = ctx
                .fetch_all::<Project>()
                .await?
                .into_iter()
                .map(|p| p.id)
                .collect();

            let mut batch = WriteBatch::new();
            let mut pruned = Vec::new();
            for sprint in ctx.fetch_all::<Sprint>().await? {
                if projects.contains(&sprint.project_id) {
                    continue;
                }
                for mut issue in ctx.sprint_issues(&sprint.id).await? {
                    issue.sprint_id = None;
                    batch.put(&issue)?;
                }
                batch.delete(Collection::Sprints, sprint.id.as_str());
                pruned.push(sprint.id);
            }
            ctx.commit(batch).await?;

            if !pruned.is_empty() {
                info!(count = pruned.len(), "pruned orphaned sprints");
            }
            Ok(json!({
                "count": pruned.len(),
                "pruned": pruned,
            }))
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }

    fn affected_resource_ids(&self, result: &Value) -> Vec<String> {
        result["pruned"]
            .as_array()
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| id.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}
