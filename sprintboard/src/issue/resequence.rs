//! ResequenceIssues command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::sequencing;
use crate::store::WriteBatch;
use crate::types::{Issue, IssueId, ProjectId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// One entry of a resequence submission
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SequenceUpdate {
    #[serde(alias = "issue_id")]
    pub id: IssueId,
    pub sequence: u32,
}

impl SequenceUpdate {
    pub fn new(id: impl Into<IssueId>, sequence: u32) -> Self {
        Self {
            id: id.into(),
            sequence,
        }
    }
}

/// Apply caller-supplied backlog positions.
///
/// Every listed issue must exist or nothing is written. Under the
/// `validate` policy the final sequences of each touched project must be
/// unique; under `trust` they are applied verbatim.
#[operation(
    verb = "resequence",
    noun = "issues",
    description = "Assign backlog sequence numbers to issues"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct ResequenceIssues {
    /// List of {id, sequence}
    pub issues: Vec<SequenceUpdate>,
}

impl ResequenceIssues {
    pub fn new(issues: Vec<SequenceUpdate>) -> Self {
        Self { issues }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for ResequenceIssues {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let policy = ctx.config().resequence_policy;
            sequencing::check_unique_ids(policy, self.issues.iter().map(|u| &u.id))?;

            let _tx = ctx.transaction().await?;

            // Later entries for the same issue win
            let mut staged: BTreeMap<IssueId, Issue> = BTreeMap::new();
            for update in &self.issues {
                let mut issue = match staged.remove(&update.id) {
                    Some(issue) => issue,
                    None => ctx.read_issue(&update.id).await?,
                };
                issue.sequence = update.sequence;
                staged.insert(issue.id.clone(), issue);
            }

            let mut by_project: HashMap<ProjectId, HashMap<IssueId, u32>> = HashMap::new();
            for issue in staged.values() {
                by_project
                    .entry(issue.project_id.clone())
                    .or_default()
                    .insert(issue.id.clone(), issue.sequence);
            }
            for (project_id, updates) in &by_project {
                let current = ctx.project_issues(project_id).await?;
                sequencing::check_resequence(policy, &current, updates)?;
            }

            let mut batch = WriteBatch::new();
            for issue in staged.values() {
                batch.put(issue)?;
            }
            ctx.commit(batch).await?;

            debug!(updated = staged.len(), ?policy, "issues resequenced");
            Ok(json!({ "updated": staged.len() }))
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }

    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        self.issues.iter().map(|u| u.id.to_string()).collect()
    }
}
