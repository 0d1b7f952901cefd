//! CompleteSprint command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::WriteBatch;
use crate::types::{IssueId, Sprint, SprintId, SprintStatus};
use crate::validate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use tracing::info;

/// Where the listed open issues of a completed sprint go
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Clear `sprint_id`; the issue keeps its sequence
    #[default]
    Backlog,
    /// Move into a freshly created not-started sprint
    NewSprint,
}

/// Close a sprint and relocate the listed open issues
#[operation(
    verb = "complete",
    noun = "sprint",
    description = "Complete a sprint, moving open issues to the backlog or a new sprint"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct CompleteSprint {
    /// The sprint ID
    pub id: SprintId,
    /// Open issues to relocate
    #[serde(default)]
    pub issue_ids: Vec<IssueId>,
    /// backlog or new_sprint
    #[serde(default)]
    pub disposition: Disposition,
    /// Name for the sprint created by the new_sprint disposition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_sprint_name: Option<String>,
}

impl CompleteSprint {
    pub fn new(id: impl Into<SprintId>) -> Self {
        Self {
            id: id.into(),
            issue_ids: Vec::new(),
            disposition: Disposition::Backlog,
            new_sprint_name: None,
        }
    }

    pub fn with_issues<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<IssueId>,
    {
        self.issue_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Carry the listed issues into a new sprint, optionally named
    pub fn into_new_sprint(mut self, name: Option<&str>) -> Self {
        self.disposition = Disposition::NewSprint;
        self.new_sprint_name = name.map(str::to_string);
        self
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for CompleteSprint {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let _tx = ctx.transaction().await?;
            let mut sprint = ctx.read_sprint(&self.id).await?;
            if sprint.status == SprintStatus::Completed {
                return Err(SprintboardError::InvalidTransition {
                    id: sprint.id.to_string(),
                    from: sprint.status,
                    action: "complete",
                });
            }

            let mut issues = Vec::with_capacity(self.issue_ids.len());
            for issue_id in &self.issue_ids {
                let issue = ctx.read_issue(issue_id).await?;
                if issue.project_id != sprint.project_id {
                    return Err(SprintboardError::CrossProject {
                        resource: "issue",
                        id: issue.id.to_string(),
                        project_id: sprint.project_id.to_string(),
                    });
                }
                if issue.sprint_id.as_ref() != Some(&sprint.id) {
                    return Err(SprintboardError::invalid_value(
                        "issue_ids",
                        format!("issue {} is not in sprint {}", issue.id, sprint.id),
                    ));
                }
                issues.push(issue);
            }

            let mut batch = WriteBatch::new();
            sprint.complete();
            batch.put(&sprint)?;

            let new_sprint = match self.disposition {
                Disposition::Backlog => None,
                Disposition::NewSprint => {
                    let name = match &self.new_sprint_name {
                        Some(name) => validate::non_empty("new_sprint_name", name)?,
                        None => {
                            let existing = ctx.project_sprints(&sprint.project_id).await?;
                            next_sprint_name(&ctx.config().sprint_name_prefix, &existing)
                        }
                    };
                    let created = Sprint::new(sprint.project_id.clone(), name);
                    batch.put(&created)?;
                    Some(created)
                }
            };

            let target = new_sprint.as_ref().map(|s| s.id.clone());
            let mut moved = Vec::with_capacity(issues.len());
            for mut issue in issues {
                issue.sprint_id = target.clone();
                batch.put(&issue)?;
                moved.push(issue.id);
            }

            ctx.commit(batch).await?;

            info!(
                sprint_id = %sprint.id,
                moved = moved.len(),
                disposition = ?self.disposition,
                "sprint completed"
            );
            Ok(json!({
                "sprint": sprint,
                "new_sprint": new_sprint,
                "moved": moved,
            }))
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }

    fn affected_resource_ids(&self, result: &Value) -> Vec<String> {
        let mut ids = vec![self.id.to_string()];
        if let Some(id) = result["new_sprint"]["id"].as_str() {
            ids.push(id.to_string());
        }
        ids.extend(self.issue_ids.iter().map(|id| id.to_string()));
        ids
    }
}

/// `"{prefix} {n}"` numbered past both the highest existing number and the sprint count
fn next_sprint_name(prefix: &str, existing: &[Sprint]) -> String {
    let highest = existing
        .iter()
        .filter_map(|s| s.name.strip_prefix(prefix)?.strip_prefix(' ')?.parse::<usize>().ok())
        .max()
        .unwrap_or(0);
    format!("{} {}", prefix, highest.max(existing.len()) + 1)
}
