//! AddIssue command

use super::placement_target;
use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::sequencing;
use crate::store::WriteBatch;
use crate::types::serde_ext::empty_as_none;
use crate::types::{ActorId, Issue, IssueType, Priority, ProjectId, SprintId};
use crate::validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use tracing::info;

/// Create an issue at the end of the project's backlog
#[operation(verb = "add", noun = "issue", description = "Create a new issue")]
#[derive(Debug, Deserialize, Serialize)]
pub struct AddIssue {
    /// The issue title
    pub title: String,
    /// Longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Estimate in story points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_points: Option<u32>,
    /// Sprint to place the issue in (omit for the backlog)
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<SprintId>,
    /// Assignee actor ID
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<ActorId>,
    /// story, bug or task
    #[serde(default)]
    pub issue_type: IssueType,
    /// Owning project
    pub project_id: ProjectId,
    /// low, medium or high
    #[serde(default)]
    pub priority: Priority,
}

impl AddIssue {
    pub fn new(title: impl Into<String>, project_id: impl Into<ProjectId>) -> Self {
        Self {
            title: title.into(),
            description: None,
            story_points: None,
            sprint_id: None,
            assignee_id: None,
            issue_type: IssueType::default(),
            project_id: project_id.into(),
            priority: Priority::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_story_points(mut self, points: u32) -> Self {
        self.story_points = Some(points);
        self
    }

    pub fn with_sprint(mut self, sprint_id: impl Into<SprintId>) -> Self {
        self.sprint_id = Some(sprint_id.into());
        self
    }

    pub fn with_assignee(mut self, assignee_id: impl Into<ActorId>) -> Self {
        self.assignee_id = Some(assignee_id.into());
        self
    }

    pub fn with_type(mut self, issue_type: IssueType) -> Self {
        self.issue_type = issue_type;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for AddIssue {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let reporter = ctx.current_actor().await?;
            let title = validate::non_empty("title", &self.title)?;

            let _tx = ctx.transaction().await?;
            ctx.read_project(&self.project_id).await?;
            if let Some(sprint_id) = &self.sprint_id {
                placement_target(ctx, sprint_id, &self.project_id).await?;
            }

            let existing = ctx.project_issues(&self.project_id).await?;
            let mut issue = Issue::new(
                self.project_id.clone(),
                title,
                sequencing::next_sequence(&existing),
            );
            issue.description = self
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string);
            issue.story_points = self.story_points;
            issue.sprint_id = self.sprint_id.clone();
            issue.assignee_id = self.assignee_id.clone();
            issue.issue_type = self.issue_type;
            issue.priority = self.priority;
            issue.reporter_id = Some(reporter);

            let mut batch = WriteBatch::new();
            batch.put(&issue)?;
            ctx.commit(batch).await?;

            info!(issue_id = %issue.id, sequence = issue.sequence, "issue created");
            Ok(serde_json::to_value(&issue)?)
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
