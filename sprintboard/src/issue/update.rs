//! UpdateIssue command

use super::{assignee_from, placement_target};
use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::WriteBatch;
use crate::types::serde_ext::{patch_ref, patch_value};
use crate::types::{ActorId, IssueId, IssueStatus, IssueType, Priority, SprintId};
use crate::validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Update an issue's fields.
///
/// Omitted fields are left unchanged; `null` clears the optional ones.
#[operation(
    verb = "update",
    noun = "issue",
    description = "Update an issue's title, description, estimate, type, priority, status, assignee or sprint"
)]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateIssue {
    /// The issue ID
    pub id: IssueId,
    /// New title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description, null clears
    #[serde(default, deserialize_with = "patch_ref", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    /// New estimate, null clears
    #[serde(default, deserialize_with = "patch_value", skip_serializing_if = "Option::is_none")]
    pub story_points: Option<Option<u32>>,
    /// New type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<IssueType>,
    /// New priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// New status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<IssueStatus>,
    /// New assignee, null or empty unassigns
    #[serde(default, deserialize_with = "patch_ref", skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<Option<ActorId>>,
    /// New sprint, null or empty returns the issue to the backlog
    #[serde(default, deserialize_with = "patch_ref", skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<Option<SprintId>>,
}

impl UpdateIssue {
    pub fn new(id: impl Into<IssueId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.description = Some(description.map(str::to_string));
        self
    }

    pub fn with_story_points(mut self, points: Option<u32>) -> Self {
        self.story_points = Some(points);
        self
    }

    pub fn with_type(mut self, issue_type: IssueType) -> Self {
        self.issue_type = Some(issue_type);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_status(mut self, status: IssueStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_assignee(mut self, assignee_id: Option<&str>) -> Self {
        self.assignee_id = Some(assignee_from(assignee_id));
        self
    }

    pub fn with_sprint(mut self, sprint_id: Option<&SprintId>) -> Self {
        self.sprint_id = Some(sprint_id.cloned());
        self
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for UpdateIssue {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let title = self
                .title
                .as_deref()
                .map(|t| validate::non_empty("title", t))
                .transpose()?;

            let _tx = ctx.transaction().await?;
            let mut issue = ctx.read_issue(&self.id).await?;
            if let Some(Some(sprint_id)) = &self.sprint_id {
                placement_target(ctx, sprint_id, &issue.project_id).await?;
            }

            if let Some(title) = title {
                issue.title = title;
            }
            if let Some(description) = &self.description {
                issue.description = description.clone();
            }
            if let Some(points) = self.story_points {
                issue.story_points = points;
            }
            if let Some(issue_type) = self.issue_type {
                issue.issue_type = issue_type;
            }
            if let Some(priority) = self.priority {
                issue.priority = priority;
            }
            if let Some(status) = self.status {
                issue.status = status;
            }
            if let Some(assignee_id) = &self.assignee_id {
                issue.assignee_id = assignee_id.clone();
            }
            if let Some(sprint_id) = &self.sprint_id {
                issue.sprint_id = sprint_id.clone();
            }

            let mut batch = WriteBatch::new();
            batch.put(&issue)?;
            ctx.commit(batch).await?;

            Ok(serde_json::to_value(&issue)?)
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }

    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        vec![self.id.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{memory_context, run, seed_issues, seed_project, seed_sprint};
    use serde_json::json;

    #[tokio::test]
    async fn test_update_selected_fields() {
        let ctx = memory_context("alice");
        let project_id = seed_project(&ctx, "Apollo").await;
        let sprint_id = seed_sprint(&ctx, &project_id, "Sprint 1").await;
        let issues = seed_issues(&ctx, &project_id, &["A"]).await;

        let result = run(
            &ctx,
            UpdateIssue::new(&issues[0])
                .with_title("Renamed")
                .with_description(Some("Details"))
                .with_story_points(Some(8))
                .with_type(IssueType::Task)
                .with_priority(Priority::Low)
                .with_status(IssueStatus::InProgress)
                .with_assignee(Some("bob"))
                .with_sprint(Some(&sprint_id)),
        )
        .await
        .unwrap();

        assert_eq!(result["title"], "Renamed");
        assert_eq!(result["description"], "Details");
        assert_eq!(result["story_points"], 8);
        assert_eq!(result["issue_type"], "task");
        assert_eq!(result["priority"], "low");
        assert_eq!(result["status"], "in_progress");
        assert_eq!(result["assignee_id"], "bob");
        assert_eq!(result["sprint_id"], sprint_id.as_str());
        assert_eq!(result["sequence"], 0);
    }

    #[tokio::test]
    async fn test_null_clears_and_missing_keeps() {
        let ctx = memory_context("alice");
        let project_id = seed_project(&ctx, "Apollo").await;
        let issues = seed_issues(&ctx, &project_id, &["A"]).await;
        run(
            &ctx,
            UpdateIssue::new(&issues[0])
                .with_description(Some("Details"))
                .with_story_points(Some(5))
                .with_assignee(Some("bob")),
        )
        .await
        .unwrap();

        let cmd: UpdateIssue = serde_json::from_value(json!({
            "id": &issues[0],
            "story_points": null,
            "assignee_id": ""
        }))
        .unwrap();
        let result = run(&ctx, cmd).await.unwrap();

        assert!(result.get("story_points").is_none());
        assert!(result.get("assignee_id").is_none());
        assert_eq!(result["description"], "Details");
    }

    #[tokio::test]
    async fn test_update_rejects_blank_title() {
        let ctx = memory_context("alice");
        let project_id = seed_project(&ctx, "Apollo").await;
        let issues = seed_issues(&ctx, &project_id, &["A"]).await;

        let err = run(&ctx, UpdateIssue::new(&issues[0]).with_title(" "))
            .await
            .unwrap_err();
        assert!(matches!(err, SprintboardError::InvalidValue { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_issue() {
        let ctx = memory_context("alice");
        let err = run(&ctx, UpdateIssue::new("nope").with_title("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, SprintboardError::IssueNotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_blank_assignee_clears() {
        let ctx = memory_context("alice");
        let project_id = seed_project(&ctx, "Apollo").await;
        let issues = seed_issues(&ctx, &project_id, &["A"]).await;
        run(&ctx, UpdateIssue::new(&issues[0]).with_assignee(Some("bob")))
            .await
            .unwrap();

        let cmd = UpdateIssue::new(&issues[0]).with_assignee(Some(""));
        assert_eq!(cmd.assignee_id, Some(None));
        let result = run(&ctx, cmd).await.unwrap();
        assert!(result.get("assignee_id").is_none());
    }
}
