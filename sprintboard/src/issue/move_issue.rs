//! MoveIssue command

use super::{assignee_from, placement_target};
use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::WriteBatch;
use crate::types::serde_ext::patch_ref;
use crate::types::{ActorId, IssueId, IssueStatus, SprintId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use tracing::debug;

/// Board drop: change status, assignee and sprint in one write.
///
/// Omitted fields stay as they are; readers never see a half-applied move.
#[operation(
    verb = "move",
    noun = "issue",
    description = "Move an issue to a status column, assignee and/or sprint in one step"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct MoveIssue {
    /// The issue ID
    pub id: IssueId,
    /// Target status column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<IssueStatus>,
    /// Target assignee, null or empty unassigns
    #[serde(default, deserialize_with = "patch_ref", skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<Option<ActorId>>,
    /// Target sprint, null or empty moves to the backlog
    #[serde(default, deserialize_with = "patch_ref", skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<Option<SprintId>>,
}

impl MoveIssue {
    pub fn new(id: impl Into<IssueId>) -> Self {
        Self {
            id: id.into(),
            status: None,
            assignee_id: None,
            sprint_id: None,
        }
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
impl Execute<SprintboardContext, SprintboardError> for MoveIssue {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let _tx = ctx.transaction().await?;
            let mut issue = ctx.read_issue(&self.id).await?;
            if let Some(Some(sprint_id)) = &self.sprint_id {
                placement_target(ctx, sprint_id, &issue.project_id).await?;
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

            debug!(issue_id = %issue.id, status = ?issue.status, "issue moved");
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
    use crate::sprint::CompleteSprint;
    use crate::test_support::{memory_context, run, seed_issues, seed_project, seed_sprint};

    #[tokio::test]
    async fn test_move_changes_status_and_assignee_together() {
        let ctx = memory_context("alice");
        let project_id = seed_project(&ctx, "Apollo").await;
        let sprint_id = seed_sprint(&ctx, &project_id, "Sprint 1").await;
        let issues = seed_issues(&ctx, &project_id, &["A"]).await;

        let result = run(
            &ctx,
            MoveIssue::new(&issues[0])
                .with_status(IssueStatus::InProgress)
                .with_assignee(Some("bob"))
                .with_sprint(Some(&sprint_id)),
        )
        .await
        .unwrap();
        assert_eq!(result["status"], "in_progress");
        assert_eq!(result["assignee_id"], "bob");
        assert_eq!(result["sprint_id"], sprint_id.as_str());
    }

    #[tokio::test]
    async fn test_move_leaves_omitted_fields() {
        let ctx = memory_context("alice");
        let project_id = seed_project(&ctx, "Apollo").await;
        let issues = seed_issues(&ctx, &project_id, &["A"]).await;
        run(&ctx, MoveIssue::new(&issues[0]).with_assignee(Some("bob")))
            .await
            .unwrap();

        let result = run(&ctx, MoveIssue::new(&issues[0]).with_status(IssueStatus::Completed))
            .await
            .unwrap();
        assert_eq!(result["assignee_id"], "bob");

        let result = run(&ctx, MoveIssue::new(&issues[0]).with_assignee(None))
            .await
            .unwrap();
        assert!(result.get("assignee_id").is_none());
        assert_eq!(result["status"], "completed");
    }

    #[tokio::test]
    async fn test_rejected_move_writes_nothing() {
        let ctx = memory_context("alice");
        let project_id = seed_project(&ctx, "Apollo").await;
        let sprint_id = seed_sprint(&ctx, &project_id, "Sprint 1").await;
        let issues = seed_issues(&ctx, &project_id, &["A"]).await;
        run(&ctx, CompleteSprint::new(&sprint_id)).await.unwrap();

        let err = run(
            &ctx,
            MoveIssue::new(&issues[0])
                .with_status(IssueStatus::InProgress)
                .with_sprint(Some(&sprint_id)),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SprintboardError::InvalidTransition { .. }));

        let issue = ctx.read_issue(&issues[0]).await.unwrap();
        assert_eq!(issue.status, IssueStatus::NotStarted);
        assert!(issue.in_backlog());
    }

    #[tokio::test]
    async fn test_move_blank_assignee_clears() {
        let ctx = memory_context("alice");
        let project_id = seed_project(&ctx, "Apollo").await;
        let issues = seed_issues(&ctx, &project_id, &["A"]).await;
        run(&ctx, MoveIssue::new(&issues[0]).with_assignee(Some("bob")))
            .await
            .unwrap();

        let cmd = MoveIssue::new(&issues[0]).with_assignee(Some("  "));
        assert_eq!(cmd.assignee_id, Some(None));
        let result = run(&ctx, cmd).await.unwrap();
        assert!(result.get("assignee_id").is_none());
    }
}
