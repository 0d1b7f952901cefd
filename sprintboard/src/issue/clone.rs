//! CloneIssue command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::sequencing;
use crate::store::WriteBatch;
use crate::types::IssueId;
use crate::validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use tracing::info;

/// Duplicate an issue under a new id at the end of the backlog.
///
/// Type, priority, status, sprint and assignee carry over; the caller
/// becomes the reporter.
#[operation(
    verb = "clone",
    noun = "issue",
    description = "Duplicate an issue with a new id and sequence"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct CloneIssue {
    /// The issue to copy
    pub id: IssueId,
    /// Title for the copy (defaults to the original's)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl CloneIssue {
    pub fn new(id: impl Into<IssueId>) -> Self {
        Self {
            id: id.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for CloneIssue {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let reporter = ctx.current_actor().await?;
            let title = self
                .title
                .as_deref()
                .map(|t| validate::non_empty("title", t))
                .transpose()?;

            let _tx = ctx.transaction().await?;
            let source = ctx.read_issue(&self.id).await?;
            let existing = ctx.project_issues(&source.project_id).await?;

            let mut copy = source.duplicate(sequencing::next_sequence(&existing), Some(reporter));
            if let Some(title) = title {
                copy.title = title;
            }

            let mut batch = WriteBatch::new();
            batch.put(&copy)?;
            ctx.commit(batch).await?;

            info!(source_id = %source.id, issue_id = %copy.id, "issue cloned");
            Ok(serde_json::to_value(&copy)?)
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }

    fn affected_resource_ids(&self, result: &Value) -> Vec<String> {
        let mut ids = vec![self.id.to_string()];
        if let Some(id) = result["id"].as_str() {
            ids.push(id.to_string());
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{AddIssue, ScheduleIssue};
    use crate::test_support::{memory_context, run, seed_issues, seed_project, seed_sprint};
    use crate::types::{IssueType, Priority};

    #[tokio::test]
    async fn test_clone_copies_fields_with_new_identity() {
        let ctx = memory_context("alice");
        let project_id = seed_project(&ctx, "Apollo").await;
        let sprint_id = seed_sprint(&ctx, &project_id, "Sprint 1").await;
        seed_issues(&ctx, &project_id, &["A"]).await;
        let source = run(
            &ctx,
            AddIssue::new("Crash", &project_id)
                .with_type(IssueType::Bug)
                .with_priority(Priority::High)
                .with_assignee("carol"),
        )
        .await
        .unwrap();
        let source_id = IssueId::from_string(source["id"].as_str().unwrap());
        run(&ctx, ScheduleIssue::new(&source_id, &sprint_id)).await.unwrap();

        let copy = run(&ctx.as_actor("bob"), CloneIssue::new(&source_id)).await.unwrap();
        assert_ne!(copy["id"], source["id"]);
        assert_eq!(copy["title"], "Crash");
        assert_eq!(copy["issue_type"], "bug");
        assert_eq!(copy["priority"], "high");
        assert_eq!(copy["assignee_id"], "carol");
        assert_eq!(copy["sprint_id"], sprint_id.as_str());
        assert_eq!(copy["sequence"], 2);
        assert_eq!(copy["reporter_id"], "bob");
    }

    #[tokio::test]
    async fn test_clone_with_new_title() {
        let ctx = memory_context("alice");
        let project_id = seed_project(&ctx, "Apollo").await;
        let issues = seed_issues(&ctx, &project_id, &["A"]).await;

        let copy = run(&ctx, CloneIssue::new(&issues[0]).with_title("A (copy)"))
            .await
            .unwrap();
        assert_eq!(copy["title"], "A (copy)");
        assert_eq!(ctx.project_issues(&project_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_clone_missing_issue() {
        let ctx = memory_context("alice");
        let err = run(&ctx, CloneIssue::new("nope")).await.unwrap_err();
        assert!(matches!(err, SprintboardError::IssueNotFound { .. }));
    }
}
