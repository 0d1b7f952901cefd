//! ListSprintIssues command

use super::with_assignee;
use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::types::SprintId;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult};

/// List a sprint's issues with resolved assignees (board view)
#[operation(
    verb = "list",
    noun = "sprint_issues",
    description = "List issues of a sprint with their assignees"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct ListSprintIssues {
    /// The sprint ID
    pub sprint_id: SprintId,
}

impl ListSprintIssues {
    pub fn new(sprint_id: impl Into<SprintId>) -> Self {
        Self {
            sprint_id: sprint_id.into(),
        }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for ListSprintIssues {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let result: Result<Value> = async {
            ctx.current_actor().await?;

            let issues = ctx.sprint_issues(&self.sprint_id).await?;
            let mut entries = Vec::with_capacity(issues.len());
            for issue in &issues {
                entries.push(with_assignee(ctx, issue).await?);
            }

            Ok(json!({
                "count": entries.len(),
                "issues": entries,
            }))
        }
        .await;

        ExecutionResult::unlogged(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::StaticIdentity;
    use crate::issue::{AssignIssue, ScheduleIssue};
    use crate::test_support::{memory_context, run, seed_issues, seed_project, seed_sprint};
    use crate::user::AddUser;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_list_sprint_issues_with_assignees() {
        let ctx = memory_context("alice");
        run(&ctx, AddUser::new("Alice")).await.unwrap();
        let project_id = seed_project(&ctx, "Apollo").await;
        let sprint_id = seed_sprint(&ctx, &project_id, "Sprint 1").await;
        let issues = seed_issues(&ctx, &project_id, &["A", "B", "C"]).await;
        run(&ctx, ScheduleIssue::new(&issues[0], &sprint_id)).await.unwrap();
        run(&ctx, ScheduleIssue::new(&issues[2], &sprint_id)).await.unwrap();
        run(&ctx, AssignIssue::new(&issues[2], Some("alice"))).await.unwrap();

        let result = run(&ctx, ListSprintIssues::new(&sprint_id)).await.unwrap();
        assert_eq!(result["count"], 2);
        assert_eq!(result["issues"][0]["title"], "A");
        assert!(result["issues"][0]["assignee"].is_null());
        assert_eq!(result["issues"][1]["assignee"]["name"], "Alice");
    }

    #[tokio::test]
    async fn test_list_sprint_issues_requires_actor() {
        let ctx = memory_context("alice");
        let anonymous = ctx.with_identity(Arc::new(StaticIdentity::anonymous()));
        let err = run(&anonymous, ListSprintIssues::new("s1")).await.unwrap_err();
        assert!(matches!(err, SprintboardError::Unauthenticated));
    }
}
