//! GetIssue command

use super::with_assignee;
use crate::context::SprintboardContext;
use crate::error::SprintboardError;
use crate::types::IssueId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult};

/// Get an issue with its resolved assignee
#[operation(verb = "get", noun = "issue", description = "Get an issue by ID")]
#[derive(Debug, Deserialize, Serialize)]
pub struct GetIssue {
    /// The issue ID
    pub id: IssueId,
}

impl GetIssue {
    pub fn new(id: impl Into<IssueId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for GetIssue {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        match async {
            let issue = ctx.read_issue(&self.id).await?;
            with_assignee(ctx, &issue).await
        }
        .await
        {
            Ok(value) => ExecutionResult::Unlogged { value },
            Err(error) => ExecutionResult::Failed {
                error,
                log_entry: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{AddIssue, AssignIssue};
    use crate::test_support::{memory_context, run, seed_project};
    use crate::user::AddUser;

    #[tokio::test]
    async fn test_get_issue_resolves_assignee() {
        let ctx = memory_context("alice");
        let project_id = seed_project(&ctx, "Apollo").await;
        run(&ctx.as_actor("bob"), AddUser::new("Bob")).await.unwrap();

        let created = run(&ctx, AddIssue::new("A", &project_id)).await.unwrap();
        let id = IssueId::from_string(created["id"].as_str().unwrap());

        let result = run(&ctx, GetIssue::new(&id)).await.unwrap();
        assert!(result["assignee"].is_null());

        run(&ctx, AssignIssue::new(&id, Some("bob"))).await.unwrap();
        let result = run(&ctx, GetIssue::new(&id)).await.unwrap();
        assert_eq!(result["assignee"]["name"], "Bob");
        assert_eq!(result["assignee_id"], "bob");
    }

    #[tokio::test]
    async fn test_unknown_assignee_profile_is_null() {
        let ctx = memory_context("alice");
        let project_id = seed_project(&ctx, "Apollo").await;
        let created = run(&ctx, AddIssue::new("A", &project_id).with_assignee("ghost"))
            .await
            .unwrap();
        let id = IssueId::from_string(created["id"].as_str().unwrap());

        let result = run(&ctx, GetIssue::new(&id)).await.unwrap();
        assert_eq!(result["assignee_id"], "ghost");
        assert!(result["assignee"].is_null());
    }

    #[tokio::test]
    async fn test_get_issue_not_found() {
        let ctx = memory_context("alice");
        let result = GetIssue::new("nope").execute(&ctx).await;
        assert!(!result.should_log());
        assert!(matches!(
            result.into_result(),
            Err(SprintboardError::IssueNotFound { .. })
        ));
    }
}
