//! Shared fixtures for unit and integration tests.
//!
//! Compiled for this crate's tests and, behind the `test-support` feature,
//! for integration tests and downstream crates.

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::issue::AddIssue;
use crate::project::AddProject;
use crate::sprint::AddSprint;
use crate::types::{IssueId, ProjectId, SprintId};
use serde_json::Value;
use sprintboard_operations::Execute;

/// In-memory context acting as `actor`
pub fn memory_context(actor: &str) -> SprintboardContext {
    SprintboardContext::in_memory(actor)
}

/// Execute a command directly, without a processor
pub async fn run<T>(ctx: &SprintboardContext, cmd: T) -> Result<Value>
where
    T: Execute<SprintboardContext, SprintboardError>,
{
    cmd.execute(ctx).await.into_result()
}

/// Create a project owned (and administered) by the context's actor
pub async fn seed_project(ctx: &SprintboardContext, name: &str) -> ProjectId {
    let value = run(ctx, AddProject::new(name))
        .await
        .expect("seed project");
    ProjectId::from_string(value["id"].as_str().expect("project id"))
}

/// Create backlog issues in order; their sequences are `0..titles.len()`
pub async fn seed_issues(
    ctx: &SprintboardContext,
    project_id: &ProjectId,
    titles: &[&str],
) -> Vec<IssueId> {
    let mut ids = Vec::with_capacity(titles.len());
    for title in titles {
        let value = run(ctx, AddIssue::new(*title, project_id.clone()))
            .await
            .expect("seed issue");
        ids.push(IssueId::from_string(value["id"].as_str().expect("issue id")));
    }
    ids
}

/// Create a not-started sprint
pub async fn seed_sprint(ctx: &SprintboardContext, project_id: &ProjectId, name: &str) -> SprintId {
    let value = run(ctx, AddSprint::new(name, project_id.clone()))
        .await
        .expect("seed sprint");
    SprintId::from_string(value["id"].as_str().expect("sprint id"))
}
