//! Issue commands
//!
//! Creation and backlog ordering (`add`, `promote`, `resequence`, `clone`)
//! plus placement between backlog, sprints, status columns and assignees.

mod add;
mod assign;
mod clone;
mod delete;
mod get;
mod list;
mod list_sprint;
mod move_issue;
mod promote;
mod resequence;
mod schedule;
mod transition;
mod unschedule;
mod update;

pub use add::AddIssue;
pub use assign::AssignIssue;
pub use clone::CloneIssue;
pub use delete::DeleteIssue;
pub use get::GetIssue;
pub use list::ListIssues;
pub use list_sprint::ListSprintIssues;
pub use move_issue::MoveIssue;
pub use promote::PromoteIssue;
pub use resequence::{ResequenceIssues, SequenceUpdate};
pub use schedule::ScheduleIssue;
pub use transition::TransitionIssue;
pub use unschedule::UnscheduleIssue;
pub use update::UpdateIssue;

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::types::{ActorId, Issue, ProjectId, Sprint, SprintId, SprintStatus};
use serde_json::Value;

/// Builder input for an assignee; blank means unassigned
pub(crate) fn assignee_from(assignee_id: Option<&str>) -> Option<ActorId> {
    assignee_id
        .filter(|a| !a.trim().is_empty())
        .map(ActorId::from)
}

/// Load a sprint that issues of `project_id` may be placed into.
///
/// The sprint must exist, belong to the same project and not be completed.
pub(crate) async fn placement_target(
    ctx: &SprintboardContext,
    sprint_id: &SprintId,
    project_id: &ProjectId,
) -> Result<Sprint> {
    let sprint = ctx.read_sprint(sprint_id).await?;
    if &sprint.project_id != project_id {
        return Err(SprintboardError::CrossProject {
            resource: "sprint",
            id: sprint.id.to_string(),
            project_id: project_id.to_string(),
        });
    }
    if sprint.status == SprintStatus::Completed {
        return Err(SprintboardError::InvalidTransition {
            id: sprint.id.to_string(),
            from: sprint.status,
            action: "schedule issues into",
        });
    }
    Ok(sprint)
}

/// Issue document with its assignee's profile under `"assignee"` (or null)
pub(crate) async fn with_assignee(ctx: &SprintboardContext, issue: &Issue) -> Result<Value> {
    let assignee = ctx.resolve_user(issue.assignee_id.as_ref()).await?;
    let mut value = serde_json::to_value(issue)?;
    value["assignee"] = serde_json::to_value(assignee)?;
    Ok(value)
}
