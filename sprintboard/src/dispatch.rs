//! Route parsed operations to their commands

use crate::activity::ListActivity;
use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::invite::{AcceptInvite, DeclineInvite, ListInvites, SendInvite};
use crate::issue::{
    AddIssue, AssignIssue, CloneIssue, DeleteIssue, GetIssue, ListIssues, ListSprintIssues,
    MoveIssue, PromoteIssue, ResequenceIssues, ScheduleIssue, TransitionIssue, UnscheduleIssue,
    UpdateIssue,
};
use crate::member::{AddMember, DeleteMember, ListMembers, UpdateMember};
use crate::project::{
    AddProject, ArchiveProject, DeleteProject, GetProject, ListProjects, UpdateProject,
};
use crate::sprint::{
    AddSprint, CompleteSprint, DeleteSprint, GetSprint, ListSprints, PruneSprints, RevertSprint,
    StartSprint,
};
use crate::types::{Noun, Operation, Verb};
use crate::user::{AddUser, GetUser};
use serde::de::DeserializeOwned;
use serde_json::Value;
use sprintboard_operations::{Execute, OperationProcessor};
use tracing::debug;

/// Run a parsed operation through `processor`.
///
/// An actor named in the input replaces the context's identity for this
/// operation.
pub async fn dispatch<P>(
    operation: &Operation,
    ctx: &SprintboardContext,
    processor: &P,
) -> Result<Value>
where
    P: OperationProcessor<SprintboardContext, SprintboardError>,
{
    let ctx = match &operation.actor {
        Some(actor) => ctx.as_actor(actor.clone()),
        None => ctx.clone(),
    };
    let params = &operation.params;
    debug!(op = %operation.op_string(), "dispatching");

    match (operation.verb, operation.noun) {
        (Verb::Add, Noun::Project) => run::<AddProject, P>(params, &ctx, processor).await,
        (Verb::Get, Noun::Project) => run::<GetProject, P>(params, &ctx, processor).await,
        (Verb::List, Noun::Projects) => run::<ListProjects, P>(params, &ctx, processor).await,
        (Verb::Update, Noun::Project) => run::<UpdateProject, P>(params, &ctx, processor).await,
        (Verb::Archive, Noun::Project) => run::<ArchiveProject, P>(params, &ctx, processor).await,
        (Verb::Delete, Noun::Project) => run::<DeleteProject, P>(params, &ctx, processor).await,

        (Verb::Add, Noun::Member) => run::<AddMember, P>(params, &ctx, processor).await,
        (Verb::List, Noun::Members) => run::<ListMembers, P>(params, &ctx, processor).await,
        (Verb::Update, Noun::Member) => run::<UpdateMember, P>(params, &ctx, processor).await,
        (Verb::Delete, Noun::Member) => run::<DeleteMember, P>(params, &ctx, processor).await,

        (Verb::Send, Noun::Invite) => run::<SendInvite, P>(params, &ctx, processor).await,
        (Verb::Accept, Noun::Invite) => run::<AcceptInvite, P>(params, &ctx, processor).await,
        (Verb::Decline, Noun::Invite) => run::<DeclineInvite, P>(params, &ctx, processor).await,
        (Verb::List, Noun::Invites) => run::<ListInvites, P>(params, &ctx, processor).await,

        (Verb::Add, Noun::User) => run::<AddUser, P>(params, &ctx, processor).await,
        (Verb::Get, Noun::User) => run::<GetUser, P>(params, &ctx, processor).await,

        (Verb::Add, Noun::Sprint) => run::<AddSprint, P>(params, &ctx, processor).await,
        (Verb::Get, Noun::Sprint) => run::<GetSprint, P>(params, &ctx, processor).await,
        (Verb::List, Noun::Sprints) => run::<ListSprints, P>(params, &ctx, processor).await,
        (Verb::Start, Noun::Sprint) => run::<StartSprint, P>(params, &ctx, processor).await,
        (Verb::Complete, Noun::Sprint) => run::<CompleteSprint, P>(params, &ctx, processor).await,
        (Verb::Revert, Noun::Sprint) => run::<RevertSprint, P>(params, &ctx, processor).await,
        (Verb::Delete, Noun::Sprint) => run::<DeleteSprint, P>(params, &ctx, processor).await,
        (Verb::Prune, Noun::Sprints) => run::<PruneSprints, P>(params, &ctx, processor).await,

        (Verb::Add, Noun::Issue) => run::<AddIssue, P>(params, &ctx, processor).await,
        (Verb::Get, Noun::Issue) => run::<GetIssue, P>(params, &ctx, processor).await,
        // "list issues" with only a sprint means the sprint board
        (Verb::List, Noun::Issues)
            if params.contains_key("sprint_id") && !params.contains_key("project_id") =>
        {
            run::<ListSprintIssues, P>(params, &ctx, processor).await
        }
        (Verb::List, Noun::Issues) => run::<ListIssues, P>(params, &ctx, processor).await,
        (Verb::List, Noun::SprintIssues) => {
            run::<ListSprintIssues, P>(params, &ctx, processor).await
        }
        (Verb::Update, Noun::Issue) => run::<UpdateIssue, P>(params, &ctx, processor).await,
        (Verb::Promote, Noun::Issue) => run::<PromoteIssue, P>(params, &ctx, processor).await,
        (Verb::Schedule, Noun::Issue) => run::<ScheduleIssue, P>(params, &ctx, processor).await,
        (Verb::Unschedule, Noun::Issue) => {
            run::<UnscheduleIssue, P>(params, &ctx, processor).await
        }
        (Verb::Resequence, Noun::Issues) => {
            run::<ResequenceIssues, P>(params, &ctx, processor).await
        }
        (Verb::Transition, Noun::Issue) => {
            run::<TransitionIssue, P>(params, &ctx, processor).await
        }
        (Verb::Assign, Noun::Issue) => run::<AssignIssue, P>(params, &ctx, processor).await,
        (Verb::Delete, Noun::Issue) => run::<DeleteIssue, P>(params, &ctx, processor).await,
        (Verb::Clone, Noun::Issue) => run::<CloneIssue, P>(params, &ctx, processor).await,
        (Verb::Move, Noun::Issue) => run::<MoveIssue, P>(params, &ctx, processor).await,

        (Verb::List, Noun::Activity) => run::<ListActivity, P>(params, &ctx, processor).await,

        (verb, noun) => Err(SprintboardError::InvalidOperation {
            verb: verb.to_string(),
            noun: noun.to_string(),
        }),
    }
}

/// Deserialize the command from its parameters and process it
async fn run<T, P>(
    params: &serde_json::Map<String, Value>,
    ctx: &SprintboardContext,
    processor: &P,
) -> Result<Value>
where
    T: DeserializeOwned + Execute<SprintboardContext, SprintboardError> + Send + Sync,
    P: OperationProcessor<SprintboardContext, SprintboardError>,
{
    let command: T = serde_json::from_value(Value::Object(params.clone()))
        .map_err(|e| SprintboardError::parse(format!("invalid parameters: {}", e)))?;
    processor.process(&command, ctx).await
}
