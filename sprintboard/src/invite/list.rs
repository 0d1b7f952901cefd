//! ListInvites command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::types::{Notification, Project};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult};

/// List invites addressed to the caller
#[operation(
    verb = "list",
    noun = "invites",
    description = "List the caller's invites (pending only by default)"
)]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListInvites {
    /// Include accepted and declined invites
    #[serde(default)]
    pub all: bool,
}

impl ListInvites {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for ListInvites {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let result: Result<Value> = async {
            let actor = ctx.current_actor().await?;
            let invites: Vec<Notification> =
                ctx.query_by("recipient_id", actor.as_str()).await?;

            let mut entries = Vec::new();
            for invite in invites.iter().filter(|n| self.all || n.is_pending()) {
                let project = ctx.fetch::<Project>(invite.project_id.as_str()).await?;
                let mut entry = serde_json::to_value(invite)?;
                entry["project_name"] = project.map(|p| Value::from(p.name)).unwrap_or(Value::Null);
                entries.push(entry);
            }

            Ok(json!({
                "count": entries.len(),
                "invites": entries,
            }))
        }
        .await;

        ExecutionResult::unlogged(result)
    }
}
