//! ListProjects command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::types::{Member, Project};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult};

/// List the projects the caller is a member of
#[operation(
    verb = "list",
    noun = "projects",
    description = "List the caller's projects (archived ones hidden by default)"
)]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListProjects {
    /// Include soft-deleted projects
    #[serde(default)]
    pub include_archived: bool,
}

impl ListProjects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_archived(mut self) -> Self {
        self.include_archived = true;
        self
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for ListProjects {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let result: Result<Value> = async {
            let actor = ctx.current_actor().await?;
            let memberships: Vec<Member> = ctx.query_by("actor_id", actor.as_str()).await?;

            let mut projects = Vec::new();
            for member in memberships {
                let Some(project) = ctx.fetch::<Project>(member.project_id.as_str()).await? else {
                    continue;
                };
                if project.soft_deleted && !self.include_archived {
                    continue;
                }
                let mut entry = serde_json::to_value(&project)?;
                entry["role"] = serde_json::to_value(member.role)?;
                projects.push(entry);
            }

            Ok(json!({
                "count": projects.len(),
                "projects": projects,
            }))
        }
        .await;

        ExecutionResult::unlogged(result)
    }
}
