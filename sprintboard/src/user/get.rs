//! GetUser command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::types::ActorId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult};

/// Get a user profile
#[operation(verb = "get", noun = "user", description = "Get a user profile by actor ID")]
#[derive(Debug, Deserialize, Serialize)]
pub struct GetUser {
    /// The actor ID
    pub id: ActorId,
}

impl GetUser {
    pub fn new(id: impl Into<ActorId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for GetUser {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let result: Result<Value> = async {
            let user = ctx.read_user(&self.id).await?;
            Ok(serde_json::to_value(&user)?)
        }
        .await;

        ExecutionResult::unlogged(result)
    }
}
