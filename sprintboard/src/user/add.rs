//! AddUser command

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use crate::store::WriteBatch;
use crate::types::User;
use crate::validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sprintboard_operations::{async_trait, operation, Execute, ExecutionResult, Operation};

/// Register or refresh the caller's profile. The id is always the caller's.
#[operation(
    verb = "add",
    noun = "user",
    description = "Register or refresh the caller's user profile"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct AddUser {
    /// Display name
    pub name: String,
    /// Contact email
    pub email: Option<String>,
    /// Avatar URL
    pub image: Option<String>,
}

impl AddUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            image: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

#[async_trait]
impl Execute<SprintboardContext, SprintboardError> for AddUser {
    async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let actor = ctx.current_actor().await?;
            let user = User {
                id: actor,
                name: validate::non_empty("name", &self.name)?,
                email: self.email.clone(),
                image: self.image.clone(),
            };

            let _tx = ctx.transaction().await?;
            let mut batch = WriteBatch::new();
            batch.put(&user)?;
            ctx.commit(batch).await?;

            Ok(serde_json::to_value(&user)?)
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }
}
