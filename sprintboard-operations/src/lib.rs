//! Command plumbing shared by the sprintboard engine.
//!
//! A command is a plain struct whose fields double as its parameters.
//! `#[operation]` derives the [`Operation`] metadata (verb, noun, parameter
//! list) from the struct; the engine implements [`Execute`] by hand. The
//! outcome is an [`ExecutionResult`]: mutations carry a [`LogEntry`] for the
//! activity log, reads do not. An [`OperationProcessor`] decides what happens
//! to those entries.
//!
//! ```ignore
//! use sprintboard_operations::*;
//!
//! #[operation(verb = "start", noun = "sprint", description = "Start a sprint")]
//! #[derive(Debug, Deserialize, Serialize)]
//! pub struct StartSprint {
//!     /// Sprint to start
//!     pub id: SprintId,
//!     /// Planned end of the sprint window
//!     pub end_date: DateTime<Utc>,
//! }
//!
//! #[async_trait]
//! impl Execute<SprintboardContext, SprintboardError> for StartSprint {
//!     async fn execute(&self, ctx: &SprintboardContext) -> ExecutionResult<Value, SprintboardError> {
//!         // validate, commit one batch, then ExecutionResult::logged(..)
//!     }
//! }
//! ```

mod execution_result;
mod log;
mod operation;
mod parameter;
mod processor;

pub use execution_result::ExecutionResult;
pub use log::LogEntry;
pub use operation::{Execute, Operation};
pub use parameter::{params_schema, ParamMeta, ParamType};
pub use processor::OperationProcessor;

pub use sprintboard_operations_macros::{operation, param};

pub use async_trait::async_trait;
pub use serde_json::Value;
