//! The `Operation` metadata trait and the `Execute` trait commands implement

use crate::{ExecutionResult, ParamMeta};
use async_trait::async_trait;
use serde_json::Value;

/// Metadata about an operation, generated by `#[operation(...)]`
pub trait Operation {
    /// The verb (e.g., "add", "promote")
    fn verb(&self) -> &'static str;

    /// The noun (e.g., "issue", "sprint")
    fn noun(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Parameter metadata derived from the struct fields
    fn parameters(&self) -> &'static [ParamMeta];

    /// Canonical op string, e.g. "add issue"
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Execute an operation against a context
#[async_trait]
pub trait Execute<C, E>: Operation + Send + Sync
where
    C: Send + Sync,
    E: Send,
{
    /// Run the operation
    async fn execute(&self, ctx: &C) -> ExecutionResult<Value, E>;

    /// IDs of the resources touched by a successful result
    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        Vec::new()
    }
}
