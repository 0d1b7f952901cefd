//! Processor trait - runs operations and handles their log entries

use crate::{Execute, LogEntry};
use async_trait::async_trait;
use serde_json::Value;

/// Runs operations against a context, recording logged results.
///
/// Implementations decide where log entries go (activity log, tracing, ...)
/// and who they are attributed to.
#[async_trait]
pub trait OperationProcessor<C, E>: Send + Sync
where
    C: Send + Sync,
    E: Send,
{
    /// Execute the operation, persist its log entry if any, and return the result
    async fn process<T>(&self, operation: &T, ctx: &C) -> Result<Value, E>
    where
        T: Execute<C, E> + Send + Sync;

    /// Persist one log entry for the given affected resources
    async fn write_log(
        &self,
        ctx: &C,
        log_entry: &LogEntry,
        affected_resources: &[String],
    ) -> Result<(), E>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExecutionResult, Operation, ParamMeta};
    use std::sync::Mutex;

    struct Counter;

    impl Operation for Counter {
        fn verb(&self) -> &'static str {
            "bump"
        }
        fn noun(&self) -> &'static str {
            "counter"
        }
        fn description(&self) -> &'static str {
            "Increment the counter"
        }
        fn parameters(&self) -> &'static [ParamMeta] {
            &[]
        }
    }

    #[async_trait]
    impl Execute<Mutex<u32>, String> for Counter {
        async fn execute(&self, ctx: &Mutex<u32>) -> ExecutionResult<Value, String> {
            let value = {
                let mut count = ctx.lock().unwrap();
                *count += 1;
                *count
            };
            ExecutionResult::Logged {
                value: Value::from(value),
                log_entry: LogEntry::new(self.op_string(), Value::Null, Value::from(value), None, 0),
            }
        }

        fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
            vec!["counter".to_string()]
        }
    }

    #[derive(Default)]
    struct Recorder {
        entries: Mutex<Vec<(LogEntry, Vec<String>)>>,
    }

    #[async_trait]
    impl OperationProcessor<Mutex<u32>, String> for Recorder {
        async fn process<T>(&self, operation: &T, ctx: &Mutex<u32>) -> Result<Value, String>
        where
            T: Execute<Mutex<u32>, String> + Send + Sync,
        {
            let (result, entry) = operation.execute(ctx).await.split();
            if let (Some(entry), Ok(value)) = (entry, &result) {
                let affected = operation.affected_resource_ids(value);
                self.write_log(ctx, &entry, &affected).await?;
            }
            result
        }

        async fn write_log(
            &self,
            _ctx: &Mutex<u32>,
            log_entry: &LogEntry,
            affected_resources: &[String],
        ) -> Result<(), String> {
            self.entries
                .lock()
                .unwrap()
                .push((log_entry.clone(), affected_resources.to_vec()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_processor_records_logged_results() {
        let ctx = Mutex::new(0);
        let recorder = Recorder::default();

        assert_eq!(recorder.process(&Counter, &ctx).await.unwrap(), 1);
        assert_eq!(recorder.process(&Counter, &ctx).await.unwrap(), 2);

        let entries = recorder.entries.lock().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0.op, "bump counter");
        assert_eq!(entries[1].1, vec!["counter".to_string()]);
    }
}
