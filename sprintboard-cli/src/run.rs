//! Command runners

use serde_json::Value;
use sprintboard::{
    dispatch, parse::parse_input, schema::operation_catalog, FileStore, IdentityProvider,
    OperationResult, SprintboardConfig, SprintboardContext, SprintboardError,
    SprintboardProcessor, StaticIdentity,
};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Open (creating if needed) the store under `dir`
pub async fn open_context(
    dir: &Path,
    actor: Option<&str>,
    config: SprintboardConfig,
) -> sprintboard::Result<SprintboardContext> {
    let store = FileStore::new(dir);
    store.create_directories().await?;

    let identity: Arc<dyn IdentityProvider> = match actor {
        Some(actor) => Arc::new(StaticIdentity::new(actor)),
        None => Arc::new(StaticIdentity::anonymous()),
    };
    Ok(SprintboardContext::new(Arc::new(store), identity).with_config(config))
}

/// Parse `input` and run every operation in order, stopping at nothing.
///
/// Returns one result per operation; a parse failure yields a single
/// failed result for the pseudo-op `parse`.
pub async fn execute(ctx: &SprintboardContext, input: &str) -> Vec<OperationResult> {
    let start = Instant::now();
    let ops = match serde_json::from_str::<Value>(input)
        .map_err(|e| SprintboardError::parse(format!("invalid JSON: {}", e)))
        .and_then(parse_input)
    {
        Ok(ops) => ops,
        Err(e) => {
            let ms = start.elapsed().as_millis() as u64;
            return vec![OperationResult::failure("parse", &e, ms)];
        }
    };

    let processor = SprintboardProcessor::new();
    let mut results = Vec::with_capacity(ops.len());
    for op in &ops {
        let start = Instant::now();
        let outcome = dispatch(op, ctx, &processor).await;
        let ms = start.elapsed().as_millis() as u64;
        debug!(op = %op.op_string(), ms, "operation finished");
        results.push(match outcome {
            Ok(data) => OperationResult::success(op.op_string(), data, ms),
            Err(e) => OperationResult::failure(op.op_string(), &e, ms),
        });
    }
    results
}

/// `exec`: run operations and print each result; exit code 1 if any failed
pub async fn run_exec(ctx: &SprintboardContext, input: Option<String>) -> i32 {
    let input = match input {
        Some(input) => input,
        None => {
            let mut buf = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
                eprintln!("Error: failed to read stdin: {}", e);
                return 1;
            }
            buf
        }
    };

    let results = execute(ctx, &input).await;
    for result in &results {
        match serde_json::to_string_pretty(result) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: {}", e),
        }
    }
    if results.iter().all(|r| r.ok) {
        0
    } else {
        1
    }
}

/// `ops`: print the operation catalog
pub fn run_ops() -> i32 {
    print_json(&operation_catalog())
}

/// `config`: print the effective configuration
pub fn run_config(config: &SprintboardConfig) -> i32 {
    match serde_json::to_value(config) {
        Ok(value) => print_json(&value),
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn print_json(value: &Value) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}
