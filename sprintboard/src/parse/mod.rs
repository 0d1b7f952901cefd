//! Forgiving input parsing for sprintboard operations
//!
//! The parser accepts several input shapes and normalizes them to canonical
//! [`Operation`]s: snake_case keys, resolved aliases and an optional actor.

use crate::error::{Result, SprintboardError};
use crate::types::{ActorId, Noun, Operation, Verb};
use serde_json::{Map, Value};

/// Parse input JSON into one or more Operations
pub fn parse_input(input: Value) -> Result<Vec<Operation>> {
    match input {
        Value::Array(arr) => arr.into_iter().map(parse_single).collect(),
        Value::Object(obj) => Ok(vec![parse_single(Value::Object(obj))?]),
        _ => Err(SprintboardError::parse("input must be an object or array")),
    }
}

/// Parse a single operation from JSON
fn parse_single(input: Value) -> Result<Operation> {
    let obj = match input {
        Value::Object(obj) => obj,
        _ => return Err(SprintboardError::parse("operation must be an object")),
    };

    let (verb, noun, mut params) = extract_operation(&obj)?;

    let actor = obj
        .get("actor")
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(ActorId::from_string);

    normalize_params(noun, &mut params);

    let mut operation = Operation::new(verb, noun, params);
    if let Some(actor) = actor {
        operation = operation.with_actor(actor);
    }

    Ok(operation)
}

/// Extract verb and noun from the input object
fn extract_operation(obj: &Map<String, Value>) -> Result<(Verb, Noun, Map<String, Value>)> {
    // Strategy 1: "op": "verb noun"
    if let Some(op_value) = obj.get("op").or_else(|| obj.get("operation")) {
        let op_str = op_value
            .as_str()
            .ok_or_else(|| SprintboardError::parse("op must be a string"))?;
        let (verb, noun) = parse_op_string(op_str)
            .ok_or_else(|| SprintboardError::parse(format!("unknown operation: {}", op_str)))?;
        return Ok((verb, noun, filter_keys(obj, &["op", "operation"])));
    }

    // Strategy 2: separate verb/noun fields
    if let (Some(v), Some(n)) = (obj.get("verb"), obj.get("noun")) {
        if let (Some(verb_str), Some(noun_str)) = (v.as_str(), n.as_str()) {
            if let (Some(verb), Some(noun)) = (Verb::from_alias(verb_str), Noun::parse(noun_str)) {
                return Ok((verb, noun, filter_keys(obj, &["verb", "noun"])));
            }
        }
    }

    // Strategy 3: shorthand keys like { "start": "sprint", ... }
    for (key, value) in obj {
        if let Some(verb) = Verb::from_alias(key) {
            if let Some(noun) = value.as_str().and_then(Noun::parse) {
                return Ok((verb, noun, filter_keys(obj, &[key.as_str()])));
            }
        }
    }

    // Strategy 4: infer from data
    if let Some((verb, noun)) = infer_operation(obj) {
        return Ok((verb, noun, filter_keys(obj, &[])));
    }

    Err(SprintboardError::parse("cannot determine operation from input"))
}

/// Parse an op string like "complete sprint" into (Verb, Noun)
fn parse_op_string(s: &str) -> Option<(Verb, Noun)> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() != 2 {
        return None;
    }

    let verb = Verb::from_alias(parts[0])?;
    let noun = Noun::parse(parts[1])?;
    Some((verb, noun))
}

/// Infer the operation from the keys present
fn infer_operation(obj: &Map<String, Value>) -> Option<(Verb, Noun)> {
    let has = |keys: &[&str]| keys.iter().any(|k| obj.contains_key(*k));
    let has_id = has(&["id", "issue_id", "issueId"]);
    let has_project = has(&["project_id", "projectId", "project"]);

    // Title inside a project, no id → add issue
    if has(&["title"]) && has_project && !has_id {
        return Some((Verb::Add, Noun::Issue));
    }

    // Resequence submissions are unmistakable
    if obj.len() == 1 && obj.get("issues").is_some_and(Value::is_array) {
        return Some((Verb::Resequence, Noun::Issues));
    }

    None
}

/// Drop the op-selecting keys and metadata (actor, note)
fn filter_keys(obj: &Map<String, Value>, op_keys: &[&str]) -> Map<String, Value> {
    obj.iter()
        .filter(|(k, _)| !op_keys.contains(&k.as_str()) && !matches!(k.as_str(), "actor" | "note"))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Aliases that apply to every noun
const GLOBAL_ALIASES: &[(&[&str], &str)] = &[
    (&["desc", "body", "content"], "description"),
    (&["points", "estimate"], "story_points"),
    (&["type"], "issue_type"),
    (&["assignee"], "assignee_id"),
    (&["project"], "project_id"),
    (&["sprint"], "sprint_id"),
    (&["recipient", "invitee"], "recipient_id"),
    (&["start"], "start_date"),
    (&["end"], "end_date"),
    (&["issues_ids"], "issue_ids"),
    (&["new_name", "new_sprint"], "new_sprint_name"),
    (&["open_issues_disposition"], "disposition"),
];

/// Aliases that only make sense for one noun; mostly `<noun>_id` → `id`
fn noun_aliases(noun: Noun) -> &'static [(&'static [&'static str], &'static str)] {
    match noun {
        Noun::Issue => &[(&["issue_id"], "id")],
        Noun::Sprint => &[(&["sprint_id"], "id"), (&["issues"], "issue_ids")],
        Noun::Project => &[(&["project_id"], "id")],
        Noun::Member => &[(&["member_id"], "id"), (&["user_id"], "actor_id")],
        Noun::Invite => &[(&["invite_id", "notification_id"], "id")],
        Noun::User => &[(&["user_id", "actor_id"], "id")],
        _ => &[],
    }
}

/// Normalize parameter keys: snake_case first, then aliases
fn normalize_params(noun: Noun, params: &mut Map<String, Value>) {
    snake_case_keys(params);

    // Nested objects in lists, e.g. resequence entries
    for value in params.values_mut() {
        if let Value::Array(items) = value {
            for item in items.iter_mut() {
                if let Value::Object(obj) = item {
                    snake_case_keys(obj);
                }
            }
        }
    }

    for (from_keys, to_key) in noun_aliases(noun).iter().chain(GLOBAL_ALIASES) {
        for from_key in *from_keys {
            if let Some(value) = params.remove(*from_key) {
                if !params.contains_key(*to_key) {
                    params.insert(to_key.to_string(), value);
                }
            }
        }
    }
}

fn snake_case_keys(params: &mut Map<String, Value>) {
    let keys: Vec<String> = params.keys().cloned().collect();
    for key in keys {
        let snake = to_snake_case(&key);
        if snake != key {
            if let Some(value) = params.remove(&key) {
                if !params.contains_key(&snake) {
                    params.insert(snake, value);
                }
            }
        }
    }
}

/// Simple camelCase to snake_case conversion
fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push('_');
        }
        result.push(c.to_lowercase().next().unwrap_or(c));
    }
    result
}
