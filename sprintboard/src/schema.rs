//! Operation catalog
//!
//! Describes every command (op string, description, parameter schema) plus
//! usage examples and the verb aliases the parser accepts. `sprintboard ops`
//! prints it.

use crate::activity::ListActivity;
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
use crate::types::{IssueStatus, MemberRole};
use crate::user::{AddUser, GetUser};
use chrono::Utc;
use serde_json::{json, Map, Value};
use sprintboard_operations::{params_schema, Operation};

/// One instance of every command, for metadata only
pub fn all_operations() -> Vec<Box<dyn Operation>> {
    let end = Utc::now();
    vec![
        Box::new(AddProject::new("")),
        Box::new(GetProject::new("")),
        Box::new(ListProjects::new()),
        Box::new(UpdateProject::new("", "")),
        Box::new(ArchiveProject::new("")),
        Box::new(DeleteProject::new("")),
        Box::new(AddMember::new("", "")),
        Box::new(ListMembers::new("")),
        Box::new(UpdateMember::new("", MemberRole::Member)),
        Box::new(DeleteMember::new("")),
        Box::new(SendInvite::new("", "")),
        Box::new(AcceptInvite::new("")),
        Box::new(DeclineInvite::new("")),
        Box::new(ListInvites::new()),
        Box::new(AddUser::new("")),
        Box::new(GetUser::new("")),
        Box::new(AddSprint::new("", "")),
        Box::new(GetSprint::new("")),
        Box::new(ListSprints::new("")),
        Box::new(StartSprint::new("", end)),
        Box::new(CompleteSprint::new("")),
        Box::new(RevertSprint::new("")),
        Box::new(DeleteSprint::new("")),
        Box::new(PruneSprints::new()),
        Box::new(AddIssue::new("", "")),
        Box::new(GetIssue::new("")),
        Box::new(ListIssues::new("")),
        Box::new(ListSprintIssues::new("")),
        Box::new(UpdateIssue::new("")),
        Box::new(PromoteIssue::new("")),
        Box::new(ScheduleIssue::new("", "")),
        Box::new(UnscheduleIssue::new("")),
        Box::new(ResequenceIssues::new(Vec::new())),
        Box::new(TransitionIssue::new("", IssueStatus::NotStarted)),
        Box::new(AssignIssue::unassign("")),
        Box::new(DeleteIssue::new("")),
        Box::new(CloneIssue::new("")),
        Box::new(MoveIssue::new("")),
        Box::new(ListActivity::new()),
    ]
}

/// Full catalog: operations with parameter schemas, examples, verb aliases
pub fn operation_catalog() -> Value {
    let operations: Vec<Value> = all_operations()
        .iter()
        .map(|op| {
            json!({
                "op": op.op_string(),
                "description": op.description(),
                "params": params_schema(op.parameters()),
            })
        })
        .collect();

    json!({
        "description": "Sprintboard operations. Accepts forgiving input with aliases and inference.",
        "operations": operations,
        "examples": examples(),
        "verb_aliases": verb_aliases(),
    })
}

fn examples() -> Vec<Value> {
    vec![
        json!({
            "description": "Create a project",
            "value": {"op": "add project", "name": "Apollo"}
        }),
        json!({
            "description": "Add an issue - inferred from title and project",
            "value": {"title": "Fix login bug", "projectId": "01PRJ..."}
        }),
        json!({
            "description": "Start a sprint",
            "value": {"op": "start sprint", "id": "01SPR...", "end_date": "2026-11-02T00:00:00Z"}
        }),
        json!({
            "description": "Complete a sprint, carrying open issues into a new sprint",
            "value": {"op": "complete sprint", "id": "01SPR...", "issue_ids": ["01ISS..."], "disposition": "new_sprint", "new_sprint_name": "Sprint 2"}
        }),
        json!({
            "description": "Move an issue to the top of the backlog",
            "value": {"op": "promote issue", "id": "01ISS..."}
        }),
        json!({
            "description": "Reorder the backlog",
            "value": {"op": "resequence issues", "issues": [{"id": "01ISS...", "sequence": 0}]}
        }),
        json!({
            "description": "Board drop - status and assignee in one step",
            "value": {"op": "move issue", "id": "01ISS...", "status": "in_progress", "assignee_id": "bob"}
        }),
        json!({
            "description": "Invite a teammate",
            "value": {"op": "send invite", "project_id": "01PRJ...", "recipient_id": "bob", "role": "member"}
        }),
    ]
}

fn verb_aliases() -> Map<String, Value> {
    let mut aliases = Map::new();
    aliases.insert("add".to_string(), json!(["create", "new", "insert"]));
    aliases.insert("get".to_string(), json!(["show", "read", "fetch", "view"]));
    aliases.insert("list".to_string(), json!(["ls", "all"]));
    aliases.insert("update".to_string(), json!(["edit", "set", "modify", "rename"]));
    aliases.insert("delete".to_string(), json!(["remove", "rm", "del"]));
    aliases.insert("complete".to_string(), json!(["finish", "close", "end"]));
    aliases.insert("revert".to_string(), json!(["reopen", "reset"]));
    aliases.insert("promote".to_string(), json!(["top"]));
    aliases.insert("unschedule".to_string(), json!(["backlog"]));
    aliases.insert("resequence".to_string(), json!(["reorder"]));
    aliases.insert("move".to_string(), json!(["mv"]));
    aliases.insert("clone".to_string(), json!(["copy", "duplicate"]));
    aliases
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{valid_operations, Noun, Verb};

    #[test]
    fn test_catalog_covers_every_operation() {
        let ops: Vec<String> = all_operations().iter().map(|op| op.op_string()).collect();
        assert_eq!(ops.len(), valid_operations().len());
        for (verb, noun) in valid_operations() {
            let op = format!("{} {}", verb, noun);
            assert!(ops.contains(&op), "missing {}", op);
        }
    }

    #[test]
    fn test_catalog_op_strings_parse_back() {
        for op in all_operations() {
            let verb = Verb::from_alias(op.verb());
            let noun = Noun::parse(op.noun());
            assert!(verb.is_some() && noun.is_some(), "{}", op.op_string());
        }
    }

    #[test]
    fn test_params_schema_marks_required() {
        let catalog = operation_catalog();
        let start = catalog["operations"]
            .as_array()
            .unwrap()
            .iter()
            .find(|op| op["op"] == "start sprint")
            .unwrap();
        let required = start["params"]["required"].as_array().unwrap();
        assert!(required.contains(&json!("id")));
        assert!(required.contains(&json!("end_date")));
        assert!(!required.contains(&json!("start_date")));
    }

    #[test]
    fn test_catalog_has_examples_and_aliases() {
        let catalog = operation_catalog();
        assert!(catalog["examples"].as_array().unwrap().len() >= 5);
        assert!(catalog["verb_aliases"]["resequence"].is_array());
    }
}
