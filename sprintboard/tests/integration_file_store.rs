//! Persistence through the file-backed store

use std::sync::Arc;

use chrono::{Duration, Utc};

use sprintboard::{
    dispatch,
    issue::{AddIssue, PromoteIssue},
    parse::parse_input,
    project::{AddProject, DeleteProject},
    sprint::{AddSprint, PruneSprints, StartSprint},
    test_support::run,
    ErrorKind, FileStore, IssueId, OperationProcessor, ProjectId, SprintId, SprintboardContext,
    SprintboardProcessor, StaticIdentity,
};
use tempfile::TempDir;

fn open(dir: &std::path::Path, actor: &str) -> SprintboardContext {
    SprintboardContext::new(
        Arc::new(FileStore::new(dir)),
        Arc::new(StaticIdentity::new(actor)),
    )
}

#[tokio::test]
async fn test_state_survives_reopen() {
    let temp = TempDir::new().unwrap();
    let processor = SprintboardProcessor::new();

    let (project_id, issue_ids) = {
        let ctx = open(temp.path(), "alice");
        let project = processor
            .process(&AddProject::new("Apollo"), &ctx)
            .await
            .unwrap();
        let project_id = ProjectId::from_string(project["id"].as_str().unwrap());

        let mut issue_ids = Vec::new();
        for title in ["I1", "I2", "I3"] {
            let issue = processor
                .process(&AddIssue::new(title, &project_id), &ctx)
                .await
                .unwrap();
            issue_ids.push(IssueId::from_string(issue["id"].as_str().unwrap()));
        }
        processor
            .process(&PromoteIssue::new(&issue_ids[2]), &ctx)
            .await
            .unwrap();
        (project_id, issue_ids)
    };

    let ctx = open(temp.path(), "alice");
    let issues = ctx.project_issues(&project_id).await.unwrap();
    let order: Vec<&IssueId> = issues.iter().map(|i| &i.id).collect();
    assert_eq!(order, vec![&issue_ids[2], &issue_ids[0], &issue_ids[1]]);

    let project_file = temp
        .path()
        .join("projects")
        .join(format!("{}.json", project_id));
    assert!(project_file.exists());

    // Activity is appended to the log on disk, newest first on read
    let entries = ctx.read_activity(None).await.unwrap();
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0].op, "promote issue");
    assert!(temp.path().join("activity").join("current.jsonl").exists());
}

#[tokio::test]
async fn test_prune_after_project_delete_on_disk() {
    let temp = TempDir::new().unwrap();
    let ctx = open(temp.path(), "alice");
    let processor = SprintboardProcessor::new();

    let project = processor
        .process(&AddProject::new("Apollo"), &ctx)
        .await
        .unwrap();
    let project_id = ProjectId::from_string(project["id"].as_str().unwrap());
    let sprint = processor
        .process(&AddSprint::new("Sprint 1", &project_id), &ctx)
        .await
        .unwrap();
    let sprint_id = sprint["id"].as_str().unwrap().to_string();

    processor
        .process(&DeleteProject::new(&project_id), &ctx)
        .await
        .unwrap();
    assert!(temp
        .path()
        .join("sprints")
        .join(format!("{}.json", sprint_id))
        .exists());

    let pruned = processor.process(&PruneSprints::new(), &ctx).await.unwrap();
    assert_eq!(pruned["count"], 1);
    assert!(!temp
        .path()
        .join("sprints")
        .join(format!("{}.json", sprint_id))
        .exists());
}

#[tokio::test]
async fn test_parsed_batch_against_file_store() {
    let temp = TempDir::new().unwrap();
    let ctx = open(temp.path(), "alice");
    let processor = SprintboardProcessor::new();

    let ops = parse_input(serde_json::json!({"op": "add project", "name": "Apollo"})).unwrap();
    let project = dispatch(&ops[0], &ctx, &processor).await.unwrap();
    let project_id = project["id"].as_str().unwrap();

    let ops = parse_input(serde_json::json!([
        {"op": "add issue", "title": "A", "projectId": project_id, "storyPoints": 3},
        {"add": "sprint", "name": "Sprint 1", "project": project_id},
        {"op": "list issues", "projectId": project_id},
    ]))
    .unwrap();
    assert_eq!(ops.len(), 3);

    let mut results = Vec::new();
    for op in &ops {
        results.push(dispatch(op, &ctx, &processor).await.unwrap());
    }
    assert_eq!(results[0]["story_points"], 3);
    assert_eq!(results[1]["status"], "not_started");
    assert_eq!(results[2]["count"], 1);
}

/// Two contexts over one store directory stand in for two CLI processes:
/// each has its own in-process write gate, so only the store lock keeps
/// their sprint starts apart.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_separate_contexts_never_start_two_sprints() {
    let temp = TempDir::new().unwrap();
    let first = open(temp.path(), "alice");
    let second = open(temp.path(), "bob");

    for round in 0..10 {
        let project = run(&first, AddProject::new(format!("Project {}", round)))
            .await
            .unwrap();
        let project_id = ProjectId::from_string(project["id"].as_str().unwrap());
        let mut sprint_ids = Vec::new();
        for name in ["Sprint 1", "Sprint 2"] {
            let sprint = run(&first, AddSprint::new(name, &project_id)).await.unwrap();
            sprint_ids.push(SprintId::from_string(sprint["id"].as_str().unwrap()));
        }

        let end = Utc::now() + Duration::days(14);
        let (a, b) = tokio::join!(
            run(&first, StartSprint::new(&sprint_ids[0], end)),
            run(&second, StartSprint::new(&sprint_ids[1], end)),
        );

        let outcomes = [a, b];
        let started = outcomes.iter().filter(|r| r.is_ok()).count();
        assert_eq!(started, 1, "round {}", round);
        for outcome in &outcomes {
            if let Err(e) = outcome {
                assert_eq!(e.kind(), ErrorKind::InvariantViolation, "round {}: {}", round, e);
            }
        }

        let active = first
            .project_sprints(&project_id)
            .await
            .unwrap()
            .iter()
            .filter(|s| s.is_active())
            .count();
        assert_eq!(active, 1);
    }
}
