//! Backlog ordering: creation order, promote-to-top and resequencing

use serde_json::Value;
use sprintboard::{
    issue::{AddIssue, DeleteIssue, ListIssues, PromoteIssue, ResequenceIssues, SequenceUpdate},
    test_support::{memory_context, run, seed_issues, seed_project},
    ErrorKind, IssueId, ResequencePolicy, SprintboardConfig, SprintboardContext,
};

async fn sequences(ctx: &SprintboardContext, ids: &[IssueId]) -> Vec<u32> {
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        out.push(ctx.read_issue(id).await.unwrap().sequence);
    }
    out
}

fn titles(result: &Value) -> Vec<String> {
    result["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_new_issue_sequence_is_existing_count() {
    let ctx = memory_context("alice");
    let project_id = seed_project(&ctx, "Apollo").await;

    for n in 0..5u32 {
        let issue = run(&ctx, AddIssue::new(format!("Issue {}", n), &project_id))
            .await
            .unwrap();
        assert_eq!(issue["sequence"], n);
    }

    // Issues of another project do not count
    let other = seed_project(&ctx, "Gemini").await;
    let issue = run(&ctx, AddIssue::new("First", &other)).await.unwrap();
    assert_eq!(issue["sequence"], 0);
}

#[tokio::test]
async fn test_promote_scenario() {
    let ctx = memory_context("alice");
    let project_id = seed_project(&ctx, "Apollo").await;
    let issues = seed_issues(&ctx, &project_id, &["I1", "I2", "I3"]).await;

    run(&ctx, PromoteIssue::new(&issues[2]).in_project(&project_id))
        .await
        .unwrap();

    assert_eq!(sequences(&ctx, &issues).await, vec![1, 2, 0]);
    let listed = run(&ctx, ListIssues::new(&project_id)).await.unwrap();
    assert_eq!(titles(&listed), vec!["I3", "I1", "I2"]);
}

#[tokio::test]
async fn test_promote_top_issue_is_noop() {
    let ctx = memory_context("alice");
    let project_id = seed_project(&ctx, "Apollo").await;
    let issues = seed_issues(&ctx, &project_id, &["I1", "I2", "I3"]).await;

    let result = run(&ctx, PromoteIssue::new(&issues[0])).await.unwrap();
    assert_eq!(result["promoted"], false);
    assert_eq!(result["updated"], 0);
    assert_eq!(sequences(&ctx, &issues).await, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_promote_twice_equals_once() {
    let ctx = memory_context("alice");
    let project_id = seed_project(&ctx, "Apollo").await;
    let issues = seed_issues(&ctx, &project_id, &["I1", "I2", "I3", "I4"]).await;

    run(&ctx, PromoteIssue::new(&issues[2])).await.unwrap();
    let once = sequences(&ctx, &issues).await;

    let second = run(&ctx, PromoteIssue::new(&issues[2])).await.unwrap();
    assert_eq!(second["promoted"], false);
    assert_eq!(sequences(&ctx, &issues).await, once);
}

#[tokio::test]
async fn test_promote_repairs_gaps_to_contiguous_range() {
    let ctx = memory_context("alice");
    let project_id = seed_project(&ctx, "Apollo").await;
    let issues = seed_issues(&ctx, &project_id, &["I1", "I2", "I3", "I4", "I5"]).await;

    // Deleting leaves a gap at sequence 1
    run(&ctx, DeleteIssue::new(&issues[1])).await.unwrap();
    run(&ctx, PromoteIssue::new(&issues[4])).await.unwrap();

    let remaining = [
        issues[0].clone(),
        issues[2].clone(),
        issues[3].clone(),
        issues[4].clone(),
    ];
    assert_eq!(sequences(&ctx, &remaining).await, vec![1, 2, 3, 0]);
}

#[tokio::test]
async fn test_resequence_trust_accepts_duplicates() {
    let ctx = memory_context("alice").with_config(SprintboardConfig {
        resequence_policy: ResequencePolicy::Trust,
        ..Default::default()
    });
    let project_id = seed_project(&ctx, "Apollo").await;
    let issues = seed_issues(&ctx, &project_id, &["A", "B"]).await;

    let result = run(
        &ctx,
        ResequenceIssues::new(vec![
            SequenceUpdate::new(&issues[0], 5),
            SequenceUpdate::new(&issues[1], 5),
        ]),
    )
    .await
    .unwrap();

    assert_eq!(result["updated"], 2);
    assert_eq!(sequences(&ctx, &issues).await, vec![5, 5]);
}

#[tokio::test]
async fn test_resequence_validate_rejects_duplicates_without_writing() {
    let ctx = memory_context("alice");
    let project_id = seed_project(&ctx, "Apollo").await;
    let issues = seed_issues(&ctx, &project_id, &["A", "B", "C"]).await;

    let err = run(
        &ctx,
        ResequenceIssues::new(vec![
            SequenceUpdate::new(&issues[0], 5),
            SequenceUpdate::new(&issues[1], 5),
        ]),
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvariantViolation);

    // Colliding with an untouched issue is rejected as well
    let err = run(
        &ctx,
        ResequenceIssues::new(vec![SequenceUpdate::new(&issues[0], 2)]),
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvariantViolation);

    assert_eq!(sequences(&ctx, &issues).await, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_resequence_missing_issue_leaves_store_untouched() {
    let ctx = memory_context("alice");
    let project_id = seed_project(&ctx, "Apollo").await;
    let issues = seed_issues(&ctx, &project_id, &["A", "B"]).await;

    let err = run(
        &ctx,
        ResequenceIssues::new(vec![
            SequenceUpdate::new(&issues[0], 1),
            SequenceUpdate::new(&issues[1], 0),
            SequenceUpdate::new("missing", 2),
        ]),
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(sequences(&ctx, &issues).await, vec![0, 1]);
}

#[tokio::test]
async fn test_resequence_after_delete_then_add() {
    let ctx = memory_context("alice");
    let project_id = seed_project(&ctx, "Apollo").await;
    let issues = seed_issues(&ctx, &project_id, &["A", "B", "C"]).await;

    // Deleting A then adding D leaves C and D both at sequence 2
    run(&ctx, DeleteIssue::new(&issues[0])).await.unwrap();
    let d = run(&ctx, AddIssue::new("D", &project_id)).await.unwrap();
    let d = IssueId::from_string(d["id"].as_str().unwrap());
    assert_eq!(sequences(&ctx, &[issues[2].clone(), d.clone()]).await, vec![2, 2]);

    // Moving B does not involve the existing duplicate
    run(
        &ctx,
        ResequenceIssues::new(vec![SequenceUpdate::new(&issues[1], 0)]),
    )
    .await
    .unwrap();

    // Repairing the duplicate is accepted
    run(
        &ctx,
        ResequenceIssues::new(vec![SequenceUpdate::new(&d, 1)]),
    )
    .await
    .unwrap();
    assert_eq!(
        sequences(&ctx, &[issues[1].clone(), d, issues[2].clone()]).await,
        vec![0, 1, 2]
    );
}
