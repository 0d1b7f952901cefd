//! Issue types

use super::ids::{ActorId, IssueId, ProjectId, SprintId};
use serde::{Deserialize, Serialize};

/// Kind of work an issue represents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    #[default]
    Story,
    Bug,
    Task,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Board column of an issue. Any status may move to any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// A unit of work within a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    pub project_id: ProjectId,

    /// Containing sprint; absent means the issue is in the backlog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<SprintId>,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_points: Option<u32>,

    #[serde(default)]
    pub issue_type: IssueType,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub status: IssueStatus,

    /// Absent means unassigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<ActorId>,

    /// Actor that created (or cloned) the issue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter_id: Option<ActorId>,

    /// Backlog position within the project, ascending
    #[serde(default)]
    pub sequence: u32,
}

impl Issue {
    pub fn new(project_id: ProjectId, title: impl Into<String>, sequence: u32) -> Self {
        Self {
            id: IssueId::new(),
            project_id,
            sprint_id: None,
            title: title.into(),
            description: None,
            story_points: None,
            issue_type: IssueType::default(),
            priority: Priority::default(),
            status: IssueStatus::default(),
            assignee_id: None,
            reporter_id: None,
            sequence,
        }
    }

    /// Whether the issue sits in the backlog (no sprint)
    pub fn in_backlog(&self) -> bool {
        self.sprint_id.is_none()
    }

    /// Copy every field into a fresh issue with a new id and sequence
    pub fn duplicate(&self, sequence: u32, reporter_id: Option<ActorId>) -> Self {
        Self {
            id: IssueId::new(),
            sequence,
            reporter_id,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_minimal_document() {
        let json = r#"{"id": "i1", "project_id": "p1", "title": "Fix login"}"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.issue_type, IssueType::Story);
        assert_eq!(issue.priority, Priority::Medium);
        assert_eq!(issue.status, IssueStatus::NotStarted);
        assert_eq!(issue.sequence, 0);
        assert!(issue.in_backlog());
    }

    #[test]
    fn test_duplicate_mints_new_identity() {
        let mut issue = Issue::new(ProjectId::from_string("p1"), "Original", 0);
        issue.sprint_id = Some(SprintId::from_string("s1"));
        issue.priority = Priority::High;

        let copy = issue.duplicate(3, Some(ActorId::from_string("bob")));
        assert_ne!(copy.id, issue.id);
        assert_eq!(copy.sequence, 3);
        assert_eq!(copy.sprint_id, issue.sprint_id);
        assert_eq!(copy.priority, Priority::High);
        assert_eq!(copy.reporter_id, Some(ActorId::from_string("bob")));
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_value(IssueStatus::InProgress).unwrap(),
            "in_progress"
        );
    }
}
