//! Parsed operations: a verb, a noun and normalized parameters

use super::ids::ActorId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Action part of an op string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verb {
    Add,
    Get,
    List,
    Update,
    Delete,
    Archive,
    Send,
    Accept,
    Decline,
    Start,
    Complete,
    Revert,
    Prune,
    Promote,
    Schedule,
    Unschedule,
    Resequence,
    Transition,
    Assign,
    Move,
    Clone,
}

impl Verb {
    /// Resolve a verb from its canonical name or a common alias
    pub fn from_alias(s: &str) -> Option<Self> {
        let verb = match s.to_lowercase().as_str() {
            "add" | "create" | "new" | "insert" => Self::Add,
            "get" | "show" | "read" | "fetch" | "view" => Self::Get,
            "list" | "ls" | "all" => Self::List,
            "update" | "edit" | "set" | "modify" | "rename" => Self::Update,
            "delete" | "remove" | "rm" | "del" => Self::Delete,
            "archive" => Self::Archive,
            "send" | "invite" => Self::Send,
            "accept" => Self::Accept,
            "decline" | "reject" => Self::Decline,
            "start" | "begin" => Self::Start,
            "complete" | "finish" | "close" | "end" => Self::Complete,
            "revert" | "reopen" | "reset" => Self::Revert,
            "prune" | "cleanup" => Self::Prune,
            "promote" | "top" => Self::Promote,
            "schedule" => Self::Schedule,
            "unschedule" | "backlog" => Self::Unschedule,
            "resequence" | "reorder" => Self::Resequence,
            "transition" | "status" => Self::Transition,
            "assign" => Self::Assign,
            "move" | "mv" => Self::Move,
            "clone" | "copy" | "duplicate" => Self::Clone,
            _ => return None,
        };
        Some(verb)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Get => "get",
            Self::List => "list",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Archive => "archive",
            Self::Send => "send",
            Self::Accept => "accept",
            Self::Decline => "decline",
            Self::Start => "start",
            Self::Complete => "complete",
            Self::Revert => "revert",
            Self::Prune => "prune",
            Self::Promote => "promote",
            Self::Schedule => "schedule",
            Self::Unschedule => "unschedule",
            Self::Resequence => "resequence",
            Self::Transition => "transition",
            Self::Assign => "assign",
            Self::Move => "move",
            Self::Clone => "clone",
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target part of an op string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Noun {
    Project,
    Projects,
    Member,
    Members,
    Invite,
    Invites,
    User,
    Sprint,
    Sprints,
    Issue,
    Issues,
    SprintIssues,
    Activity,
}

impl Noun {
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.to_lowercase().replace('-', "_");
        let noun = match normalized.as_str() {
            "project" => Self::Project,
            "projects" => Self::Projects,
            "member" => Self::Member,
            "members" => Self::Members,
            "invite" | "invitation" | "notification" => Self::Invite,
            "invites" | "invitations" | "notifications" => Self::Invites,
            "user" | "profile" => Self::User,
            "sprint" => Self::Sprint,
            "sprints" => Self::Sprints,
            "issue" | "ticket" => Self::Issue,
            "issues" | "tickets" | "backlog" => Self::Issues,
            "sprint_issues" | "sprintissues" => Self::SprintIssues,
            "activity" | "log" => Self::Activity,
            _ => return None,
        };
        Some(noun)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Projects => "projects",
            Self::Member => "member",
            Self::Members => "members",
            Self::Invite => "invite",
            Self::Invites => "invites",
            Self::User => "user",
            Self::Sprint => "sprint",
            Self::Sprints => "sprints",
            Self::Issue => "issue",
            Self::Issues => "issues",
            Self::SprintIssues => "sprint_issues",
            Self::Activity => "activity",
        }
    }
}

impl std::fmt::Display for Noun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every (verb, noun) pair that maps to a command
const VALID_OPERATIONS: &[(Verb, Noun)] = &[
    (Verb::Add, Noun::Project),
    (Verb::Get, Noun::Project),
    (Verb::List, Noun::Projects),
    (Verb::Update, Noun::Project),
    (Verb::Archive, Noun::Project),
    (Verb::Delete, Noun::Project),
    (Verb::Add, Noun::Member),
    (Verb::List, Noun::Members),
    (Verb::Update, Noun::Member),
    (Verb::Delete, Noun::Member),
    (Verb::Send, Noun::Invite),
    (Verb::Accept, Noun::Invite),
    (Verb::Decline, Noun::Invite),
    (Verb::List, Noun::Invites),
    (Verb::Add, Noun::User),
    (Verb::Get, Noun::User),
    (Verb::Add, Noun::Sprint),
    (Verb::Get, Noun::Sprint),
    (Verb::List, Noun::Sprints),
    (Verb::Start, Noun::Sprint),
    (Verb::Complete, Noun::Sprint),
    (Verb::Revert, Noun::Sprint),
    (Verb::Delete, Noun::Sprint),
    (Verb::Prune, Noun::Sprints),
    (Verb::Add, Noun::Issue),
    (Verb::Get, Noun::Issue),
    (Verb::List, Noun::Issues),
    (Verb::List, Noun::SprintIssues),
    (Verb::Update, Noun::Issue),
    (Verb::Promote, Noun::Issue),
    (Verb::Schedule, Noun::Issue),
    (Verb::Unschedule, Noun::Issue),
    (Verb::Resequence, Noun::Issues),
    (Verb::Transition, Noun::Issue),
    (Verb::Assign, Noun::Issue),
    (Verb::Delete, Noun::Issue),
    (Verb::Clone, Noun::Issue),
    (Verb::Move, Noun::Issue),
    (Verb::List, Noun::Activity),
];

/// Check whether a verb/noun pair names a known command
pub fn is_valid_operation(verb: Verb, noun: Noun) -> bool {
    VALID_OPERATIONS.contains(&(verb, noun))
}

/// All known (verb, noun) pairs, in dispatch order
pub fn valid_operations() -> &'static [(Verb, Noun)] {
    VALID_OPERATIONS
}

/// A parsed operation ready for dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub verb: Verb,
    pub noun: Noun,
    /// Normalized (snake_case, alias-resolved) parameters
    pub params: Map<String, Value>,
    /// Actor named in the input, if any
    pub actor: Option<ActorId>,
}

impl Operation {
    pub fn new(verb: Verb, noun: Noun, params: Map<String, Value>) -> Self {
        Self {
            verb,
            noun,
            params,
            actor: None,
        }
    }

    pub fn with_actor(mut self, actor: ActorId) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Canonical op string, e.g. "promote issue"
    pub fn op_string(&self) -> String {
        format!("{} {}", self.verb, self.noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_aliases() {
        assert_eq!(Verb::from_alias("create"), Some(Verb::Add));
        assert_eq!(Verb::from_alias("RM"), Some(Verb::Delete));
        assert_eq!(Verb::from_alias("reorder"), Some(Verb::Resequence));
        assert_eq!(Verb::from_alias("frobnicate"), None);
    }

    #[test]
    fn test_noun_parse() {
        assert_eq!(Noun::parse("sprint-issues"), Some(Noun::SprintIssues));
        assert_eq!(Noun::parse("Issue"), Some(Noun::Issue));
        assert_eq!(Noun::parse("board"), None);
    }

    #[test]
    fn test_valid_operations() {
        assert!(is_valid_operation(Verb::Promote, Noun::Issue));
        assert!(is_valid_operation(Verb::Prune, Noun::Sprints));
        assert!(!is_valid_operation(Verb::Promote, Noun::Sprint));
        assert!(!is_valid_operation(Verb::Start, Noun::Issue));
    }

    #[test]
    fn test_op_string() {
        let op = Operation::new(Verb::List, Noun::SprintIssues, Map::new());
        assert_eq!(op.op_string(), "list sprint_issues");
    }
}
