use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lifecycle folder a ticket lives in, both before and after migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Backlog,
    Progress,
    Review,
    Done,
}

impl Status {
    /// Processing order for a migration run.
    pub const ALL: [Status; 4] = [Self::Backlog, Self::Progress, Self::Review, Self::Done];

    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Progress => "progress",
            Self::Review => "review",
            Self::Done => "done",
        }
    }

    /// Name of the `dates` key stamped for tickets in this status.
    pub fn status_date_field(self) -> Option<&'static str> {
        match self {
            Self::Backlog => None,
            Self::Progress => Some("progress"),
            Self::Review => Some("reviewed"),
            Self::Done => Some("done"),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// UTC instant rendered as `YYYY-MM-DDTHH:MM:SSZ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub const FORMAT: &'static str = "%Y-%m-%dT%H:%M:%SZ";

    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|at| Self(at.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dates {
    pub created: Timestamp,
    pub updated: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<Timestamp>,
}

impl Dates {
    /// Build the date block for a ticket found in `status`; the status
    /// timestamp mirrors `updated`.
    pub fn for_status(status: Status, created: Timestamp, updated: Timestamp) -> Self {
        let mut dates = Self {
            created,
            updated,
            progress: None,
            reviewed: None,
            done: None,
        };
        match status {
            Status::Backlog => {}
            Status::Progress => dates.progress = Some(updated),
            Status::Review => dates.reviewed = Some(updated),
            Status::Done => dates.done = Some(updated),
        }
        dates
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentType {
    ReviewRequested,
    Done,
    Blocker,
    #[serde(rename = "comment")]
    General,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub args: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: CommentType,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<CommentAction>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Starting,
    InProgress,
    Idle,
    WaitingPermission,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub status: AgentStatus,
    pub tool: Option<String>,
    pub work: Option<String>,
    pub at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub started_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<Timestamp>,
    pub agent: String,
    pub tmux_window: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worktree_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_status: Option<StatusEntry>,
    #[serde(default)]
    pub status_history: Vec<StatusEntry>,
}

/// JSON ticket record written under `.cortex/tickets/<status>/`.
///
/// Migration only fills `id`, `title`, `body` and `dates`; `comments` stays
/// empty and `session` is written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub body: String,
    pub dates: Dates,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub session: Option<Session>,
}
