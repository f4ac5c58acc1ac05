use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Todo,
    InProgress,
    Done,
}

impl Status {
    pub fn parse(s: &str) -> Result<Self, StoreError> {
        match s {
            "todo" => Ok(Self::Todo),
            "in-progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(StoreError::InvalidStatus(s.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Todo => ".",
            Self::InProgress => "*",
            Self::Done => "x",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority derived from a task's tags, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Alta,
    Media,
    Baja,
    None,
}

impl Priority {
    /// First priority tag wins; tags are matched case-insensitively.
    pub fn from_tags(tags: &[String]) -> Self {
        for tag in tags {
            match tag.to_ascii_lowercase().as_str() {
                "alta" => return Self::Alta,
                "media" => return Self::Media,
                "baja" => return Self::Baja,
                _ => {}
            }
        }
        Self::None
    }
}

/// Sort criterion for the list projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    DueDate,
    Name,
    Newest,
    Priority,
}

impl SortKey {
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        match s {
            "due" => Ok(Self::DueDate),
            "name" => Ok(Self::Name),
            "newest" => Ok(Self::Newest),
            "priority" => Ok(Self::Priority),
            _ => anyhow::bail!("invalid sort '{s}': must be due, name, newest, or priority"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DueDate => "due",
            Self::Name => "name",
            Self::Newest => "newest",
            Self::Priority => "priority",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub project: String,
    #[serde(default)]
    pub description: String,
    pub status: Status,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub subtasks: Vec<String>,
    #[serde(default)]
    pub comments: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn priority(&self) -> Priority {
        Priority::from_tags(&self.tags)
    }
}

/// Input for `Store::create`. Missing fields get defaults there.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub id: Option<String>,
    pub title: String,
    pub project: Option<String>,
    pub description: String,
    pub status: Option<Status>,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
}

/// Field-wise patch for `Store::update`. `None` leaves a field untouched;
/// `due_date: Some(None)` clears the due date.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub project: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub due_date: Option<Option<NaiveDate>>,
    pub tags: Option<Vec<String>>,
    pub subtasks: Option<Vec<String>>,
    pub comments: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trip() {
        for s in ["todo", "in-progress", "done"] {
            assert_eq!(Status::parse(s).unwrap().as_str(), s);
        }
    }

    #[test]
    fn status_rejects_unknown() {
        assert!(matches!(
            Status::parse("doing"),
            Err(StoreError::InvalidStatus(_))
        ));
    }

    #[test]
    fn status_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let back: Status = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Status::InProgress);
    }

    #[test]
    fn priority_from_tags() {
        let tags = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(Priority::from_tags(&tags(&["Alta"])), Priority::Alta);
        assert_eq!(Priority::from_tags(&tags(&["x", "media"])), Priority::Media);
        assert_eq!(Priority::from_tags(&tags(&["BAJA"])), Priority::Baja);
        assert_eq!(Priority::from_tags(&tags(&["urgent"])), Priority::None);
        assert!(Priority::Alta < Priority::Media);
        assert!(Priority::Baja < Priority::None);
    }
}
