//! Core reminder type definitions.
//!
//! Defines [`Priority`], [`Status`], [`Fidelity`], the decoded [`Reminder`]
//! record, the [`NewReminder`] creation request and the [`ReminderFilters`]
//! used when listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ReminderError;

/// Reminder priority. Ordering follows urgency: `High < Medium < Low`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Lower-case form used in labels and the metadata block.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Capitalized form for the human-readable part of an issue body.
    pub fn titleized(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!("unknown priority: {s}")),
        }
    }
}

/// Lifecycle status, derived from the tracked item's open/closed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Active,
    Completed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// How much of a reminder was recovered from its metadata block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fidelity {
    /// The metadata block was present and every required field parsed.
    Full,
    /// The metadata block was missing or unusable; `due_date` is a fallback.
    Degraded,
}

/// A reminder decoded from a tracked issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    /// Issue number assigned by the tracker.
    pub issue_number: u64,
    pub title: String,
    /// Text between the first and second `---` separators. Empty if the body
    /// does not have that shape.
    pub description: String,
    /// Due instant. Falls back to the decode instant when metadata is unusable.
    pub due_date: DateTime<Utc>,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub status: Status,
    pub url: String,
    pub created_at: DateTime<Utc>,
    /// Close timestamp. Only set for completed reminders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub fidelity: Fidelity,
}

impl Reminder {
    pub fn is_degraded(&self) -> bool {
        self.fidelity == Fidelity::Degraded
    }
}

/// A request to create a reminder.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReminder {
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
}

impl NewReminder {
    /// Trim the title and category. The title tag is stripped together with
    /// any following whitespace on decode, so edge whitespace cannot survive.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.category = self.category.map(|c| c.trim().to_string());
        self
    }

    /// Check required fields. Runs before any tracker call.
    pub fn validate(&self) -> Result<(), ReminderError> {
        if self.title.trim().is_empty() {
            return Err(ReminderError::Validation("title must not be empty".into()));
        }
        if self.description.trim().is_empty() {
            return Err(ReminderError::Validation(
                "description must not be empty".into(),
            ));
        }
        if let Some(category) = &self.category {
            if category.trim().is_empty() {
                return Err(ReminderError::Validation(
                    "category must not be blank".into(),
                ));
            }
            if category.chars().any(|c| c == ',') {
                return Err(ReminderError::Validation(
                    "category must not contain ','".into(),
                ));
            }
            // Written verbatim into a line of the metadata block.
            if category.chars().any(char::is_control) {
                return Err(ReminderError::Validation(
                    "category must not contain line breaks or control characters".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn priority_or_default(&self) -> Priority {
        self.priority.unwrap_or_default()
    }
}

/// Which lifecycle states a listing should include.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    Active,
    Completed,
    All,
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "all" => Ok(Self::All),
            _ => Err(format!("unknown status filter: {s}")),
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::All => "all",
        })
    }
}

/// Sort key applied after decoding a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortBy {
    /// Earliest due date first.
    #[serde(rename = "dueDate")]
    DueDate,
    /// `high`, then `medium`, then `low`.
    #[serde(rename = "priority")]
    Priority,
    /// Most recently created first.
    #[serde(rename = "created")]
    Created,
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dueDate" | "due_date" | "due" => Ok(Self::DueDate),
            "priority" => Ok(Self::Priority),
            "created" | "createdAt" => Ok(Self::Created),
            _ => Err(format!("unknown sort key: {s}")),
        }
    }
}

/// Filters for [`crate::reminder::store::ReminderStore::list`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReminderFilters {
    pub status: StatusFilter,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    pub sort_by: Option<SortBy>,
    /// Page size requested from the tracker (1-100). Defaults to 100.
    pub limit: Option<u8>,
}
