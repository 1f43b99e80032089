//! Reminder <-> issue mapping.
//!
//! [`encode_reminder`] turns a [`NewReminder`] into an [`IssueDraft`] (title,
//! body, labels). [`decode_issue`] reads any issue back into a [`Reminder`],
//! never failing: missing or malformed pieces fall back to defaults and the
//! result is marked [`Fidelity::Degraded`].
//!
//! Body layout:
//!
//! ```text
//! <metadata block>
//!
//! **📅 Due Date:** ...
//! **⚡️ Priority:** ...
//! **🏷 Category:** ...        (only with a category)
//!
//! ---
//!
//! <description>
//!
//! ---
//!
//! **Status:** Active
//! **Created:** ...
//! ```
//!
//! The description is recovered as the second `---` segment, so a `---` inside
//! the description itself shifts the split.

use chrono::{DateTime, Utc};

use super::metadata::{self, ReminderMetadata};
use super::types::{Fidelity, NewReminder, Priority, Reminder, Status};
use crate::tracker::{Issue, IssueDraft, IssueState};

pub const TITLE_TAG: &str = "[REMINDER]";
pub const MARKER_LABEL: &str = "reminder";
pub const PRIORITY_LABEL_PREFIX: &str = "priority-";
pub const CATEGORY_LABEL_PREFIX: &str = "category-";
pub const SEPARATOR: &str = "---";

pub fn priority_label(priority: Priority) -> String {
    format!("{PRIORITY_LABEL_PREFIX}{}", priority.as_str())
}

pub fn category_label(category: &str) -> String {
    format!("{CATEGORY_LABEL_PREFIX}{category}")
}

/// Human-readable timestamp used in issue bodies.
pub fn render_date(ts: &DateTime<Utc>) -> String {
    ts.format("%d.%m.%Y, %H:%M UTC").to_string()
}

/// Labels for a new reminder: marker, priority, and category if given.
pub fn labels_for(priority: Priority, category: Option<&str>) -> Vec<String> {
    let mut labels = vec![MARKER_LABEL.to_string(), priority_label(priority)];
    if let Some(category) = category {
        labels.push(category_label(category));
    }
    labels
}

/// Encode a reminder using the current time as its creation instant.
pub fn encode_reminder(req: &NewReminder) -> IssueDraft {
    encode_reminder_at(req, Utc::now())
}

/// Encode a reminder with an explicit creation instant.
pub fn encode_reminder_at(req: &NewReminder, now: DateTime<Utc>) -> IssueDraft {
    let priority = req.priority_or_default();
    let category = req.category.as_deref();

    let meta = ReminderMetadata {
        due_date: req.due_date,
        priority,
        category: category.map(str::to_string),
        created_at: now,
    };

    let mut body = meta.to_block();
    body.push_str("\n\n");
    body.push_str(&format!("**📅 Due Date:** {}\n", render_date(&req.due_date)));
    body.push_str(&format!("**⚡️ Priority:** {}\n", priority.titleized()));
    if let Some(category) = category {
        body.push_str(&format!("**🏷 Category:** {category}\n"));
    }
    body.push_str(&format!("\n{SEPARATOR}\n\n"));
    body.push_str(&req.description);
    body.push_str(&format!("\n\n{SEPARATOR}\n\n"));
    body.push_str("**Status:** Active\n");
    body.push_str(&format!("**Created:** {}", render_date(&now)));

    IssueDraft {
        title: format!("{TITLE_TAG} {}", req.title),
        body,
        labels: labels_for(priority, category),
    }
}

/// Strip the title tag and following whitespace, once, from the start.
pub fn strip_title_tag(title: &str) -> &str {
    match title.strip_prefix(TITLE_TAG) {
        Some(rest) => {
            let rest = rest.trim_start();
            if rest.is_empty() {
                title
            } else {
                rest
            }
        }
        None => title,
    }
}

/// Second `---` segment of the body, trimmed. Empty unless there are at least
/// three segments.
pub fn extract_description(body: Option<&str>) -> String {
    let Some(body) = body else {
        return String::new();
    };
    let mut parts = body.split(SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(description), Some(_)) => description.trim().to_string(),
        _ => String::new(),
    }
}

fn label_value<'a>(issue: &'a Issue, prefix: &str) -> Option<&'a str> {
    issue.label_names().find_map(|name| name.strip_prefix(prefix))
}

/// Decode an issue, using the current time for fallbacks.
pub fn decode_issue(issue: &Issue) -> Reminder {
    decode_issue_at(issue, Utc::now())
}

/// Decode an issue with an explicit fallback instant for `due_date`.
pub fn decode_issue_at(issue: &Issue, now: DateTime<Utc>) -> Reminder {
    let (due_date, fidelity) = match metadata::parse_block(issue.body.as_deref()) {
        Ok(meta) => (meta.due_date, Fidelity::Full),
        Err(reason) => {
            tracing::debug!(issue_number = issue.number, %reason, "metadata unavailable, using defaults");
            (now, Fidelity::Degraded)
        }
    };

    // Labels are authoritative for priority and category.
    let priority = label_value(issue, PRIORITY_LABEL_PREFIX)
        .and_then(|p| p.parse::<Priority>().ok())
        .unwrap_or_default();
    let category = label_value(issue, CATEGORY_LABEL_PREFIX).map(str::to_string);

    let status = match issue.state {
        IssueState::Open => Status::Active,
        IssueState::Closed | IssueState::Other => Status::Completed,
    };
    let completed_at = match status {
        Status::Completed => issue.closed_at,
        Status::Active => None,
    };

    Reminder {
        issue_number: issue.number,
        title: strip_title_tag(&issue.title).to_string(),
        description: extract_description(issue.body.as_deref()),
        due_date,
        priority,
        category,
        status,
        url: issue.html_url.clone(),
        created_at: issue.created_at,
        completed_at,
        fidelity,
    }
}
