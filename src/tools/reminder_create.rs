use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::reminder::codec::render_date;
use crate::reminder::types::{NewReminder, Priority, Reminder};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderCreateParams {
    #[schemars(description = "Short reminder title")]
    pub title: String,

    #[schemars(description = "Detailed description of the reminder")]
    pub description: String,

    #[schemars(description = "Due date and time in ISO 8601 format (e.g. 2025-12-20T10:00:00Z)")]
    pub due_date: String,

    #[schemars(description = "Priority: 'high', 'medium' or 'low'. Defaults to 'medium'.")]
    pub priority: Option<String>,

    #[schemars(description = "Optional category (e.g. work, personal, project)")]
    pub category: Option<String>,
}

impl ReminderCreateParams {
    /// Parse the loosely-typed tool arguments into a creation request.
    pub fn into_new_reminder(self) -> Result<NewReminder, String> {
        let due_date = DateTime::parse_from_rfc3339(self.due_date.trim())
            .map_err(|e| format!("dueDate must be an ISO 8601 timestamp: {e}"))?
            .with_timezone(&Utc);
        let priority = self
            .priority
            .as_deref()
            .map(str::parse::<Priority>)
            .transpose()?;

        Ok(NewReminder {
            title: self.title,
            description: self.description,
            due_date,
            priority,
            category: self.category.filter(|c| !c.is_empty()),
        })
    }
}

pub fn render_created(reminder: &Reminder) -> String {
    let mut out = format!(
        "✓ Reminder created\n\n**#{}: {}**\n\n📅 Due: {}\n⚡️ Priority: {}\n",
        reminder.issue_number,
        reminder.title,
        render_date(&reminder.due_date),
        reminder.priority,
    );
    if let Some(category) = &reminder.category {
        out.push_str(&format!("🏷 Category: {category}\n"));
    }
    out.push_str(&format!("\n🔗 GitHub Issue: {}", reminder.url));
    out
}
