use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::reminder::codec::render_date;
use crate::reminder::types::Reminder;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderGetParams {
    #[schemars(description = "Issue number of the reminder")]
    pub issue_number: u64,
}

pub fn render_reminder(reminder: &Reminder) -> String {
    let mut out = format!(
        "**#{}: {}** ({})\n\n📅 Due: {}\n⚡️ Priority: {}\n",
        reminder.issue_number,
        reminder.title,
        reminder.status,
        render_date(&reminder.due_date),
        reminder.priority,
    );
    if let Some(category) = &reminder.category {
        out.push_str(&format!("🏷 Category: {category}\n"));
    }
    if let Some(completed_at) = &reminder.completed_at {
        out.push_str(&format!("✓ Completed: {}\n", render_date(completed_at)));
    }
    if !reminder.description.is_empty() {
        out.push_str(&format!("\n{}\n", reminder.description));
    }
    if reminder.is_degraded() {
        out.push_str("\n⚠️ Metadata block missing or unreadable; the due date shown is a fallback.\n");
    }
    out.push_str(&format!("\n🔗 GitHub Issue: {}", reminder.url));
    out
}
