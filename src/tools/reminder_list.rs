//! MCP `reminder_list` tool parameters and response rendering.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::ReminderDefaults;
use crate::reminder::codec::render_date;
use crate::reminder::types::{Priority, Reminder, ReminderFilters, SortBy, StatusFilter};

/// Parameters for the `reminder_list` MCP tool.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderListParams {
    /// `"active"`, `"completed"` or `"all"`.
    #[schemars(description = "Status filter: 'active', 'completed' or 'all'. Defaults to 'active'.")]
    pub status: Option<String>,

    #[schemars(description = "Only reminders in this category")]
    pub category: Option<String>,

    #[schemars(description = "Only reminders with this priority: 'high', 'medium' or 'low'")]
    pub priority: Option<String>,

    /// `"dueDate"`, `"priority"` or `"created"`.
    #[schemars(description = "Sort by 'dueDate' (earliest first), 'priority' (high first) or 'created' (newest first). Defaults to 'dueDate'.")]
    pub sort_by: Option<String>,

    #[schemars(description = "Maximum number of reminders to fetch (1-100)")]
    pub limit: Option<u8>,
}

impl ReminderListParams {
    /// Resolve the tool arguments against configured defaults.
    pub fn into_filters(self, defaults: &ReminderDefaults) -> Result<ReminderFilters, String> {
        let status = match self.status.as_deref() {
            Some(s) => s.parse::<StatusFilter>()?,
            None => defaults.default_status,
        };
        let priority = self.priority.as_deref().map(str::parse::<Priority>).transpose()?;
        let sort_by = match self.sort_by.as_deref() {
            Some(s) => s.parse::<SortBy>()?,
            None => defaults.default_sort,
        };

        Ok(ReminderFilters {
            status,
            priority,
            category: self.category.filter(|c| !c.is_empty()),
            sort_by: Some(sort_by),
            limit: Some(self.limit.unwrap_or(defaults.list_limit)),
        })
    }
}

fn priority_marker(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "🔴",
        Priority::Medium => "🟡",
        Priority::Low => "🟢",
    }
}

pub fn render_list(reminders: &[Reminder], status: StatusFilter) -> String {
    if reminders.is_empty() {
        return format!("No reminders found (status: {status})");
    }

    let items: Vec<String> = reminders
        .iter()
        .map(|r| {
            let category = r
                .category
                .as_ref()
                .map(|c| format!(" [{c}]"))
                .unwrap_or_default();
            format!(
                "{} #{}: **{}**{}\n   📅 {}",
                priority_marker(r.priority),
                r.issue_number,
                r.title,
                category,
                render_date(&r.due_date)
            )
        })
        .collect();

    format!("📋 Found {} reminder(s)\n\n{}", reminders.len(), items.join("\n\n"))
}
