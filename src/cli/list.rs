use anyhow::Result;

use crate::config::RemindhubConfig;
use crate::reminder::codec::render_date;
use crate::reminder::types::{Priority, ReminderFilters, SortBy, StatusFilter};

/// List reminders in a table, or as JSON with `json = true`.
pub async fn list(
    config: &RemindhubConfig,
    status: Option<StatusFilter>,
    priority: Option<Priority>,
    category: Option<String>,
    sort_by: Option<SortBy>,
    limit: Option<u8>,
    json: bool,
) -> Result<()> {
    let filters = ReminderFilters {
        status: status.unwrap_or(config.reminders.default_status),
        priority,
        category,
        sort_by: Some(sort_by.unwrap_or(config.reminders.default_sort)),
        limit: Some(limit.unwrap_or(config.reminders.list_limit)),
    };

    let store = crate::server::build_store(config)?;
    let reminders = store.list(&filters).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reminders)?);
        return Ok(());
    }

    if reminders.is_empty() {
        println!("No reminders found (status: {}).", filters.status);
        return Ok(());
    }

    println!(
        "{:<6} {:<8} {:<22} {:<10} {:<12} TITLE",
        "#", "PRIO", "DUE", "STATUS", "CATEGORY"
    );
    for r in &reminders {
        println!(
            "{:<6} {:<8} {:<22} {:<10} {:<12} {}",
            r.issue_number,
            r.priority,
            render_date(&r.due_date),
            r.status,
            r.category.as_deref().unwrap_or("-"),
            r.title
        );
    }
    println!();
    println!("{} reminder(s)", reminders.len());

    Ok(())
}
