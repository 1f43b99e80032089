use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::config::RemindhubConfig;
use crate::reminder::types::{NewReminder, Priority};

/// Create a reminder from the command line.
pub async fn create(
    config: &RemindhubConfig,
    title: String,
    description: String,
    due: &str,
    priority: Option<&str>,
    category: Option<String>,
) -> Result<()> {
    let due_date = DateTime::parse_from_rfc3339(due)
        .with_context(|| format!("--due must be an ISO 8601 timestamp, got {due:?}"))?
        .with_timezone(&Utc);
    let priority = priority
        .map(str::parse::<Priority>)
        .transpose()
        .map_err(anyhow::Error::msg)?;

    let store = crate::server::build_store(config)?;
    let reminder = store
        .create(NewReminder {
            title,
            description,
            due_date,
            priority,
            category,
        })
        .await?;

    println!("Created reminder #{}", reminder.issue_number);
    println!("{}", reminder.url);
    Ok(())
}
