use anyhow::Result;

use crate::config::RemindhubConfig;
use crate::error::ReminderError;

/// Mark a reminder as completed.
pub async fn complete(config: &RemindhubConfig, number: u64, comment: Option<&str>) -> Result<()> {
    let store = crate::server::build_store(config)?;

    match store.complete(number, comment).await {
        Ok(reminder) => {
            println!("Reminder #{} completed.", reminder.issue_number);
            Ok(())
        }
        Err(e @ ReminderError::PartialCompletion { .. }) => {
            eprintln!("The completion comment was posted, but the issue is still open.");
            eprintln!("Close it manually or re-run this command.");
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}
