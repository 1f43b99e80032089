use anyhow::Result;

use crate::config::RemindhubConfig;

/// Show a single reminder.
pub async fn get(config: &RemindhubConfig, number: u64, json: bool) -> Result<()> {
    let store = crate::server::build_store(config)?;
    let reminder = store.get(number).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reminder)?);
    } else {
        super::print_reminder(&reminder);
    }
    Ok(())
}
