use anyhow::Result;

use crate::config::RemindhubConfig;
use crate::tracker::github::GitHubTracker;

/// Display the GitHub API rate limit for the configured token.
pub async fn rate_limit(config: &RemindhubConfig) -> Result<()> {
    let tracker = GitHubTracker::new(&config.github)?;
    let rate = tracker.rate_limit().await?;

    println!("GitHub rate limit ({})", tracker.full_repo());
    println!("{}", "=".repeat(40));
    println!("  Limit:        {}", rate.limit);
    println!("  Remaining:    {}", rate.remaining);
    println!("  Resets at:    {}", rate.reset.to_rfc3339());
    Ok(())
}
