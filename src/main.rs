use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use remindhub::reminder::types::{Priority, SortBy, StatusFilter};
use remindhub::{cli, config, server};

#[derive(Parser)]
#[command(name = "remindhub", version, about = "Reminders stored as GitHub Issues")]
struct Cli {
    /// Path to config file (defaults to ~/.remindhub/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the MCP server (transport from config, stdio by default)
    Serve,
    /// Start the REST API with MCP over HTTP at /mcp
    Http,
    /// Create a reminder
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Due date in ISO 8601 (e.g. 2025-12-20T10:00:00Z)
        #[arg(long)]
        due: String,
        /// high, medium or low
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// List reminders
    List {
        /// active, completed or all
        #[arg(long)]
        status: Option<StatusFilter>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        category: Option<String>,
        /// dueDate, priority or created
        #[arg(long)]
        sort: Option<SortBy>,
        #[arg(long)]
        limit: Option<u8>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one reminder
    Get {
        number: u64,
        #[arg(long)]
        json: bool,
    },
    /// Complete a reminder (comment, then close the issue)
    Complete {
        number: u64,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Show the GitHub API rate limit
    RateLimit,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::RemindhubConfig::load_from(path)?,
        None => config::RemindhubConfig::load()?,
    };

    // Log to stderr so stdout stays clean for MCP JSON-RPC.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve => server::serve(config).await?,
        Command::Http => server::serve_http(config).await?,
        Command::Create {
            title,
            description,
            due,
            priority,
            category,
        } => {
            cli::create::create(&config, title, description, &due, priority.as_deref(), category)
                .await?
        }
        Command::List {
            status,
            priority,
            category,
            sort,
            limit,
            json,
        } => cli::list::list(&config, status, priority, category, sort, limit, json).await?,
        Command::Get { number, json } => cli::get::get(&config, number, json).await?,
        Command::Complete { number, comment } => {
            cli::complete::complete(&config, number, comment.as_deref()).await?
        }
        Command::RateLimit => cli::rate_limit::rate_limit(&config).await?,
    }

    Ok(())
}
