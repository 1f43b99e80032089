//! Server initialization for stdio and HTTP transports.
//!
//! [`serve_stdio`] runs the MCP tools over stdio. [`serve_http`] runs the REST
//! API and the MCP tools (streamable HTTP at `/mcp`) on one listener.

use crate::api::{self, AppState};
use crate::config::RemindhubConfig;
use crate::reminder::store::ReminderStore;
use crate::tools::ReminderTools;
use crate::tracker::github::GitHubTracker;
use crate::tracker::IssueTracker;
use anyhow::Result;
use rmcp::ServiceExt;
use std::sync::Arc;

/// Build the store from config: validate GitHub settings and create the client.
pub fn build_store(config: &RemindhubConfig) -> Result<ReminderStore> {
    let tracker: Arc<dyn IssueTracker> = Arc::new(GitHubTracker::new(&config.github)?);
    Ok(ReminderStore::new(tracker))
}

/// Start the MCP server over whichever transport the config names.
pub async fn serve(config: RemindhubConfig) -> Result<()> {
    match config.server.transport.as_str() {
        "stdio" => serve_stdio(config).await,
        "http" => serve_http(config).await,
        other => anyhow::bail!("unknown transport: {other}. Supported: stdio, http"),
    }
}

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: RemindhubConfig) -> Result<()> {
    tracing::info!("starting remindhub MCP server on stdio");

    let store = build_store(&config)?;
    let tools = ReminderTools::new(store, Arc::new(config.reminders));
    let transport = rmcp::transport::stdio();

    let server = tools.serve(transport).await?;
    tracing::info!("MCP server running, waiting for client");

    server.waiting().await?;
    tracing::info!("MCP server shut down");

    Ok(())
}

/// Router serving the REST API plus MCP over streamable HTTP at `/mcp`.
pub fn http_router(store: ReminderStore, config: &RemindhubConfig) -> axum::Router {
    let defaults = Arc::new(config.reminders.clone());

    let mcp_store = store.clone();
    let mcp_defaults = Arc::clone(&defaults);
    let service = rmcp::transport::streamable_http_server::StreamableHttpService::new(
        move || Ok(ReminderTools::new(mcp_store.clone(), Arc::clone(&mcp_defaults))),
        rmcp::transport::streamable_http_server::session::local::LocalSessionManager::default()
            .into(),
        Default::default(),
    );

    let state = AppState {
        store,
        defaults,
        cors_origin: Arc::from(config.server.cors_origin.as_str()),
    };

    axum::Router::new()
        .nest_service("/mcp", service)
        .merge(api::router(state))
}

/// Start the REST API and MCP-over-HTTP server.
pub async fn serve_http(config: RemindhubConfig) -> Result<()> {
    let bind_addr = config.bind_addr();
    tracing::info!(addr = %bind_addr, "starting remindhub HTTP server");

    let store = build_store(&config)?;
    let router = http_router(store, &config);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        addr = %bind_addr,
        cors_origin = %config.server.cors_origin,
        "REST API at http://{bind_addr}/api/reminders, MCP at http://{bind_addr}/mcp"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutting down HTTP server");
        })
        .await?;

    Ok(())
}
