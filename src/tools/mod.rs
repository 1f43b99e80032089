pub mod reminder_complete;
pub mod reminder_create;
pub mod reminder_get;
pub mod reminder_list;

use reminder_complete::ReminderCompleteParams;
use reminder_create::ReminderCreateParams;
use reminder_get::ReminderGetParams;
use reminder_list::ReminderListParams;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use std::sync::Arc;

use crate::config::ReminderDefaults;
use crate::reminder::store::ReminderStore;

/// The remindhub MCP tool handler. Holds the reminder store and list defaults
/// and exposes the reminder tools via the `#[tool_router]` macro.
#[derive(Clone)]
pub struct ReminderTools {
    tool_router: ToolRouter<Self>,
    store: ReminderStore,
    defaults: Arc<ReminderDefaults>,
}

#[tool_router]
impl ReminderTools {
    pub fn new(store: ReminderStore, defaults: Arc<ReminderDefaults>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            store,
            defaults,
        }
    }

    /// Create a reminder backed by a GitHub Issue.
    #[tool(description = "Create a new reminder as a GitHub Issue. Requires title, description and an ISO 8601 dueDate; priority (high/medium/low) and category are optional.")]
    async fn reminder_create(
        &self,
        Parameters(params): Parameters<ReminderCreateParams>,
    ) -> Result<String, String> {
        let req = params.into_new_reminder()?;
        tracing::info!(title = %req.title, "reminder_create called");

        let reminder = self
            .store
            .create(req)
            .await
            .map_err(|e| format!("Error: {e}"))?;

        Ok(reminder_create::render_created(&reminder))
    }

    /// List reminders with optional filters.
    #[tool(description = "List reminders. Filter by status (active/completed/all), category and priority; sort by dueDate, priority or created.")]
    async fn reminder_list(
        &self,
        Parameters(params): Parameters<ReminderListParams>,
    ) -> Result<String, String> {
        let filters = params.into_filters(&self.defaults)?;
        tracing::info!(status = %filters.status, "reminder_list called");

        let reminders = self
            .store
            .list(&filters)
            .await
            .map_err(|e| format!("Error: {e}"))?;

        Ok(reminder_list::render_list(&reminders, filters.status))
    }

    /// Show one reminder in full.
    #[tool(description = "Get a single reminder by its GitHub Issue number.")]
    async fn reminder_get(
        &self,
        Parameters(params): Parameters<ReminderGetParams>,
    ) -> Result<String, String> {
        tracing::info!(issue_number = params.issue_number, "reminder_get called");

        let reminder = self
            .store
            .get(params.issue_number)
            .await
            .map_err(|e| format!("Error: {e}"))?;

        Ok(reminder_get::render_reminder(&reminder))
    }

    /// Mark a reminder as done.
    #[tool(description = "Mark a reminder as completed: posts a completion comment and closes the GitHub Issue.")]
    async fn reminder_complete(
        &self,
        Parameters(params): Parameters<ReminderCompleteParams>,
    ) -> Result<String, String> {
        tracing::info!(issue_number = params.issue_number, "reminder_complete called");

        let reminder = self
            .store
            .complete(params.issue_number, params.comment.as_deref())
            .await
            .map_err(|e| format!("Error: {e}"))?;

        Ok(format!(
            "✓ Reminder #{} marked as completed",
            reminder.issue_number
        ))
    }
}

#[tool_handler]
impl ServerHandler for ReminderTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(
                "remindhub stores reminders as GitHub Issues. Use reminder_create to add one, \
                 reminder_list to browse, reminder_get for details and reminder_complete to close it."
                    .into(),
            ),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
