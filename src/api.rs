//! REST API over the reminder store.
//!
//! | Method | Path | |
//! |--------|------|--|
//! | `GET` | `/health` | liveness |
//! | `POST` | `/api/reminders` | create |
//! | `GET` | `/api/reminders` | list (`status`, `priority`, `category`, `sortBy`, `limit`) |
//! | `GET` | `/api/reminders/{id}` | get |
//! | `DELETE` | `/api/reminders/{id}` | complete (optional `{"comment": ...}` body) |

use axum::body::Bytes;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::config::ReminderDefaults;
use crate::error::ReminderError;
use crate::reminder::store::ReminderStore;
use crate::reminder::types::{NewReminder, Priority, ReminderFilters, SortBy, StatusFilter};

#[derive(Clone)]
pub struct AppState {
    pub store: ReminderStore,
    pub defaults: Arc<ReminderDefaults>,
    pub cors_origin: Arc<str>,
}

/// Error body returned by every failing endpoint: `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Reminder(ReminderError),
}

impl From<ReminderError> for ApiError {
    fn from(e: ReminderError) -> Self {
        Self::Reminder(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Reminder(e) => {
                let status = match &e {
                    ReminderError::Validation(_) => StatusCode::BAD_REQUEST,
                    e if e.is_not_found() => StatusCode::NOT_FOUND,
                    _ => StatusCode::BAD_GATEWAY,
                };
                tracing::error!(error = %e, status = status.as_u16(), "request failed");
                (status, e.to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReminderBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
}

impl CreateReminderBody {
    fn into_new_reminder(self) -> Result<NewReminder, ApiError> {
        let (Some(title), Some(description), Some(due_date)) =
            (self.title, self.description, self.due_date)
        else {
            return Err(ApiError::BadRequest(
                "Missing required fields: title, description, dueDate".into(),
            ));
        };

        let due_date = DateTime::parse_from_rfc3339(due_date.trim())
            .map_err(|_| ApiError::BadRequest(format!("Invalid dueDate: {due_date}")))?
            .with_timezone(&Utc);
        let priority = self
            .priority
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(str::parse::<Priority>)
            .transpose()
            .map_err(ApiError::BadRequest)?;

        Ok(NewReminder {
            title,
            description,
            due_date,
            priority,
            category: self.category.filter(|c| !c.is_empty()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub sort_by: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    fn into_filters(self, defaults: &ReminderDefaults) -> Result<ReminderFilters, ApiError> {
        let status = match self.status.as_deref() {
            Some(s) => s.parse::<StatusFilter>().map_err(ApiError::BadRequest)?,
            None => defaults.default_status,
        };
        let priority = self
            .priority
            .as_deref()
            .map(str::parse::<Priority>)
            .transpose()
            .map_err(ApiError::BadRequest)?;
        let sort_by = match self.sort_by.as_deref() {
            Some(s) => s.parse::<SortBy>().map_err(ApiError::BadRequest)?,
            None => defaults.default_sort,
        };
        let limit = match self.limit.as_deref() {
            Some(l) => l
                .parse::<u8>()
                .map_err(|_| ApiError::BadRequest(format!("Invalid limit: {l}")))?,
            None => defaults.list_limit,
        };

        Ok(ReminderFilters {
            status,
            priority,
            category: self.category.filter(|c| !c.is_empty()),
            sort_by: Some(sort_by),
            limit: Some(limit),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct CompleteBody {
    comment: Option<String>,
}

/// Build the REST router. The MCP endpoint is mounted separately by the server.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/reminders", get(list_reminders).post(create_reminder))
        .route(
            "/api/reminders/{id}",
            get(get_reminder).delete(complete_reminder),
        )
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), log_and_cors))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "service": "remindhub",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn create_reminder(
    State(state): State<AppState>,
    body: Result<Json<CreateReminderBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let req = body.into_new_reminder()?;

    let reminder = state.store.create(req).await?;
    tracing::info!(issue_number = reminder.issue_number, "reminder created via API");

    Ok((StatusCode::CREATED, Json(reminder)).into_response())
}

async fn list_reminders(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let filters = query.into_filters(&state.defaults)?;

    let reminders = state.store.list(&filters).await?;
    tracing::info!(count = reminders.len(), "reminders listed via API");

    Ok(Json(reminders).into_response())
}

fn parse_issue_number(id: &str) -> Result<u64, ApiError> {
    id.parse()
        .map_err(|_| ApiError::BadRequest("Invalid issue number".into()))
}

async fn get_reminder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let number = parse_issue_number(&id)?;
    let reminder = state.store.get(number).await?;
    tracing::info!(issue_number = number, "reminder retrieved via API");
    Ok(Json(reminder).into_response())
}

async fn complete_reminder(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let number = parse_issue_number(&id)?;
    let body: CompleteBody = if body.is_empty() {
        CompleteBody::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))?
    };

    let reminder = state.store.complete(number, body.comment.as_deref()).await?;
    tracing::info!(issue_number = number, "reminder completed via API");

    Ok(Json(json!({
        "message": format!("Reminder #{number} completed successfully"),
        "reminder": reminder,
    }))
    .into_response())
}

async fn not_found(uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not Found", "path": uri.path() })),
    )
        .into_response()
}

/// Log every request and attach CORS headers; answers preflight requests directly.
async fn log_and_cors(State(state): State<AppState>, request: Request, next: Next) -> Response {
    tracing::debug!(method = %request.method(), path = %request.uri().path(), "incoming request");

    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    if let Ok(origin) = HeaderValue::from_str(&state.cors_origin) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, DELETE, OPTIONS"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("content-type"),
        );
    }
    response
}
