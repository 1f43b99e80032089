//! GitHubTracker against a local fake of the GitHub REST API.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use remindhub::config::GitHubConfig;
use remindhub::tracker::github::GitHubTracker;
use remindhub::tracker::{
    IssueDraft, IssueQuery, IssueSort, IssueState, IssueTracker, IssueUpdate, StateFilter,
    TrackerError,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct Hit {
    method: &'static str,
    path: String,
    auth: Option<String>,
    api_version: Option<String>,
    query: HashMap<String, String>,
    body: Option<Value>,
}

type Log = Arc<Mutex<Vec<Hit>>>;

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn record(
    log: &Log,
    method: &'static str,
    path: String,
    headers: &HeaderMap,
    query: HashMap<String, String>,
    body: Option<Value>,
) {
    log.lock().unwrap().push(Hit {
        method,
        path,
        auth: header(headers, "authorization"),
        api_version: header(headers, "x-github-api-version"),
        query,
        body,
    });
}

fn issue_json(number: u64, title: &str, state: &str) -> Value {
    json!({
        "number": number,
        "title": title,
        "body": null,
        "labels": [{ "name": "reminder", "color": "ededed" }],
        "state": state,
        "created_at": "2025-11-20T18:30:00Z",
        "closed_at": if state == "closed" { json!("2025-11-21T08:00:00Z") } else { Value::Null },
        "html_url": format!("https://github.com/octo/notes/issues/{number}"),
        "comments": 0,
    })
}

async fn create_issue(
    State(log): State<Log>,
    Path((owner, repo)): Path<(String, String)>,
    headers: HeaderMap,
    Json(draft): Json<Value>,
) -> Response {
    record(&log, "POST", format!("/repos/{owner}/{repo}/issues"), &headers, HashMap::new(), Some(draft.clone()));
    let mut issue = issue_json(7, draft["title"].as_str().unwrap_or_default(), "open");
    issue["body"] = draft["body"].clone();
    issue["labels"] = Value::Array(
        draft["labels"]
            .as_array()
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|name| json!({ "name": name }))
            .collect(),
    );
    (StatusCode::CREATED, Json(issue)).into_response()
}

async fn list_issues(
    State(log): State<Log>,
    Path((owner, repo)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    record(&log, "GET", format!("/repos/{owner}/{repo}/issues"), &headers, query, None);
    let mut pr = issue_json(9, "Add feature", "open");
    pr["pull_request"] = json!({ "url": "https://api.github.com/repos/octo/notes/pulls/9" });
    Json(json!([issue_json(8, "[REMINDER] Newest", "open"), pr, issue_json(3, "[REMINDER] Oldest", "open")]))
        .into_response()
}

async fn get_issue(
    State(log): State<Log>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
    headers: HeaderMap,
) -> Response {
    record(&log, "GET", format!("/repos/{owner}/{repo}/issues/{number}"), &headers, HashMap::new(), None);
    match number {
        42 => Json(issue_json(42, "[REMINDER] Pay rent", "open")).into_response(),
        500 => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        501 => Json(json!({ "weird": true })).into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Not Found", "documentation_url": "https://docs.github.com" })),
        )
            .into_response(),
    }
}

async fn update_issue(
    State(log): State<Log>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
    headers: HeaderMap,
    Json(update): Json<Value>,
) -> Response {
    record(&log, "PATCH", format!("/repos/{owner}/{repo}/issues/{number}"), &headers, HashMap::new(), Some(update.clone()));
    let state = update["state"].as_str().unwrap_or("open");
    Json(issue_json(number, "[REMINDER] Pay rent", state)).into_response()
}

async fn add_comment(
    State(log): State<Log>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&log, "POST", format!("/repos/{owner}/{repo}/issues/{number}/comments"), &headers, HashMap::new(), Some(body.clone()));
    (StatusCode::CREATED, Json(json!({ "id": 1, "body": body["body"] }))).into_response()
}

async fn rate_limit(State(log): State<Log>, headers: HeaderMap) -> Response {
    record(&log, "GET", "/rate_limit".into(), &headers, HashMap::new(), None);
    Json(json!({
        "resources": {},
        "rate": { "limit": 5000, "remaining": 4987, "reset": 1764583200, "used": 13 }
    }))
    .into_response()
}

/// Start the fake API on a random port. Returns the tracker and the request log.
async fn start() -> (GitHubTracker, Log) {
    let log: Log = Arc::default();
    let app = Router::new()
        .route("/repos/{owner}/{repo}/issues", get(list_issues).post(create_issue))
        .route(
            "/repos/{owner}/{repo}/issues/{number}",
            get(get_issue).patch(update_issue),
        )
        .route("/repos/{owner}/{repo}/issues/{number}/comments", post(add_comment))
        .route("/rate_limit", get(rate_limit))
        .with_state(Arc::clone(&log));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let tracker = GitHubTracker::new(&GitHubConfig {
        token: "ghp_test".into(),
        owner: "octo".into(),
        repo: "notes".into(),
        api_url: format!("http://{addr}"),
        timeout_secs: 5,
    })
    .unwrap();
    (tracker, log)
}

fn hits(log: &Log) -> Vec<Hit> {
    log.lock().unwrap().clone()
}

#[tokio::test]
async fn create_posts_draft_with_auth_headers() {
    let (tracker, log) = start().await;
    let draft = IssueDraft {
        title: "[REMINDER] Pay rent".into(),
        body: "body text".into(),
        labels: vec!["reminder".into(), "priority-high".into()],
    };

    let issue = tracker.create_issue(&draft).await.unwrap();
    assert_eq!(issue.number, 7);
    assert_eq!(issue.title, "[REMINDER] Pay rent");
    assert_eq!(issue.body.as_deref(), Some("body text"));
    assert_eq!(issue.label_names().collect::<Vec<_>>(), vec!["reminder", "priority-high"]);
    assert_eq!(issue.state, IssueState::Open);

    let hits = hits(&log);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].method, "POST");
    assert_eq!(hits[0].path, "/repos/octo/notes/issues");
    assert_eq!(hits[0].auth.as_deref(), Some("Bearer ghp_test"));
    assert_eq!(hits[0].api_version.as_deref(), Some("2022-11-28"));
    assert_eq!(
        hits[0].body,
        Some(json!({
            "title": "[REMINDER] Pay rent",
            "body": "body text",
            "labels": ["reminder", "priority-high"],
        }))
    );
}

#[tokio::test]
async fn list_sends_query_and_drops_pull_requests() {
    let (tracker, log) = start().await;
    let query = IssueQuery {
        state: StateFilter::All,
        labels: vec!["reminder".into(), "category-bills".into()],
        sort: IssueSort::Created,
        per_page: 25,
    };

    let issues = tracker.list_issues(&query).await.unwrap();
    let numbers: Vec<u64> = issues.iter().map(|i| i.number).collect();
    assert_eq!(numbers, vec![8, 3]);

    let hit = &hits(&log)[0];
    assert_eq!(hit.query.get("state").map(String::as_str), Some("all"));
    assert_eq!(hit.query.get("labels").map(String::as_str), Some("reminder,category-bills"));
    assert_eq!(hit.query.get("sort").map(String::as_str), Some("created"));
    assert_eq!(hit.query.get("per_page").map(String::as_str), Some("25"));
}

#[tokio::test]
async fn get_decodes_issue() {
    let (tracker, _log) = start().await;
    let issue = tracker.get_issue(42).await.unwrap();
    assert_eq!(issue.number, 42);
    assert_eq!(issue.body, None);
    assert_eq!(issue.html_url, "https://github.com/octo/notes/issues/42");
    assert!(issue.pull_request.is_none());
}

#[tokio::test]
async fn missing_issue_maps_to_not_found_with_message() {
    let (tracker, _log) = start().await;
    let err = tracker.get_issue(404).await.unwrap_err();
    assert!(err.is_not_found());
    match err {
        TrackerError::Status { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_is_kept_verbatim() {
    let (tracker, _log) = start().await;
    let err = tracker.get_issue(500).await.unwrap_err();
    assert!(!err.is_not_found());
    match err {
        TrackerError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream exploded");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_is_decode_error() {
    let (tracker, _log) = start().await;
    let err = tracker.get_issue(501).await.unwrap_err();
    assert!(matches!(err, TrackerError::Decode(_)));
}

#[tokio::test]
async fn close_sends_patch_with_state_only() {
    let (tracker, log) = start().await;
    let issue = tracker.update_issue(42, &IssueUpdate::close()).await.unwrap();
    assert_eq!(issue.state, IssueState::Closed);
    assert!(issue.closed_at.is_some());

    let hit = &hits(&log)[0];
    assert_eq!(hit.method, "PATCH");
    assert_eq!(hit.path, "/repos/octo/notes/issues/42");
    assert_eq!(hit.body, Some(json!({ "state": "closed" })));
}

#[tokio::test]
async fn comment_posts_body() {
    let (tracker, log) = start().await;
    tracker.add_comment(42, "✓ Reminder completed").await.unwrap();

    let hit = &hits(&log)[0];
    assert_eq!(hit.method, "POST");
    assert_eq!(hit.path, "/repos/octo/notes/issues/42/comments");
    assert_eq!(hit.body, Some(json!({ "body": "✓ Reminder completed" })));
}

#[tokio::test]
async fn rate_limit_reads_core_rate() {
    let (tracker, _log) = start().await;
    let rate = tracker.rate_limit().await.unwrap();
    assert_eq!(rate.limit, 5000);
    assert_eq!(rate.remaining, 4987);
    assert_eq!(rate.reset.timestamp(), 1764583200);
}

#[tokio::test]
async fn unreachable_host_is_http_error() {
    let tracker = GitHubTracker::new(&GitHubConfig {
        token: "ghp_test".into(),
        owner: "octo".into(),
        repo: "notes".into(),
        api_url: "http://127.0.0.1:1".into(),
        timeout_secs: 2,
    })
    .unwrap();
    let err = tracker.get_issue(1).await.unwrap_err();
    assert!(matches!(err, TrackerError::Http(_)));
}
