#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use remindhub::reminder::store::ReminderStore;
use remindhub::tracker::{
    Issue, IssueDraft, IssueQuery, IssueState, IssueTracker, IssueUpdate, Label, TrackerError,
};
use std::sync::{Arc, Mutex};

/// Which tracker call should fail next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Create,
    List,
    Get,
    Update,
    Comment,
}

#[derive(Default)]
struct Inner {
    issues: Vec<Issue>,
    comments: Vec<(u64, String)>,
    calls: Vec<&'static str>,
    drafts: Vec<IssueDraft>,
    queries: Vec<IssueQuery>,
    fail_on: Option<FailOn>,
}

/// In-memory issue tracker. Numbers start at 1; listings come back newest first.
#[derive(Clone, Default)]
pub struct FakeTracker {
    inner: Arc<Mutex<Inner>>,
}

fn server_error(op: &str) -> TrackerError {
    TrackerError::Status {
        status: 500,
        message: format!("{op} exploded"),
    }
}

fn not_found() -> TrackerError {
    TrackerError::Status {
        status: 404,
        message: "Not Found".into(),
    }
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 20, 18, 30, 0).unwrap()
}

impl FakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> ReminderStore {
        ReminderStore::new(Arc::new(self.clone()))
    }

    pub fn fail_on(&self, op: FailOn) {
        self.inner.lock().unwrap().fail_on = Some(op);
    }

    /// Insert an issue directly, as if a human had created it on GitHub.
    pub fn insert_raw(&self, title: &str, body: Option<&str>, labels: &[&str], state: IssueState) -> u64 {
        let mut inner = self.inner.lock().unwrap();
        let number = inner.issues.len() as u64 + 1;
        inner.issues.push(Issue {
            number,
            title: title.to_string(),
            body: body.map(str::to_string),
            labels: labels.iter().map(|l| Label { name: l.to_string() }).collect(),
            state,
            created_at: fixed_time() + chrono::Duration::minutes(number as i64),
            closed_at: (state != IssueState::Open).then(fixed_time),
            html_url: format!("https://github.com/octo/notes/issues/{number}"),
            pull_request: None,
        });
        number
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn comments(&self) -> Vec<(u64, String)> {
        self.inner.lock().unwrap().comments.clone()
    }

    pub fn drafts(&self) -> Vec<IssueDraft> {
        self.inner.lock().unwrap().drafts.clone()
    }

    pub fn queries(&self) -> Vec<IssueQuery> {
        self.inner.lock().unwrap().queries.clone()
    }

    pub fn issue(&self, number: u64) -> Option<Issue> {
        self.inner
            .lock()
            .unwrap()
            .issues
            .iter()
            .find(|i| i.number == number)
            .cloned()
    }

    fn check(&self, inner: &mut Inner, op: FailOn, name: &'static str) -> Result<(), TrackerError> {
        inner.calls.push(name);
        if inner.fail_on == Some(op) {
            inner.fail_on = None;
            return Err(server_error(name));
        }
        Ok(())
    }
}

#[async_trait]
impl IssueTracker for FakeTracker {
    async fn create_issue(&self, draft: &IssueDraft) -> Result<Issue, TrackerError> {
        let mut inner = self.inner.lock().unwrap();
        self.check(&mut inner, FailOn::Create, "create")?;
        inner.drafts.push(draft.clone());

        let number = inner.issues.len() as u64 + 1;
        let issue = Issue {
            number,
            title: draft.title.clone(),
            body: Some(draft.body.clone()),
            labels: draft.labels.iter().map(|l| Label { name: l.clone() }).collect(),
            state: IssueState::Open,
            created_at: fixed_time() + chrono::Duration::minutes(number as i64),
            closed_at: None,
            html_url: format!("https://github.com/octo/notes/issues/{number}"),
            pull_request: None,
        };
        inner.issues.push(issue.clone());
        Ok(issue)
    }

    async fn list_issues(&self, query: &IssueQuery) -> Result<Vec<Issue>, TrackerError> {
        let mut inner = self.inner.lock().unwrap();
        self.check(&mut inner, FailOn::List, "list")?;
        inner.queries.push(query.clone());

        Ok(inner
            .issues
            .iter()
            .rev()
            .filter(|i| query.state.matches(i.state))
            .filter(|i| {
                query
                    .labels
                    .iter()
                    .all(|wanted| i.label_names().any(|name| name == wanted))
            })
            .take(query.per_page as usize)
            .cloned()
            .collect())
    }

    async fn get_issue(&self, number: u64) -> Result<Issue, TrackerError> {
        let mut inner = self.inner.lock().unwrap();
        self.check(&mut inner, FailOn::Get, "get")?;
        inner
            .issues
            .iter()
            .find(|i| i.number == number)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn update_issue(&self, number: u64, update: &IssueUpdate) -> Result<Issue, TrackerError> {
        let mut inner = self.inner.lock().unwrap();
        self.check(&mut inner, FailOn::Update, "update")?;
        let issue = inner
            .issues
            .iter_mut()
            .find(|i| i.number == number)
            .ok_or_else(not_found)?;

        if let Some(state) = update.state {
            issue.state = state;
            issue.closed_at = match state {
                IssueState::Open => None,
                _ => Some(fixed_time() + chrono::Duration::days(1)),
            };
        }
        if let Some(title) = &update.title {
            issue.title = title.clone();
        }
        if let Some(body) = &update.body {
            issue.body = Some(body.clone());
        }
        if let Some(labels) = &update.labels {
            issue.labels = labels.iter().map(|l| Label { name: l.clone() }).collect();
        }
        Ok(issue.clone())
    }

    async fn add_comment(&self, number: u64, body: &str) -> Result<(), TrackerError> {
        let mut inner = self.inner.lock().unwrap();
        self.check(&mut inner, FailOn::Comment, "comment")?;
        if !inner.issues.iter().any(|i| i.number == number) {
            return Err(not_found());
        }
        inner.comments.push((number, body.to_string()));
        Ok(())
    }
}
