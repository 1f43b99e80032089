//! Reminder store: create, list, get and complete reminders on top of an
//! [`IssueTracker`].
//!
//! Every call goes straight to the tracker; nothing is cached and nothing is
//! retried.

use chrono::Utc;
use std::sync::Arc;

use super::codec::{self, category_label, priority_label, MARKER_LABEL};
use super::metadata::format_timestamp;
use super::types::{NewReminder, Reminder, ReminderFilters, SortBy, StatusFilter};
use crate::error::{ReminderError, Result};
use crate::tracker::{IssueQuery, IssueSort, IssueTracker, IssueUpdate, StateFilter};

/// Largest page GitHub serves in one request.
pub const MAX_PAGE_SIZE: u8 = 100;

#[derive(Clone)]
pub struct ReminderStore {
    tracker: Arc<dyn IssueTracker>,
}

impl ReminderStore {
    pub fn new(tracker: Arc<dyn IssueTracker>) -> Self {
        Self { tracker }
    }

    /// Validate, encode and submit a new reminder. Returns it as the tracker
    /// stored it.
    pub async fn create(&self, req: NewReminder) -> Result<Reminder> {
        let req = req.normalized();
        req.validate()?;
        tracing::debug!(title = %req.title, "creating reminder");

        let draft = codec::encode_reminder(&req);
        let issue = self
            .tracker
            .create_issue(&draft)
            .await
            .map_err(|e| ReminderError::tracker("create", format!("reminder {:?}", req.title), e))?;

        let reminder = codec::decode_issue(&issue);
        tracing::info!(issue_number = reminder.issue_number, "reminder created");
        Ok(reminder)
    }

    /// List reminders matching `filters`, sorted by `filters.sort_by` if set.
    pub async fn list(&self, filters: &ReminderFilters) -> Result<Vec<Reminder>> {
        let query = build_query(filters)?;
        tracing::debug!(labels = ?query.labels, state = query.state.as_str(), "listing reminders");

        let issues = self
            .tracker
            .list_issues(&query)
            .await
            .map_err(|e| ReminderError::tracker("list", "reminders", e))?;

        let mut reminders: Vec<Reminder> = issues.iter().map(codec::decode_issue).collect();
        if let Some(sort_by) = filters.sort_by {
            sort_reminders(&mut reminders, sort_by);
        }

        let degraded = reminders.iter().filter(|r| r.is_degraded()).count();
        tracing::info!(count = reminders.len(), degraded, "reminders retrieved");
        Ok(reminders)
    }

    pub async fn get(&self, number: u64) -> Result<Reminder> {
        tracing::debug!(issue_number = number, "getting reminder");
        let issue = self
            .tracker
            .get_issue(number)
            .await
            .map_err(|e| ReminderError::tracker("get", format!("reminder #{number}"), e))?;
        Ok(codec::decode_issue(&issue))
    }

    /// Post a completion comment, then close the issue.
    ///
    /// The two calls are not atomic. If the comment lands but the close fails
    /// the error is [`ReminderError::PartialCompletion`].
    pub async fn complete(&self, number: u64, comment: Option<&str>) -> Result<Reminder> {
        tracing::debug!(issue_number = number, has_comment = comment.is_some(), "completing reminder");

        let body = completion_comment(comment);
        self.tracker
            .add_comment(number, &body)
            .await
            .map_err(|e| ReminderError::tracker("comment on", format!("reminder #{number}"), e))?;

        let issue = self
            .tracker
            .update_issue(number, &IssueUpdate::close())
            .await
            .map_err(|source| {
                tracing::error!(issue_number = number, error = %source, "comment posted but close failed");
                ReminderError::PartialCompletion { number, source }
            })?;

        tracing::info!(issue_number = number, "reminder completed");
        Ok(codec::decode_issue(&issue))
    }
}

fn build_query(filters: &ReminderFilters) -> Result<IssueQuery> {
    let state = match filters.status {
        StatusFilter::Active => StateFilter::Open,
        StatusFilter::Completed => StateFilter::Closed,
        StatusFilter::All => StateFilter::All,
    };

    let mut labels = vec![MARKER_LABEL.to_string()];
    if let Some(priority) = filters.priority {
        labels.push(priority_label(priority));
    }
    if let Some(category) = &filters.category {
        labels.push(category_label(category));
    }

    let per_page = filters.limit.unwrap_or(MAX_PAGE_SIZE);
    if per_page == 0 || per_page > MAX_PAGE_SIZE {
        return Err(ReminderError::Validation(format!(
            "limit must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }

    Ok(IssueQuery {
        state,
        labels,
        sort: IssueSort::Created,
        per_page,
    })
}

fn completion_comment(comment: Option<&str>) -> String {
    let now = format_timestamp(&Utc::now());
    match comment.map(str::trim).filter(|c| !c.is_empty()) {
        Some(comment) => format!("✓ Completed: {comment}\n\n*Completed at: {now}*"),
        None => format!("✓ Reminder completed\n\n*Completed at: {now}*"),
    }
}

/// Stable in-place sort. Ties keep their input order.
pub fn sort_reminders(reminders: &mut [Reminder], sort_by: SortBy) {
    match sort_by {
        SortBy::DueDate => reminders.sort_by_key(|r| r.due_date),
        SortBy::Priority => reminders.sort_by_key(|r| r.priority),
        SortBy::Created => reminders.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}
