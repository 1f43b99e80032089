//! GitHub Issues implementation of [`IssueTracker`].
//!
//! Talks to the GitHub REST API (`/repos/{owner}/{repo}/issues`) with a
//! bearer token. The base URL comes from config so the same client works
//! against GitHub Enterprise or a local fake.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Issue, IssueDraft, IssueQuery, IssueTracker, IssueUpdate, TrackerError};
use crate::config::GitHubConfig;

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("remindhub/", env!("CARGO_PKG_VERSION"));

/// GitHub REST client scoped to one repository.
pub struct GitHubTracker {
    http: reqwest::Client,
    api_url: Url,
    owner: String,
    repo: String,
}

/// Core API rate limit as reported by `GET /rate_limit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RateLimitResponse {
    rate: RateLimitRaw,
}

#[derive(Deserialize)]
struct RateLimitRaw {
    limit: u64,
    remaining: u64,
    reset: i64,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

impl GitHubTracker {
    /// Build a client from validated config.
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .context("GitHub token contains invalid header characters")?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        let api_url = Url::parse(&config.api_url)
            .with_context(|| format!("invalid GitHub API URL: {}", config.api_url))?;
        anyhow::ensure!(
            !api_url.cannot_be_a_base(),
            "invalid GitHub API URL: {}",
            config.api_url
        );

        tracing::info!(owner = %config.owner, repo = %config.repo, "GitHub tracker ready");

        Ok(Self {
            http,
            api_url,
            owner: config.owner.clone(),
            repo: config.repo.clone(),
        })
    }

    /// `owner/repo` this client is bound to.
    pub fn full_repo(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Fetch the core rate limit for the authenticated token.
    pub async fn rate_limit(&self) -> Result<RateLimit, TrackerError> {
        let url = self.url("rate_limit");
        let raw: RateLimitResponse = self.send(self.http.get(url)).await?;
        let reset = DateTime::from_timestamp(raw.rate.reset, 0).unwrap_or_else(Utc::now);
        Ok(RateLimit {
            limit: raw.rate.limit,
            remaining: raw.rate.remaining,
            reset,
        })
    }

    fn url(&self, path: &str) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            segments.extend(path.split('/'));
        }
        url
    }

    fn issues_url(&self, suffix: &str) -> Url {
        let path = if suffix.is_empty() {
            format!("repos/{}/{}/issues", self.owner, self.repo)
        } else {
            format!("repos/{}/{}/issues/{suffix}", self.owner, self.repo)
        };
        self.url(&path)
    }

    /// Send a request and decode a JSON response, mapping non-2xx statuses
    /// to [`TrackerError::Status`].
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, TrackerError> {
        let text = self.send_raw(request).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn send_raw(&self, request: reqwest::RequestBuilder) -> Result<String, TrackerError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.message)
                .unwrap_or_else(|_| text.clone());
            tracing::warn!(status = status.as_u16(), %message, "GitHub request failed");
            return Err(TrackerError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(text)
    }
}

#[async_trait]
impl IssueTracker for GitHubTracker {
    async fn create_issue(&self, draft: &IssueDraft) -> Result<Issue, TrackerError> {
        tracing::debug!(title = %draft.title, "creating GitHub issue");
        let request = self.http.post(self.issues_url("")).json(draft);
        let issue: Issue = self.send(request).await?;
        tracing::info!(issue_number = issue.number, "GitHub issue created");
        Ok(issue)
    }

    async fn list_issues(&self, query: &IssueQuery) -> Result<Vec<Issue>, TrackerError> {
        let mut url = self.issues_url("");
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("state", query.state.as_str());
            if !query.labels.is_empty() {
                pairs.append_pair("labels", &query.labels.join(","));
            }
            pairs.append_pair("sort", query.sort.as_str());
            pairs.append_pair("per_page", &query.per_page.to_string());
        }

        tracing::debug!(%url, "listing GitHub issues");
        let issues: Vec<Issue> = self.send(self.http.get(url)).await?;

        let issues: Vec<Issue> = issues
            .into_iter()
            .filter(|i| i.pull_request.is_none())
            .collect();
        tracing::info!(count = issues.len(), "GitHub issues retrieved");
        Ok(issues)
    }

    async fn get_issue(&self, number: u64) -> Result<Issue, TrackerError> {
        tracing::debug!(issue_number = number, "getting GitHub issue");
        let url = self.issues_url(&number.to_string());
        self.send(self.http.get(url)).await
    }

    async fn update_issue(&self, number: u64, update: &IssueUpdate) -> Result<Issue, TrackerError> {
        tracing::debug!(issue_number = number, "updating GitHub issue");
        let url = self.issues_url(&number.to_string());
        let issue: Issue = self
            .send(self.http.request(Method::PATCH, url).json(update))
            .await?;
        tracing::info!(issue_number = number, state = issue.state.as_str(), "GitHub issue updated");
        Ok(issue)
    }

    async fn add_comment(&self, number: u64, body: &str) -> Result<(), TrackerError> {
        tracing::debug!(issue_number = number, "commenting on GitHub issue");
        let url = self.issues_url(&format!("{number}/comments"));
        self.send_raw(self.http.post(url).json(&CommentBody { body }))
            .await?;
        Ok(())
    }
}
