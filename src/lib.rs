//! Reminders stored as GitHub Issues.
//!
//! remindhub keeps each reminder in a GitHub Issue: the title carries a
//! `[REMINDER]` tag, labels carry the `reminder` marker plus priority and
//! category, and the body embeds a small metadata block alongside a
//! human-readable rendering. Issues are decoded back best-effort, so
//! hand-edited issues still load.
//!
//! ```text
//! <!-- REMINDER_METADATA
//! dueDate: 2025-12-01T09:00:00.000Z
//! priority: high
//! category: bills
//! createdAt: 2025-11-20T18:30:00.000Z
//! -->
//! ```
//!
//! # Architecture
//!
//! - **Mapping**: [`reminder::codec`] encodes and decodes issues,
//!   [`reminder::metadata`] owns the embedded block grammar
//! - **Store**: [`reminder::store::ReminderStore`] composes the mapping with an
//!   [`tracker::IssueTracker`]
//! - **Tracker**: [`tracker::github::GitHubTracker`] over the GitHub REST API
//! - **Surfaces**: MCP tools ([`tools`]), REST API ([`api`]), CLI ([`cli`]),
//!   wired together in [`server`]
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`error`]: Store error type
//! - [`reminder`]: Reminder types, issue mapping and the store facade
//! - [`tracker`]: Issue tracker trait and the GitHub client

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod reminder;
pub mod server;
pub mod tools;
pub mod tracker;
