//! The `REMINDER_METADATA` comment block embedded in issue bodies.
//!
//! Grammar:
//!
//! ```text
//! block  := "<!-- REMINDER_METADATA" NL line* "-->"
//! line   := key ": " value NL
//! ```
//!
//! The block ends at the first line that is exactly `-->`. Lines are split on
//! the first `": "`; keys and values are trimmed, unknown keys are ignored and
//! a repeated key overwrites the earlier one. [`parse_block`] either returns a
//! complete [`ReminderMetadata`] or a [`MetadataError`] naming what was wrong;
//! callers decide how to fall back.

use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashMap;

use super::types::Priority;

pub const OPEN_MARKER: &str = "<!-- REMINDER_METADATA";
pub const CLOSE_MARKER: &str = "-->";

/// Fields persisted in the metadata block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderMetadata {
    pub due_date: DateTime<Utc>,
    pub priority: Priority,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetadataError {
    #[error("issue has no body")]
    NoBody,

    #[error("metadata block not found")]
    MissingBlock,

    #[error("metadata block is not terminated")]
    Unterminated,

    #[error("metadata field {0} is missing")]
    MissingField(&'static str),

    #[error("metadata field {field} has invalid value {value:?}")]
    InvalidField { field: &'static str, value: String },
}

/// Format a timestamp the way the block stores it: `2025-12-01T09:00:00.000Z`.
/// Sub-millisecond instants get as many fractional digits as they need.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    let format = if ts.timestamp_subsec_nanos() % 1_000_000 == 0 {
        SecondsFormat::Millis
    } else {
        SecondsFormat::AutoSi
    };
    ts.to_rfc3339_opts(format, true)
}

impl ReminderMetadata {
    /// Render the block, including both markers. `category` is omitted when unset.
    pub fn to_block(&self) -> String {
        let mut out = String::with_capacity(160);
        out.push_str(OPEN_MARKER);
        out.push('\n');
        push_line(&mut out, "dueDate", &format_timestamp(&self.due_date));
        push_line(&mut out, "priority", self.priority.as_str());
        if let Some(category) = &self.category {
            push_line(&mut out, "category", category);
        }
        push_line(&mut out, "createdAt", &format_timestamp(&self.created_at));
        out.push_str(CLOSE_MARKER);
        out
    }
}

fn push_line(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push_str(": ");
    out.push_str(value);
    out.push('\n');
}

/// Locate the block's inner text (between the marker lines) inside `body`.
///
/// The open marker only counts when a line break follows it, so lookalikes
/// such as `<!-- REMINDER_METADATA_OLD` are skipped.
pub fn find_block(body: &str) -> Result<&str, MetadataError> {
    let inner = body
        .match_indices(OPEN_MARKER)
        .find_map(|(start, _)| {
            let rest = &body[start + OPEN_MARKER.len()..];
            rest.strip_prefix("\r\n")
                .or_else(|| rest.strip_prefix('\n'))
        })
        .ok_or(MetadataError::MissingBlock)?;

    let mut offset = 0;
    for line in inner.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == CLOSE_MARKER {
            return Ok(&inner[..offset]);
        }
        offset += line.len();
    }
    Err(MetadataError::Unterminated)
}

/// Parse the inner text of a block into metadata.
pub fn parse_fields(inner: &str) -> Result<ReminderMetadata, MetadataError> {
    let mut fields: HashMap<&str, &str> = HashMap::new();
    for line in inner.lines() {
        let Some((key, value)) = line.split_once(": ") else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        if !key.is_empty() && !value.is_empty() {
            fields.insert(key, value);
        }
    }

    let due_date = timestamp_field(&fields, "dueDate")?;
    let priority = {
        let raw = *fields
            .get("priority")
            .ok_or(MetadataError::MissingField("priority"))?;
        raw.parse::<Priority>()
            .map_err(|_| MetadataError::InvalidField {
                field: "priority",
                value: raw.to_string(),
            })?
    };
    let created_at = timestamp_field(&fields, "createdAt")?;
    let category = fields.get("category").map(|c| c.to_string());

    Ok(ReminderMetadata {
        due_date,
        priority,
        category,
        created_at,
    })
}

fn timestamp_field(
    fields: &HashMap<&str, &str>,
    field: &'static str,
) -> Result<DateTime<Utc>, MetadataError> {
    let raw = *fields.get(field).ok_or(MetadataError::MissingField(field))?;
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| MetadataError::InvalidField {
            field,
            value: raw.to_string(),
        })
}

/// Find and parse the metadata block in an issue body.
pub fn parse_block(body: Option<&str>) -> Result<ReminderMetadata, MetadataError> {
    let body = body.ok_or(MetadataError::NoBody)?;
    parse_fields(find_block(body)?)
}
