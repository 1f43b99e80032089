use crate::tracker::TrackerError;

#[derive(Debug, thiserror::Error)]
pub enum ReminderError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("failed to {operation} {target}: {source}")]
    Tracker {
        operation: &'static str,
        target: String,
        #[source]
        source: TrackerError,
    },

    #[error("reminder #{number} received its completion comment but could not be closed: {source}")]
    PartialCompletion {
        number: u64,
        #[source]
        source: TrackerError,
    },
}

impl ReminderError {
    pub fn tracker(operation: &'static str, target: impl Into<String>, source: TrackerError) -> Self {
        Self::Tracker {
            operation,
            target: target.into(),
            source,
        }
    }

    /// `true` when the tracker reported that the item does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Tracker { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReminderError>;
