use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::codec::Format;

/// What happened to a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    DefinitionSaved,
    DefinitionRejected,
    Exported,
    Imported,
    SubmissionAppended,
    SubmissionRejected,
}

#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub event: EventKind,

    pub form_title: Option<String>,
    pub format: Option<Format>,

    /// Field count for definitions, log length for submissions
    pub count: Option<usize>,
    pub reason: Option<String>,
}

impl TraceEvent {
    pub fn now(event: EventKind) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            event,
            form_title: None,
            format: None,
            count: None,
            reason: None,
        }
    }

    pub fn with_title(mut self, title: impl ToString) -> Self {
        self.form_title = Some(title.to_string());
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_reason(mut self, reason: impl ToString) -> Self {
        self.reason = Some(reason.to_string());
        self
    }
}
