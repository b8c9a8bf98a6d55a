use crate::error::FormError;
use crate::model::Submission;
use crate::storage::port::KeyValueStore;

/// Entries shown under "Last 10 Submissions".
pub const DISPLAY_LIMIT: usize = 10;

/// Append-only submission history, one log per form title.
pub struct SubmissionLog<S: KeyValueStore> {
    storage: S,
}

pub fn log_key(form_title: &str) -> String {
    format!("submissions:{}", form_title)
}

impl<S: KeyValueStore> SubmissionLog<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Every submission for `form_title`, oldest first.
    pub fn load(&self, form_title: &str) -> Result<Vec<Submission>, FormError> {
        let key = log_key(form_title);
        match self.storage.get(&key)? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|source| FormError::Corrupt { key, source })
            }
            None => Ok(Vec::new()),
        }
    }

    /// Append one entry and persist. Returns the full log after the append.
    pub fn append(
        &mut self,
        form_title: &str,
        submission: Submission,
    ) -> Result<Vec<Submission>, FormError> {
        let key = log_key(form_title);
        let mut entries = self.load(form_title)?;
        entries.push(submission);

        let raw = serde_json::to_string(&entries)
            .map_err(|source| FormError::Corrupt { key: key.clone(), source })?;
        self.storage.set(&key, &raw)?;
        Ok(entries)
    }

    /// The trailing `limit` entries, most recent last.
    pub fn recent(&self, form_title: &str, limit: usize) -> Result<Vec<Submission>, FormError> {
        Ok(tail(self.load(form_title)?, limit))
    }
}

pub fn tail<T>(mut entries: Vec<T>, limit: usize) -> Vec<T> {
    let skip = entries.len().saturating_sub(limit);
    entries.drain(..skip);
    entries
}
