use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A stored value. Widgets only produce text; booleans and bare numbers
/// can still appear in logs written by other tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmissionValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl SubmissionValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, SubmissionValue::Text(t) if t.is_empty())
    }
}

impl fmt::Display for SubmissionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionValue::Bool(true) => f.write_str("True"),
            SubmissionValue::Bool(false) => f.write_str("False"),
            SubmissionValue::Number(n) => write!(f, "{}", n),
            SubmissionValue::Text(t) => f.write_str(t),
        }
    }
}

impl From<&str> for SubmissionValue {
    fn from(s: &str) -> Self {
        SubmissionValue::Text(s.to_string())
    }
}

impl From<String> for SubmissionValue {
    fn from(s: String) -> Self {
        SubmissionValue::Text(s)
    }
}

impl From<bool> for SubmissionValue {
    fn from(b: bool) -> Self {
        SubmissionValue::Bool(b)
    }
}

/// One submitted entry: field name to value. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission {
    pub values: BTreeMap<String, SubmissionValue>,
}

impl Submission {
    pub fn get(&self, field: &str) -> Option<&SubmissionValue> {
        self.values.get(field)
    }

    /// Table cell text: booleans as "True"/"False", absent or empty as "N/A".
    pub fn display_value(&self, field: &str) -> String {
        match self.values.get(field) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => "N/A".to_string(),
        }
    }
}

impl<K: Into<String>, V: Into<SubmissionValue>> FromIterator<(K, V)> for Submission {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Submission {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
