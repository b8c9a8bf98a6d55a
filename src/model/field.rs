use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Field — one row of the form builder
// ============================================================================

/// Field type; decides which widget is rendered and how values are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FieldType {
    #[default]
    String,
    Number,
    Dropdown,
    Date,
}

impl FieldType {
    pub const ALL: [FieldType; 4] = [
        FieldType::String,
        FieldType::Number,
        FieldType::Dropdown,
        FieldType::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "String",
            FieldType::Number => "Number",
            FieldType::Dropdown => "Dropdown",
            FieldType::Date => "Date",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    /// Exact match on the names the builder writes out.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown field type '{}'", s))
    }
}

/// A single form field as defined in the builder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Field {
    /// Display label and submission key
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    pub mandatory: bool,

    /// Comma-separated choices; only read for Dropdown fields
    #[serde(default)]
    pub options: String,
}

/// One attribute change applied to a field in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Name(String),
    Type(FieldType),
    Mandatory(bool),
    Options(String),
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            ..Self::default()
        }
    }

    pub fn mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = mandatory;
        self
    }

    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }

    pub fn apply(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::Name(name) => self.name = name,
            FieldEdit::Type(t) => self.field_type = t,
            FieldEdit::Mandatory(m) => self.mandatory = m,
            FieldEdit::Options(o) => self.options = o,
        }
    }

    /// Dropdown choices: comma-split, trimmed, empties dropped.
    pub fn choices(&self) -> Vec<String> {
        parse_options(&self.options)
    }
}

pub fn parse_options(options: &str) -> Vec<String> {
    options
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
