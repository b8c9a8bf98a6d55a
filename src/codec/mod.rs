use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::model::FormDefinition;

pub mod json;
pub mod xml;

// ============================================================================
// Interchange formats for form definitions
// ============================================================================

/// Export/import encoding chosen in the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Structured encoding (JSON)
    #[default]
    Json,
    /// Markup encoding (XML)
    Xml,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Xml => "xml",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Xml => "application/xml",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Format::Json => "JSON",
            Format::Xml => "XML",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Format> {
        ext.parse().ok()
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "xml" => Ok(Format::Xml),
            other => Err(format!("unknown format '{}' (expected json or xml)", other)),
        }
    }
}

pub fn encode(defn: &FormDefinition, format: Format) -> Result<String, FormError> {
    match format {
        Format::Json => json::encode(defn),
        Format::Xml => Ok(xml::encode(defn)),
    }
}

pub fn decode(text: &str, format: Format) -> Result<FormDefinition, FormError> {
    match format {
        Format::Json => json::decode(text),
        Format::Xml => xml::decode(text),
    }
}

/// Download name for an exported definition: `<formTitle>.<ext>`.
pub fn export_file_name(defn: &FormDefinition, format: Format) -> String {
    let stem: String = defn
        .form_title
        .trim()
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let stem = if stem.is_empty() { "form".to_string() } else { stem };
    format!("{}.{}", stem, format.extension())
}
