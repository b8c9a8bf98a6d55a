use std::fmt;

use crate::codec::Format;

/// Rejections raised before any state changes (blocking user-facing alerts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Form title is empty or whitespace-only
    EmptyTitle,

    /// A definition with this title is already saved
    DuplicateTitle(String),

    /// A field has no name (names are submission keys)
    EmptyFieldName { index: usize },

    /// Two fields share a name within one definition
    DuplicateFieldName(String),

    /// Dropdown field with no selectable choice
    MissingOptions(String),

    /// Field index out of range in the editor
    NoSuchField { index: usize, len: usize },

    /// Value set on a field the definition does not contain
    UnknownField(String),

    /// Widget refused the entered value
    InvalidValue { field: String, reason: String },

    /// Mandatory field left empty on submit
    MandatoryMissing { field: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyTitle => {
                write!(f, "Please enter a Form Title before generating the form")
            }
            ValidationError::DuplicateTitle(title) => write!(
                f,
                "Form with the title \"{}\" already exists! Please choose a different title",
                title
            ),
            ValidationError::EmptyFieldName { index } => {
                write!(f, "Field {} has no name", index)
            }
            ValidationError::DuplicateFieldName(name) => {
                write!(f, "Field name \"{}\" is used more than once", name)
            }
            ValidationError::MissingOptions(name) => {
                write!(f, "Dropdown field \"{}\" has no options", name)
            }
            ValidationError::NoSuchField { index, len } => {
                write!(f, "No field at index {} (form has {} fields)", index, len)
            }
            ValidationError::UnknownField(name) => {
                write!(f, "Form has no field named \"{}\"", name)
            }
            ValidationError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for \"{}\": {}", field, reason)
            }
            ValidationError::MandatoryMissing { field } => {
                write!(f, "Please fill out the mandatory field \"{}\"", field)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug)]
pub enum FormError {
    /// Input rejected; nothing was changed
    Validation(ValidationError),

    /// Text did not match the expected structure for its format
    Parse { format: Format, message: String },

    /// No saved definition under this title
    NotFound(String),

    /// Filesystem read/write failed
    Io { context: String, source: std::io::Error },

    /// A persisted value could not be read back
    Corrupt { key: String, source: serde_json::Error },
}

impl FormError {
    pub fn parse(format: Format, message: impl Into<String>) -> Self {
        FormError::Parse {
            format,
            message: message.into(),
        }
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        FormError::Io {
            context: context.into(),
            source,
        }
    }

    /// The validation kind, if this is a validation failure.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            FormError::Validation(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Validation(v) => write!(f, "{}", v),
            FormError::Parse { format, message } => {
                write!(f, "{} parse error: {}", format.label(), message)
            }
            FormError::NotFound(title) => write!(f, "No saved form titled \"{}\"", title),
            FormError::Io { context, source } => write!(f, "I/O error ({}): {}", context, source),
            FormError::Corrupt { key, source } => {
                write!(f, "Stored value for '{}' is corrupt: {}", key, source)
            }
        }
    }
}

impl std::error::Error for FormError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormError::Io { source, .. } => Some(source),
            FormError::Corrupt { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ValidationError> for FormError {
    fn from(v: ValidationError) -> Self {
        FormError::Validation(v)
    }
}
