use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::model::field::{Field, FieldType};

/// A named, ordered list of fields. The unit of save, load, export and import.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormDefinition {
    #[serde(rename = "formTitle")]
    pub form_title: String,

    /// Order drives widget order and submission table columns
    pub fields: Vec<Field>,
}

impl FormDefinition {
    pub fn new(form_title: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            form_title: form_title.into(),
            fields,
        }
    }

    /// Reject empty and whitespace-only titles.
    pub fn validate_title(&self) -> Result<(), ValidationError> {
        if self.form_title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Checks run before a definition is saved or rendered.
    ///
    /// Field names key the submission record, so they must be present and
    /// unique.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_title()?;

        let mut seen = HashSet::new();
        for (index, field) in self.fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(ValidationError::EmptyFieldName { index });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(ValidationError::DuplicateFieldName(field.name.clone()));
            }
        }
        Ok(())
    }

    /// Dropdowns need at least one choice once they are rendered. Saving a
    /// definition with an empty dropdown is allowed.
    pub fn validate_choices(&self) -> Result<(), ValidationError> {
        match self
            .fields
            .iter()
            .find(|f| f.field_type == FieldType::Dropdown && f.choices().is_empty())
        {
            Some(f) => Err(ValidationError::MissingOptions(f.name.clone())),
            None => Ok(()),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}
