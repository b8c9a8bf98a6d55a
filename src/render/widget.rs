use chrono::NaiveDate;

use crate::model::{Field, FieldType};

/// Input control rendered for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    /// Free text
    Text,
    /// Numeric text
    Number,
    /// Single choice among the field's options
    Select { choices: Vec<String> },
    /// Calendar date, ISO `YYYY-MM-DD`
    Date,
}

impl Widget {
    pub fn for_field(field: &Field) -> Self {
        match field.field_type {
            FieldType::String => Widget::Text,
            FieldType::Number => Widget::Number,
            FieldType::Dropdown => Widget::Select {
                choices: field.choices(),
            },
            FieldType::Date => Widget::Date,
        }
    }

    /// The `type` attribute of the HTML input, `None` for a select.
    pub fn input_type(&self) -> Option<&'static str> {
        match self {
            Widget::Text => Some("text"),
            Widget::Number => Some("number"),
            Widget::Date => Some("date"),
            Widget::Select { .. } => None,
        }
    }

    pub fn choices(&self) -> &[String] {
        match self {
            Widget::Select { choices } => choices,
            _ => &[],
        }
    }

    /// Widget-level acceptance of a non-empty value.
    pub fn accept(&self, value: &str) -> Result<(), String> {
        match self {
            Widget::Text => Ok(()),
            // surrounding whitespace fails to parse and is refused
            Widget::Number => match value.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(()),
                _ => Err(format!("'{}' is not a number", value)),
            },
            Widget::Select { choices } => {
                if choices.iter().any(|c| c == value) {
                    Ok(())
                } else {
                    Err(format!(
                        "'{}' is not one of: {}",
                        value,
                        choices.join(", ")
                    ))
                }
            }
            Widget::Date => match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
                // chrono accepts unpadded months and days; only the canonical form passes
                Ok(date) if date.format("%Y-%m-%d").to_string() == value => Ok(()),
                _ => Err(format!("'{}' is not a YYYY-MM-DD date", value)),
            },
        }
    }
}

/// A field paired with its widget, in definition order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedField {
    pub name: String,
    pub widget: Widget,
    pub required: bool,
}

impl RenderedField {
    pub fn from_field(field: &Field) -> Self {
        Self {
            name: field.name.clone(),
            widget: Widget::for_field(field),
            required: field.mandatory,
        }
    }
}
