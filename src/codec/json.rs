use crate::codec::Format;
use crate::error::FormError;
use crate::model::FormDefinition;

/// Structured encoding: `{"formTitle": .., "fields": [{"name", "type", "mandatory", "options"}]}`.
pub fn encode(defn: &FormDefinition) -> Result<String, FormError> {
    serde_json::to_string(defn).map_err(|e| FormError::parse(Format::Json, e.to_string()))
}

/// Missing keys, wrong value types and unknown field types all fail here.
pub fn decode(text: &str) -> Result<FormDefinition, FormError> {
    serde_json::from_str(text).map_err(|e| FormError::parse(Format::Json, e.to_string()))
}
