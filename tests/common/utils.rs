use std::path::PathBuf;

use form_builder::model::{Field, FieldType, FormDefinition};

/// The "Contact" form: one mandatory string field.
pub fn contact_form() -> FormDefinition {
    FormDefinition::new(
        "Contact",
        vec![Field::new("Email", FieldType::String).mandatory(true)],
    )
}

/// A form using every field type.
pub fn survey_form() -> FormDefinition {
    FormDefinition::new(
        "Survey",
        vec![
            Field::new("Name", FieldType::String).mandatory(true),
            Field::new("Age", FieldType::Number),
            Field::new("Colour", FieldType::Dropdown)
                .mandatory(true)
                .with_options("Red, Green , Blue"),
            Field::new("Visited", FieldType::Date),
        ],
    )
}

/// Fresh, empty directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "form-builder-test-{}-{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
