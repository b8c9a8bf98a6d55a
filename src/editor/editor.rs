use std::path::{Path, PathBuf};

use crate::codec::{self, Format};
use crate::error::{FormError, ValidationError};
use crate::model::{Field, FieldEdit, FormDefinition};
use crate::storage::definitions::DefinitionStore;
use crate::storage::port::KeyValueStore;
use crate::trace::{EventKind, TraceEvent, TraceLogger};

/// Encoded definition ready to be written out as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub contents: String,
}

// ============================================================================
// FormEditor — the in-progress definition being built
// ============================================================================

/// Builder state: title, field rows and the selected file format.
#[derive(Debug, Clone, Default)]
pub struct FormEditor {
    title: String,
    fields: Vec<Field>,
    format: Format,
}

impl FormEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definition(definition: FormDefinition) -> Self {
        Self {
            title: definition.form_title,
            fields: definition.fields,
            format: Format::default(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn set_format(&mut self, format: Format) {
        self.format = format;
    }

    /// Append a default row (String, optional, no options). Returns its index.
    pub fn add_field(&mut self) -> usize {
        self.fields.push(Field::default());
        self.fields.len() - 1
    }

    pub fn edit_field(&mut self, index: usize, edit: FieldEdit) -> Result<(), ValidationError> {
        let len = self.fields.len();
        let field = self
            .fields
            .get_mut(index)
            .ok_or(ValidationError::NoSuchField { index, len })?;
        field.apply(edit);
        Ok(())
    }

    pub fn remove_field(&mut self, index: usize) -> Result<Field, ValidationError> {
        if index >= self.fields.len() {
            return Err(ValidationError::NoSuchField {
                index,
                len: self.fields.len(),
            });
        }
        Ok(self.fields.remove(index))
    }

    pub fn definition(&self) -> FormDefinition {
        FormDefinition::new(self.title.clone(), self.fields.clone())
    }

    /// Validate and save the definition, returning it for the render view.
    ///
    /// An empty title is rejected before the store is consulted; a title
    /// already in the store is rejected and the store is left as it was.
    pub fn generate<S: KeyValueStore>(
        &self,
        store: &mut DefinitionStore<S>,
        tracer: &TraceLogger,
    ) -> Result<FormDefinition, FormError> {
        let definition = self.definition();
        let saved = definition
            .validate_title()
            .map_err(FormError::from)
            .and_then(|()| store.save(&definition));

        match saved {
            Ok(()) => {
                tracer.log(
                    &TraceEvent::now(EventKind::DefinitionSaved)
                        .with_title(&definition.form_title)
                        .with_count(definition.fields.len()),
                );
                Ok(definition)
            }
            Err(e) => {
                tracer.log(
                    &TraceEvent::now(EventKind::DefinitionRejected)
                        .with_title(&definition.form_title)
                        .with_reason(&e),
                );
                Err(e)
            }
        }
    }

    /// Encode the definition in the selected format.
    pub fn export(&self) -> Result<ExportFile, FormError> {
        let definition = self.definition();
        Ok(ExportFile {
            file_name: codec::export_file_name(&definition, self.format),
            mime_type: self.format.mime_type(),
            contents: codec::encode(&definition, self.format)?,
        })
    }

    /// Write the export into `dir`, returning the file path.
    pub fn export_to_dir(&self, dir: &Path, tracer: &TraceLogger) -> Result<PathBuf, FormError> {
        let file = self.export()?;
        let path = dir.join(&file.file_name);
        std::fs::write(&path, &file.contents)
            .map_err(|e| FormError::io(format!("write {}", path.display()), e))?;

        tracer.log(
            &TraceEvent::now(EventKind::Exported)
                .with_title(&self.title)
                .with_format(self.format)
                .with_count(self.fields.len()),
        );
        Ok(path)
    }

    /// Replace title and fields with a decoded definition.
    ///
    /// All-or-nothing: on a parse failure the editor is unchanged.
    pub fn import(&mut self, text: &str, tracer: &TraceLogger) -> Result<(), FormError> {
        let definition = codec::decode(text, self.format)?;
        tracer.log(
            &TraceEvent::now(EventKind::Imported)
                .with_title(&definition.form_title)
                .with_format(self.format)
                .with_count(definition.fields.len()),
        );
        self.title = definition.form_title;
        self.fields = definition.fields;
        Ok(())
    }

    pub fn import_file(&mut self, path: &Path, tracer: &TraceLogger) -> Result<(), FormError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| FormError::io(format!("read {}", path.display()), e))?;
        self.import(&text, tracer)
    }
}
