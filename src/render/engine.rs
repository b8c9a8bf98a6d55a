use std::collections::BTreeMap;

use crate::error::{FormError, ValidationError};
use crate::model::{FormDefinition, Submission, SubmissionValue};
use crate::render::display::SubmissionTable;
use crate::render::widget::RenderedField;
use crate::storage::port::KeyValueStore;
use crate::storage::submissions::SubmissionLog;
use crate::trace::{EventKind, TraceEvent, TraceLogger};

// ============================================================================
// RenderedForm — entry state for one definition
// ============================================================================

/// Widgets for a definition plus the values currently entered.
#[derive(Debug, Clone)]
pub struct RenderedForm {
    definition: FormDefinition,
    fields: Vec<RenderedField>,
    values: BTreeMap<String, String>,
}

impl RenderedForm {
    /// Build widgets for every field. Fails on definitions that could not be
    /// filled in (empty title, unnamed or duplicate fields, empty dropdowns).
    pub fn new(definition: FormDefinition) -> Result<Self, ValidationError> {
        definition.validate()?;
        definition.validate_choices()?;
        let fields = definition
            .fields
            .iter()
            .map(RenderedField::from_field)
            .collect();
        Ok(Self {
            definition,
            fields,
            values: BTreeMap::new(),
        })
    }

    pub fn definition(&self) -> &FormDefinition {
        &self.definition
    }

    pub fn title(&self) -> &str {
        &self.definition.form_title
    }

    pub fn fields(&self) -> &[RenderedField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&RenderedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Enter a value through the field's widget.
    ///
    /// An empty value clears the entry. A value the widget refuses leaves the
    /// current entry as it was.
    pub fn set_value(&mut self, name: &str, value: &str) -> Result<(), ValidationError> {
        let field = self
            .field(name)
            .ok_or_else(|| ValidationError::UnknownField(name.to_string()))?;

        if value.is_empty() {
            self.values.remove(name);
            return Ok(());
        }

        field
            .widget
            .accept(value)
            .map_err(|reason| ValidationError::InvalidValue {
                field: name.to_string(),
                reason,
            })?;
        self.values.insert(name.to_string(), value.to_string());
        Ok(())
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// First mandatory field, in definition order, that has no value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self
            .fields
            .iter()
            .find(|f| f.required && !self.values.contains_key(&f.name))
        {
            Some(f) => Err(ValidationError::MandatoryMissing {
                field: f.name.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Snapshot of the current values.
    pub fn snapshot(&self) -> Submission {
        Submission {
            values: self
                .values
                .iter()
                .map(|(k, v)| (k.clone(), SubmissionValue::Text(v.clone())))
                .collect(),
        }
    }
}

// ============================================================================
// FormSession — the render view: a form, its log, and the submit pipeline
// ============================================================================

pub struct FormSession<S: KeyValueStore> {
    form: RenderedForm,
    log: SubmissionLog<S>,
    submissions: Vec<Submission>,
}

impl<S: KeyValueStore> FormSession<S> {
    /// Render `definition` and load its existing submission log.
    pub fn open(definition: FormDefinition, storage: S) -> Result<Self, FormError> {
        let form = RenderedForm::new(definition)?;
        let log = SubmissionLog::new(storage);
        let submissions = log.load(form.title())?;
        Ok(Self {
            form,
            log,
            submissions,
        })
    }

    pub fn form(&self) -> &RenderedForm {
        &self.form
    }

    pub fn set_value(&mut self, name: &str, value: &str) -> Result<(), ValidationError> {
        self.form.set_value(name, value)
    }

    /// Every submission loaded or appended so far, oldest first.
    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// Validate, append a snapshot to the log, persist, then reset entries.
    ///
    /// A rejected submit appends nothing and keeps the entered values.
    pub fn submit(&mut self, tracer: &TraceLogger) -> Result<Submission, FormError> {
        if let Err(e) = self.form.validate() {
            tracer.log(
                &TraceEvent::now(EventKind::SubmissionRejected)
                    .with_title(self.form.title())
                    .with_reason(&e),
            );
            return Err(e.into());
        }

        let submission = self.form.snapshot();
        self.submissions = self.log.append(self.form.title(), submission.clone())?;
        self.form.clear();

        tracer.log(
            &TraceEvent::now(EventKind::SubmissionAppended)
                .with_title(self.form.title())
                .with_count(self.submissions.len()),
        );

        Ok(submission)
    }

    /// The "Last 10 Submissions" view.
    pub fn table(&self) -> SubmissionTable {
        SubmissionTable::build(self.form.definition(), &self.submissions)
    }

    pub fn into_storage(self) -> S {
        self.log.into_inner()
    }
}
