use crate::error::{FormError, ValidationError};
use crate::model::FormDefinition;
use crate::storage::port::KeyValueStore;

/// Storage key holding the JSON array of saved definitions.
pub const SAVED_FORMS_KEY: &str = "savedForms";

/// Registry of saved form definitions, keyed by title.
pub struct DefinitionStore<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> DefinitionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    /// All saved definitions in save order.
    pub fn all(&self) -> Result<Vec<FormDefinition>, FormError> {
        match self.storage.get(SAVED_FORMS_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| FormError::Corrupt {
                key: SAVED_FORMS_KEY.to_string(),
                source,
            }),
            None => Ok(Vec::new()),
        }
    }

    pub fn contains(&self, title: &str) -> Result<bool, FormError> {
        Ok(self.all()?.iter().any(|d| d.form_title == title))
    }

    /// Append and persist a definition.
    ///
    /// The definition is validated before storage is read; an existing title
    /// is rejected with `DuplicateTitle` and leaves storage untouched.
    pub fn save(&mut self, defn: &FormDefinition) -> Result<(), FormError> {
        defn.validate()?;

        let mut saved = self.all()?;
        if saved.iter().any(|d| d.form_title == defn.form_title) {
            return Err(ValidationError::DuplicateTitle(defn.form_title.clone()).into());
        }

        saved.push(defn.clone());
        let raw = serde_json::to_string(&saved).map_err(|source| FormError::Corrupt {
            key: SAVED_FORMS_KEY.to_string(),
            source,
        })?;
        self.storage.set(SAVED_FORMS_KEY, &raw)
    }

    pub fn load(&self, title: &str) -> Result<FormDefinition, FormError> {
        self.all()?
            .into_iter()
            .find(|d| d.form_title == title)
            .ok_or_else(|| FormError::NotFound(title.to_string()))
    }

    /// Saved titles in save order, for selection lists.
    pub fn list(&self) -> Result<Vec<String>, FormError> {
        Ok(self.all()?.into_iter().map(|d| d.form_title).collect())
    }
}
