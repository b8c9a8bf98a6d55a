use crate::error::FormError;
use crate::model::FormDefinition;
use crate::storage::definitions::DefinitionStore;
use crate::storage::port::KeyValueStore;

/// Which view the user is on. The render view always carries its definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Builder,
    Render(FormDefinition),
}

impl View {
    /// Enter the render view, or fall back to the builder if nothing was handed over.
    pub fn open_render(definition: Option<FormDefinition>) -> View {
        match definition {
            Some(d) => View::Render(d),
            None => View::Builder,
        }
    }

    pub fn definition(&self) -> Option<&FormDefinition> {
        match self {
            View::Render(d) => Some(d),
            View::Builder => None,
        }
    }
}

/// Load a saved definition by title and open it. Unknown titles land on the builder.
pub fn open_existing<S: KeyValueStore>(
    store: &DefinitionStore<S>,
    title: &str,
) -> Result<View, FormError> {
    match store.load(title) {
        Ok(d) => Ok(View::Render(d)),
        Err(FormError::NotFound(_)) => Ok(View::Builder),
        Err(e) => Err(e),
    }
}
