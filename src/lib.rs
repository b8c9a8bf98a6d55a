//! Form builder: define forms as ordered field lists, move them between
//! JSON and XML, render them as input widgets and keep a log of submissions.

pub mod cli;
pub mod codec;
pub mod editor;
pub mod error;
pub mod model;
pub mod navigation;
pub mod render;
pub mod storage;
pub mod trace;

pub use codec::Format;
pub use error::{FormError, ValidationError};
pub use model::{Field, FieldEdit, FieldType, FormDefinition, Submission, SubmissionValue};
