pub mod definition;
pub mod field;
pub mod submission;

pub use definition::FormDefinition;
pub use field::{Field, FieldEdit, FieldType};
pub use submission::{Submission, SubmissionValue};
