pub mod editor;

pub use editor::{ExportFile, FormEditor};
