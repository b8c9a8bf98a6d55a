pub mod display;
pub mod engine;
pub mod html;
pub mod widget;

pub use display::SubmissionTable;
pub use engine::{FormSession, RenderedForm};
pub use widget::{RenderedField, Widget};
