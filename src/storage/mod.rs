pub mod definitions;
pub mod port;
pub mod submissions;

pub use definitions::DefinitionStore;
pub use port::{FileStore, KeyValueStore, MemoryStore};
pub use submissions::SubmissionLog;
