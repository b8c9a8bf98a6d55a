use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::trace::trace::TraceEvent;

/// JSON-lines event sink for form activity.
///
/// A sink that cannot be opened is disabled with a warning on stderr;
/// recording never fails the operation being recorded.
pub struct TraceLogger {
    sink: Option<(PathBuf, Mutex<File>)>,
}

impl TraceLogger {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self {
                sink: Some((path.to_path_buf(), Mutex::new(file))),
            },
            Err(e) => {
                eprintln!("Warning: could not open trace file '{}': {}", path.display(), e);
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.sink.as_ref().map(|(p, _)| p.as_path())
    }

    pub fn log(&self, event: &TraceEvent) {
        let Some((path, file)) = &self.sink else {
            return;
        };

        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Warning: failed to serialize trace event: {}", e);
                return;
            }
        };

        let written = match file.lock() {
            Ok(mut f) => writeln!(f, "{}", line),
            Err(e) => {
                eprintln!("Warning: trace logger lock poisoned: {}", e);
                return;
            }
        };
        if let Err(e) = written {
            eprintln!("Warning: failed to append to '{}': {}", path.display(), e);
        }
    }
}
