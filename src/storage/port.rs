use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::FormError;

// ============================================================================
// KeyValueStore trait — persistence seam for definitions and submissions
// ============================================================================

/// String-keyed, string-valued persistent storage. Synchronous get/set,
/// no transactions, no expiry.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, FormError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), FormError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, FormError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FormError> {
        (**self).set(key, value)
    }
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, FormError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FormError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key inside a directory.
///
/// Keys are form titles and may hold any character, so each file is named
/// by the SHA-1 digest of its key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, FormError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .map_err(|e| FormError::io(format!("create store dir {}", dir.display()), e))?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key_digest(key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, FormError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FormError::io(format!("read {}", path.display()), e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FormError> {
        let path = self.path_for(key);
        std::fs::write(&path, value)
            .map_err(|e| FormError::io(format!("write {}", path.display()), e))
    }
}

pub fn key_digest(key: &str) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}
