// In-memory attribute backend for tests

use super::store::AttributeBackend;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Backend whose per-path behaviour is scripted.
#[derive(Default)]
pub struct ScriptedBackend {
    pub contents: RefCell<HashMap<PathBuf, String>>,
    pub failures: HashMap<PathBuf, io::ErrorKind>,
    pub write_log: RefCell<Vec<PathBuf>>,
}

impl ScriptedBackend {
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        self.contents
            .borrow_mut()
            .insert(path.as_ref().to_path_buf(), content.to_string());
        self
    }

    pub fn failing(mut self, path: impl AsRef<Path>, kind: io::ErrorKind) -> Self {
        self.failures.insert(path.as_ref().to_path_buf(), kind);
        self
    }
}

impl AttributeBackend for ScriptedBackend {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        if let Some(kind) = self.failures.get(path) {
            return Err(io::Error::from(*kind));
        }
        self.contents
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn write_str(&self, path: &Path, value: &str) -> io::Result<()> {
        self.write_log.borrow_mut().push(path.to_path_buf());
        if let Some(kind) = self.failures.get(path) {
            return Err(io::Error::from(*kind));
        }
        let mut contents = self.contents.borrow_mut();
        match contents.get_mut(path) {
            Some(slot) => {
                *slot = value.to_string();
                Ok(())
            }
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.contents.borrow().contains_key(path) || self.failures.contains_key(path)
    }
}
