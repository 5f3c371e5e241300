use crate::error::AppError;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// String key/value storage with the semantics of a browser `Storage` object.
pub trait KeyValueStore: Send + Sync + Debug {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError>;

    /// Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), AppError>;

    fn clear(&self) -> Result<(), AppError>;

    fn keys(&self) -> Vec<String>;
}

fn lock(items: &Mutex<BTreeMap<String, String>>) -> MutexGuard<'_, BTreeMap<String, String>> {
    items.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Volatile storage that lives as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        lock(&self.items).get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        lock(&self.items).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), AppError> {
        lock(&self.items).remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        lock(&self.items).clear();
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        lock(&self.items).keys().cloned().collect()
    }
}

/// Storage persisted as a JSON object in a single file.
///
/// Every mutation rewrites the file, so the contents outlive the process.
/// A missing file starts empty; an unreadable one is logged and replaced on
/// the next write.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();
        let items = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!("Discarding malformed storage file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!("Opened storage {} with {} keys", path.display(), items.len());
        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> Result<(), AppError> {
        let text = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, text)?;
        Ok(())
    }

    /// Applies `change` to a copy, writes the copy and only then swaps it
    /// in. A failed write leaves memory matching the file.
    fn update<F>(&self, change: F) -> Result<(), AppError>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let mut items = lock(&self.items);
        let mut next = items.clone();
        if !change(&mut next) {
            return Ok(());
        }
        if let Err(e) = self.persist(&next) {
            warn!("Failed to write storage {}: {}", self.path.display(), e);
            return Err(e);
        }
        *items = next;
        Ok(())
    }
}

impl KeyValueStore for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        lock(&self.items).get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.update(|items| {
            items.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), AppError> {
        self.update(|items| items.remove(key).is_some())
    }

    fn clear(&self) -> Result<(), AppError> {
        self.update(|items| {
            items.clear();
            true
        })
    }

    fn keys(&self) -> Vec<String> {
        lock(&self.items).keys().cloned().collect()
    }
}
