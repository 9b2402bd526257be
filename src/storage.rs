use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

/// Key holding the raw session token.
pub const TOKEN_KEY: &str = "auth_token";
/// Key holding the JSON-encoded user profile.
pub const USER_KEY: &str = "user_data";

// 1. SessionStorage Contract
/// SessionStorage
///
/// The durable key-value contract the session store persists into. It mirrors the
/// browser's local storage: string keys, string values, synchronous access.
/// Implementations use interior mutability so a single handle can be shared.
///
/// Swapping the file-backed implementation (FileStorage) for the in-memory one
/// (MemoryStorage) in tests requires no change in the session store.
pub trait SessionStorage: Send + Sync {
    /// Returns the stored value, or `None` when the key is absent.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), String>;
}

fn lock(entries: &Mutex<BTreeMap<String, String>>) -> MutexGuard<'_, BTreeMap<String, String>> {
    // A panic while holding the lock cannot leave a map half-written.
    entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// 2. The Durable Implementation
/// FileStorage
///
/// Keeps every entry in one JSON object on disk, rewritten on each mutation, so the
/// session survives restarts of the shell. The file is created lazily on first write.
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// open
    ///
    /// Loads the existing entries from `path`. A missing file yields an empty store;
    /// an unreadable or corrupt file is logged and also treated as empty, matching the
    /// behaviour of a browser whose storage was wiped.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();

        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Discarding corrupt session file");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Session file unreadable");
                BTreeMap::new()
            }
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| e.to_string())?;
            }
        }

        let raw = serde_json::to_string_pretty(entries).map_err(|e| e.to_string())?;
        // Write-then-rename keeps the previous file intact if the write is interrupted.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw).map_err(|e| e.to_string())?;
        fs::rename(&tmp, &self.path).map_err(|e| e.to_string())
    }
}

impl SessionStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        let mut entries = lock(&self.entries);
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        let mut entries = lock(&self.entries);
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.flush(&entries)
    }
}

// 3. The In-Memory Implementation (For Tests)
/// MemoryStorage
///
/// Volatile storage used by tests and by shells started without a session file.
/// `new_failing` simulates a storage backend that rejects every write.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
    should_fail: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_failing() -> Self {
        Self {
            entries: Mutex::default(),
            should_fail: true,
        }
    }

    /// Pre-populates an entry, bypassing the failure switch.
    pub fn with_item(self, key: &str, value: &str) -> Self {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        self
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        if self.should_fail {
            return Err("Mock Storage Error: write rejected".to_string());
        }
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        if self.should_fail {
            return Err("Mock Storage Error: write rejected".to_string());
        }
        lock(&self.entries).remove(key);
        Ok(())
    }
}

/// StorageState
///
/// The shared handle type the session store holds on to.
pub type StorageState = Arc<dyn SessionStorage>;
