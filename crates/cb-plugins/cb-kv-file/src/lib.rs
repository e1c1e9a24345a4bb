//! # cb-kv-file
//!
//! Local filesystem implementation of `KeyValueStore`: one file per key under
//! a root directory, whole-file overwrite on every `set`. This mirrors the
//! per-profile store the boards were designed against, so write failures
//! (quota, permissions) are logged and swallowed rather than surfaced.

use cb_core::traits::KeyValueStore;
use std::fs;
use std::path::{Path, PathBuf};

pub struct FileKvStore {
    root: PathBuf,
}

impl FileKvStore {
    /// Opens (creating if needed) a store rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Keys are already lowercase-dash identifiers; anything else is mapped
    /// to '_' so a key can never escape the root directory.
    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{safe}.json"))
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Some(value),
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(key, %err, "failed to read key, treating as absent");
                }
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = fs::write(self.path_for(key), value) {
            tracing::warn!(key, %err, "failed to persist key, value dropped");
        }
    }

    fn remove(&self, key: &str) {
        if let Err(err) = fs::remove_file(self.path_for(key)) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(key, %err, "failed to remove key");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileKvStore::new(dir.path()).unwrap();
            store.set("chat-bitcoin-messages", "[1,2,3]");
        }
        let store = FileKvStore::new(dir.path()).unwrap();
        assert_eq!(store.get("chat-bitcoin-messages").as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn remove_then_get_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::new(dir.path()).unwrap();
        store.set("theme-dark-mode", "true");
        store.remove("theme-dark-mode");
        assert_eq!(store.get("theme-dark-mode"), None);
        // Removing an absent key is a quiet no-op.
        store.remove("theme-dark-mode");
    }

    #[test]
    fn hostile_key_stays_inside_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::new(dir.path()).unwrap();
        store.set("../../etc/passwd", "nope");
        assert_eq!(store.get("../../etc/passwd").as_deref(), Some("nope"));
        assert!(dir.path().join(".._.._etc_passwd.json").exists());
    }
}
