//! String key-value persistence contract and backends.
//!
//! The task store treats the persistence layer as an opaque asynchronous
//! `get`/`set` string store. [`FileKv`] is the production backend (one
//! file per key under a data directory); [`MemoryKv`] backs tests and
//! supports failure injection.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
#[cfg(any(test, feature = "test-util"))]
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;

/// Errors surfaced by the key-value persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum KvError {
    /// Reading a key failed.
    #[error("read of key {key:?} failed: {source}")]
    Read {
        /// Key that was being read.
        key: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing a key failed.
    #[error("write of key {key:?} failed: {source}")]
    Write {
        /// Key that was being written.
        key: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Asynchronous string key-value store.
///
/// The minimal contract the task store needs: fetch the value under a key
/// (absent keys are `None`, not an error) and overwrite the value under a
/// key. Both operations can fail.
pub trait KeyValue: Send + Sync {
    /// Reads the value stored under `key`, or `None` if absent.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, KvError>> + Send;

    /// Stores `value` under `key`, fully overwriting any previous value.
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), KvError>> + Send;
}

/// File-backed store: each key lives in its own file under a root
/// directory, as `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileKv {
    root: PathBuf,
}

impl FileKv {
    /// Creates a store rooted at `root`. The directory is created lazily
    /// on the first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValue for FileKv {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(KvError::Read {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        let wrap_err = |e| KvError::Write {
            key: key.to_string(),
            source: e,
        };
        tokio::fs::create_dir_all(&self.root).await.map_err(wrap_err)?;
        tokio::fs::write(self.path_for(key), value)
            .await
            .map_err(wrap_err)
    }
}

/// In-memory store for tests.
///
/// Cloning yields another handle onto the same shared map, so a test can
/// keep one handle to inspect state while the store under test holds the
/// other. With the `test-util` feature, reads and writes can also be made
/// to fail on demand.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    entries: Arc<RwLock<HashMap<String, String>>>,
    #[cfg(any(test, feature = "test-util"))]
    fail_reads: Arc<AtomicBool>,
    #[cfg(any(test, feature = "test-util"))]
    fail_writes: Arc<AtomicBool>,
}

impl MemoryKv {
    /// Creates a new, empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `get` fail until reset.
    #[cfg(any(test, feature = "test-util"))]
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent `set` fail until reset.
    #[cfg(any(test, feature = "test-util"))]
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Returns the raw stored value under `key`, bypassing failure
    /// injection. Test helper.
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    /// Seeds a value directly, bypassing failure injection. Test helper.
    pub async fn seed(&self, key: &str, value: &str) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }
}

impl KeyValue for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        #[cfg(any(test, feature = "test-util"))]
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(KvError::Read {
                key: key.to_string(),
                source: io::Error::other("injected read failure"),
            });
        }
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        #[cfg(any(test, feature = "test-util"))]
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(KvError::Write {
                key: key.to_string(),
                source: io::Error::other("injected write failure"),
            });
        }
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
