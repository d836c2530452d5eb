use ferrous_recursor_application::ports::{CacheSnapshot, CacheStore};
use ferrous_recursor_domain::DomainError;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::debug;

/// Cache document kept as a JSON object mapping each domain to
/// `{"address": ..., "expires_at": <RFC 3339>}`.
///
/// Saves write a sibling temp file and rename it over the document, so a
/// concurrent reader sees either the old or the new document in full.
pub struct JsonFileCacheStore {
    path: PathBuf,
}

impl JsonFileCacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn store_error(&self, action: &str, e: impl std::fmt::Display) -> DomainError {
        DomainError::CacheStore(format!(
            "failed to {} {}: {}",
            action,
            self.path.display(),
            e
        ))
    }
}

impl CacheStore for JsonFileCacheStore {
    fn load(&self) -> Result<CacheSnapshot, DomainError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No cache document, starting empty");
                return Ok(CacheSnapshot::new());
            }
            Err(e) => return Err(self.store_error("read", e)),
        };

        if contents.trim().is_empty() {
            return Ok(CacheSnapshot::new());
        }

        serde_json::from_str(&contents).map_err(|e| self.store_error("parse", e))
    }

    fn save(&self, snapshot: &CacheSnapshot) -> Result<(), DomainError> {
        let json =
            serde_json::to_vec_pretty(snapshot).map_err(|e| self.store_error("serialize", e))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp =
            tempfile::NamedTempFile::new_in(dir).map_err(|e| self.store_error("stage", e))?;
        tmp.write_all(&json)
            .and_then(|_| tmp.flush())
            .map_err(|e| self.store_error("write", e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.store_error("replace", e.error))?;

        debug!(
            path = %self.path.display(),
            entries = snapshot.len(),
            "Cache document written"
        );
        Ok(())
    }
}

/// Store that keeps the document in memory only.
#[derive(Default)]
pub struct InMemoryCacheStore {
    document: RwLock<CacheSnapshot>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: CacheSnapshot) -> Self {
        Self {
            document: RwLock::new(snapshot),
        }
    }
}

impl CacheStore for InMemoryCacheStore {
    fn load(&self) -> Result<CacheSnapshot, DomainError> {
        self.document
            .read()
            .map(|document| document.clone())
            .map_err(|_| DomainError::CacheStore("in-memory cache document poisoned".to_string()))
    }

    fn save(&self, snapshot: &CacheSnapshot) -> Result<(), DomainError> {
        let mut document = self
            .document
            .write()
            .map_err(|_| DomainError::CacheStore("in-memory cache document poisoned".to_string()))?;
        *document = snapshot.clone();
        Ok(())
    }
}
