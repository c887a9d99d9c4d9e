use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use crate::error::RepositoryError;
use crate::models::location::LocationRecord;

/// Store for user-saved locations. Records go in and out by value; the
/// derivation code never talks to storage itself.
pub trait LocationRepository: Send + Sync {
    fn list(&self) -> Result<Vec<LocationRecord>, RepositoryError>;
    fn get(&self, id: &str) -> Result<Option<LocationRecord>, RepositoryError>;
    /// Inserts, or replaces the record with the same id in place.
    fn save(&self, record: LocationRecord) -> Result<(), RepositoryError>;
    /// Returns whether a record was removed.
    fn remove(&self, id: &str) -> Result<bool, RepositoryError>;
}

/// Insertion-ordered in-memory store.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    records: RwLock<Vec<LocationRecord>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_records(records: Vec<LocationRecord>) -> Self {
        Self { records: RwLock::new(records) }
    }

    fn snapshot(&self) -> Result<Vec<LocationRecord>, RepositoryError> {
        self.records.read().map(|r| r.clone()).map_err(|_| RepositoryError::Poisoned)
    }

    fn replace_all(&self, records: Vec<LocationRecord>) -> Result<(), RepositoryError> {
        *self.records.write().map_err(|_| RepositoryError::Poisoned)? = records;
        Ok(())
    }
}

impl LocationRepository for InMemoryRepository {
    fn list(&self) -> Result<Vec<LocationRecord>, RepositoryError> {
        self.snapshot()
    }

    fn get(&self, id: &str) -> Result<Option<LocationRecord>, RepositoryError> {
        let records = self.records.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    fn save(&self, record: LocationRecord) -> Result<(), RepositoryError> {
        let record = record.persistable();
        let mut records = self.records.write().map_err(|_| RepositoryError::Poisoned)?;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        Ok(())
    }

    fn remove(&self, id: &str) -> Result<bool, RepositoryError> {
        let mut records = self.records.write().map_err(|_| RepositoryError::Poisoned)?;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() != before)
    }
}

/// In-memory store mirrored to a pretty-printed JSON file after every write.
///
/// The file is replaced atomically (temp file + rename). A write that fails
/// to reach disk is undone in memory as well.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    inner: InMemoryRepository,
    /// Serialises mutate-then-flush so a rollback never drops another write
    writes: Mutex<()>,
}

impl JsonFileRepository {
    /// Loads `path` if it exists, otherwise starts empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref().to_path_buf();
        let records = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Vec::new()
        };
        tracing::info!(path = %path.display(), count = records.len(), "saved locations loaded");
        Ok(Self {
            path,
            inner: InMemoryRepository::with_records(records),
            writes: Mutex::new(()),
        })
    }

    fn flush(&self) -> Result<(), RepositoryError> {
        let records = self.inner.snapshot()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(&records)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Applies `change` in memory, then flushes; restores the previous
    /// records if the flush fails.
    fn write_through<T>(
        &self,
        change: impl FnOnce(&InMemoryRepository) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let _guard = self.writes.lock().map_err(|_| RepositoryError::Poisoned)?;
        let before = self.inner.snapshot()?;
        let out = change(&self.inner)?;
        if let Err(e) = self.flush() {
            tracing::error!(path = %self.path.display(), error = %e, "saved locations not written, rolling back");
            self.inner.replace_all(before)?;
            return Err(e);
        }
        Ok(out)
    }
}

impl LocationRepository for JsonFileRepository {
    fn list(&self) -> Result<Vec<LocationRecord>, RepositoryError> {
        self.inner.list()
    }

    fn get(&self, id: &str) -> Result<Option<LocationRecord>, RepositoryError> {
        self.inner.get(id)
    }

    fn save(&self, record: LocationRecord) -> Result<(), RepositoryError> {
        self.write_through(|inner| inner.save(record))
    }

    fn remove(&self, id: &str) -> Result<bool, RepositoryError> {
        if self.inner.get(id)?.is_none() {
            return Ok(false);
        }
        self.write_through(|inner| inner.remove(id))
    }
}
