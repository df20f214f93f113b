//! Local persistence: a tiny key-value store of JSON documents, plus the
//! form-state and history views built on top of it.

use crate::constants::{DEFAULT_HISTORY_CAPACITY, FORM_STATE_KEY, HISTORY_KEY};
use crate::models::{HistoryRecord, RequestPatch, RequestState};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

/// Fixed string keys mapped to `<key>.json` files in one directory
#[derive(Clone, Debug)]
pub struct KvStore {
    dir: PathBuf,
}

impl KvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        KvStore { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Ensure the store directory exists
    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)
                .with_context(|| format!("creating {}", self.dir.display()))?;
        }
        Ok(())
    }

    /// Read a value, `None` if the key was never written
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let value = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(value))
    }

    /// Write a value, replacing the previous document atomically
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.ensure_dir()?;
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        let content = serde_json::to_string_pretty(value)?;
        fs::write(&tmp, content).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &path).with_context(|| format!("replacing {}", path.display()))?;
        Ok(())
    }
}

/// Read a key, treating unreadable documents as absent
fn load_or_default<T: DeserializeOwned + Default>(kv: &KvStore, key: &str) -> T {
    match kv.read(key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding unreadable stored state");
            T::default()
        }
    }
}

/// The persisted request form
pub struct FormStore {
    kv: KvStore,
    current: RequestState,
}

impl FormStore {
    pub fn load(kv: KvStore) -> Self {
        let current = load_or_default(&kv, FORM_STATE_KEY);
        FormStore { kv, current }
    }

    pub fn get(&self) -> &RequestState {
        &self.current
    }

    /// Merge a patch and persist the result.
    ///
    /// The in-memory state is updated even if the write fails.
    pub fn set(&mut self, patch: RequestPatch) -> Result<()> {
        self.current.apply(patch);
        self.kv.write(FORM_STATE_KEY, &self.current)
    }
}

/// The last few completed requests, oldest first
pub struct HistoryStore {
    kv: KvStore,
    records: VecDeque<HistoryRecord>,
    capacity: usize,
}

impl HistoryStore {
    pub fn load(kv: KvStore) -> Self {
        Self::with_capacity(kv, DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(kv: KvStore, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let stored: Vec<HistoryRecord> = load_or_default(&kv, HISTORY_KEY);
        let mut records: VecDeque<HistoryRecord> = stored.into();
        // A smaller capacity than the one the file was written with
        while records.len() > capacity {
            records.pop_front();
        }
        HistoryStore { kv, records, capacity }
    }

    /// Add a record at the end, evicting the oldest once full, then persist
    pub fn append(&mut self, record: HistoryRecord) -> Result<()> {
        if self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
        self.kv.write(HISTORY_KEY, &self.records)
    }

    /// Get a record by index (0 = oldest)
    pub fn get(&self, index: usize) -> Option<&HistoryRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
