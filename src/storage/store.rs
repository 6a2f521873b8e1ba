//! In-memory record store
//!
//! Holds records in a `BTreeMap` keyed by id behind Tokio's async RwLock.
//! When a data directory is configured, the full collection is mirrored to
//! `records.json` after every insert and reloaded on open.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::repository::WeatherRepository;
use crate::storage::types::{NewWeatherRecord, StoreStats, WeatherRecord};

/// Configuration for the record store
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    /// Directory for the snapshot file; `None` keeps everything in memory
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
        }
    }

    /// Get path to the snapshot file
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|dir| dir.join("records.json"))
    }
}

/// Mutable store state, guarded as a unit so id assignment and insertion stay atomic
#[derive(Debug)]
struct StoreState {
    records: BTreeMap<u64, WeatherRecord>,
    next_id: u64,
}

impl StoreState {
    fn empty() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn from_records(records: Vec<WeatherRecord>) -> StorageResult<Self> {
        let mut state = Self::empty();
        for record in records {
            let id = record.id;
            if id == 0 {
                return Err(StorageError::Corruption("record with id 0".to_string()));
            }
            if state.records.insert(id, record).is_some() {
                return Err(StorageError::Corruption(format!("duplicate id {}", id)));
            }
            let after = id
                .checked_add(1)
                .ok_or_else(|| StorageError::Corruption(format!("id {} out of range", id)))?;
            state.next_id = state.next_id.max(after);
        }
        Ok(state)
    }
}

/// Record store backed by memory with an optional JSON snapshot
pub struct MemoryStore {
    state: RwLock<StoreState>,
    snapshot_path: Option<PathBuf>,
}

impl MemoryStore {
    /// Create a store that never touches the filesystem
    pub fn in_memory() -> Self {
        Self {
            state: RwLock::new(StoreState::empty()),
            snapshot_path: None,
        }
    }

    /// Open a store, loading the snapshot file if one exists
    pub fn open(config: &StorageConfig) -> StorageResult<Self> {
        let Some(path) = config.snapshot_path() else {
            return Ok(Self::in_memory());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let records = load_snapshot(&path)?;
        let state = StoreState::from_records(records)?;
        tracing::info!(
            path = %path.display(),
            records = state.records.len(),
            next_id = state.next_id,
            "Opened record store"
        );

        Ok(Self {
            state: RwLock::new(state),
            snapshot_path: Some(path),
        })
    }
}

#[async_trait]
impl WeatherRepository for MemoryStore {
    async fn insert(&self, record: NewWeatherRecord) -> StorageResult<WeatherRecord> {
        if let Some(key) = record.reserved_field() {
            return Err(StorageError::InvalidRecord(format!(
                "payload field '{}' is reserved",
                key
            )));
        }

        let mut state = self.state.write().await;

        let id = state.next_id;
        let next_id = id
            .checked_add(1)
            .ok_or_else(|| StorageError::Corruption("id space exhausted".to_string()))?;
        let stored = record.with_id(id);
        state.records.insert(id, stored.clone());

        if let Some(ref path) = self.snapshot_path {
            let records: Vec<&WeatherRecord> = state.records.values().collect();
            if let Err(e) = save_snapshot(path, &records) {
                // Keep memory and disk consistent: the insert did not happen.
                state.records.remove(&id);
                return Err(e);
            }
        }

        state.next_id = next_id;
        tracing::debug!(id, city = %stored.city, date = %stored.date, "Inserted record");
        Ok(stored)
    }

    async fn find_by_id(&self, id: u64) -> Option<WeatherRecord> {
        let state = self.state.read().await;
        state.records.get(&id).cloned()
    }

    async fn list_all(&self) -> Vec<WeatherRecord> {
        let state = self.state.read().await;
        state.records.values().cloned().collect()
    }

    async fn stats(&self) -> StoreStats {
        let state = self.state.read().await;
        let cities: HashSet<String> = state
            .records
            .values()
            .map(|r| r.city.to_lowercase())
            .collect();

        StoreStats {
            record_count: state.records.len(),
            next_id: state.next_id,
            city_count: cities.len(),
        }
    }
}

/// Read the snapshot file; a missing file is an empty store
fn load_snapshot(path: &Path) -> StorageResult<Vec<WeatherRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    Ok(serde_json::from_str(&content)?)
}

/// Write the snapshot to a sibling temp file, then rename over the old one
fn save_snapshot(path: &Path, records: &[&WeatherRecord]) -> StorageResult<()> {
    let tmp = path.with_extension("json.tmp");
    let content = serde_json::to_string_pretty(records)?;
    std::fs::write(&tmp, content)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
