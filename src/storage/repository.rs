//! Record store interface
//!
//! The query layer and the HTTP handlers only see this trait, so the
//! backing store can be swapped without touching either.

use async_trait::async_trait;

use crate::storage::error::StorageResult;
use crate::storage::types::{NewWeatherRecord, StoreStats, WeatherRecord};

/// Access to the weather record collection
#[async_trait]
pub trait WeatherRepository: Send + Sync {
    /// Store a new record, assigning it a fresh id
    async fn insert(&self, record: NewWeatherRecord) -> StorageResult<WeatherRecord>;

    /// Look up a record by id
    async fn find_by_id(&self, id: u64) -> Option<WeatherRecord>;

    /// Snapshot of every record, in no particular order
    async fn list_all(&self) -> Vec<WeatherRecord>;

    /// Summary counters
    async fn stats(&self) -> StoreStats;
}
