//! Weatherlog Record Store
//!
//! This module provides the storage side of the service:
//!
//! - **types**: Core data structures (WeatherRecord, NewWeatherRecord)
//! - **repository**: The `WeatherRepository` trait the rest of the crate depends on
//! - **store**: `MemoryStore`, the in-memory implementation with an optional JSON snapshot
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use weatherlog::storage::{MemoryStore, NewWeatherRecord, StorageConfig, WeatherRepository};
//! use chrono::NaiveDate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MemoryStore::open(&StorageConfig::new("./data"))?;
//!
//!     let date = NaiveDate::from_ymd_opt(2019, 6, 11).unwrap();
//!     let record = store
//!         .insert(NewWeatherRecord::new(date, "London").field("temperature", 21.5))
//!         .await?;
//!
//!     assert!(store.find_by_id(record.id).await.is_some());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod repository;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{StorageError, StorageResult};
pub use repository::WeatherRepository;
pub use store::{MemoryStore, StorageConfig};
pub use types::{NewWeatherRecord, Payload, StoreStats, WeatherRecord};
