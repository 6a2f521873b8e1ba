//! # Weatherlog
//!
//! Stores weather observation records and answers queries against them.
//!
//! ## Features
//!
//! - **Record store**: In-memory store with server-assigned ids and an optional JSON snapshot
//! - **Query engine**: Exact-date and case-insensitive multi-city filtering with
//!   stable date sorting (ties broken by id)
//! - **REST API**: `POST /weather`, `GET /weather`, `GET /weather/:id`
//!
//! ## Modules
//!
//! - [`storage`]: Record store and the `WeatherRepository` trait
//! - [`query`]: Query request types and the filter/sort pipeline
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use weatherlog::query::{QueryExecutor, QueryRequest, SortOrder};
//! use weatherlog::storage::*;
//! use chrono::NaiveDate;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryStore::in_memory());
//!
//!     let date = NaiveDate::from_ymd_opt(2019, 6, 11).unwrap();
//!     store.insert(NewWeatherRecord::new(date, "London").field("temperature", 21.5)).await?;
//!     store.insert(NewWeatherRecord::new(date, "Moscow").field("temperature", 18.0)).await?;
//!
//!     let executor = QueryExecutor::new(store);
//!     let request = QueryRequest::new().city("LONDON").sort(SortOrder::DateDescending);
//!     let records = executor.execute(&request).await;
//!
//!     println!("Found {} London records", records.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod query;
pub mod storage;

// Re-export top-level types for convenience
pub use storage::{
    MemoryStore, NewWeatherRecord, StorageConfig, StorageError, StorageResult, StoreStats,
    WeatherRecord, WeatherRepository,
};

pub use query::{evaluate, QueryError, QueryExecutor, QueryRequest, SortOrder};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{
    Config, ConfigError, StorageConfig as ConfigStorageConfig, ApiConfig as ConfigApiConfig,
    LoggingConfig,
};
