//! Query Executor
//!
//! Runs a `QueryRequest` against the record store:
//!
//! ```text
//! Request → Snapshot (list_all) → evaluate → Result
//! ```

use std::sync::Arc;
use std::time::Instant;

use crate::query::engine::evaluate;
use crate::query::request::QueryRequest;
use crate::storage::{WeatherRecord, WeatherRepository};

/// Query executor
pub struct QueryExecutor {
    /// Record store to snapshot from
    store: Arc<dyn WeatherRepository>,
}

impl QueryExecutor {
    /// Create a new query executor
    pub fn new(store: Arc<dyn WeatherRepository>) -> Self {
        Self { store }
    }

    /// Execute a request against the current contents of the store
    pub async fn execute(&self, request: &QueryRequest) -> Vec<WeatherRecord> {
        let start = Instant::now();

        let records = self.store.list_all().await;
        let result = evaluate(&records, request);

        tracing::debug!(
            scanned = records.len(),
            matched = result.len(),
            date = ?request.date,
            cities = ?request.cities,
            sort = %request.sort,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Executed weather query"
        );

        result
    }
}
