//! Data Transfer Objects
//!
//! Response types for the API endpoints that are not storage types.
//! Weather records go over the wire as `WeatherRecord` / `NewWeatherRecord`.

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: "healthy"
    pub status: String,
    /// Number of stored records
    pub records: usize,
    /// Number of distinct cities
    pub cities: usize,
    /// Seconds since server start
    pub uptime_seconds: u64,
    /// Crate version
    pub version: String,
}
