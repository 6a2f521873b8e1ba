//! Core data types for the Weatherlog record store
//!
//! This module defines the fundamental types used throughout the storage layer:
//! - `WeatherRecord`: A stored observation with its assigned id
//! - `NewWeatherRecord`: An observation submitted for creation
//! - `StoreStats`: Summary counters for health reporting

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque observation fields (temperatures, coordinates, ...) carried alongside a record.
pub type Payload = Map<String, Value>;

/// Record keys that a payload must not repeat, since the payload is flattened beside them
pub const RESERVED_FIELDS: [&str; 3] = ["id", "date", "city"];

/// A single weather observation as held by the store
///
/// Immutable once the store has assigned its `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherRecord {
    /// Store-assigned identifier, unique and never reused
    pub id: u64,
    /// Calendar day of the observation
    pub date: NaiveDate,
    /// City name, compared case-insensitively by queries
    pub city: String,
    /// Remaining observation fields, flattened into the record on the wire
    #[serde(flatten)]
    pub payload: Payload,
}

/// An observation submitted for storage, before an id exists
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewWeatherRecord {
    pub date: NaiveDate,
    pub city: String,
    #[serde(flatten)]
    pub payload: Payload,
}

impl NewWeatherRecord {
    /// Create a new record with an empty payload
    pub fn new(date: NaiveDate, city: impl Into<String>) -> Self {
        Self {
            date,
            city: city.into(),
            payload: Payload::new(),
        }
    }

    /// Builder method: add a payload field
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// First payload key that collides with a record field, if any
    pub fn reserved_field(&self) -> Option<&'static str> {
        RESERVED_FIELDS
            .into_iter()
            .find(|key| self.payload.contains_key(*key))
    }

    /// Attach an id, producing the stored form
    pub fn with_id(self, id: u64) -> WeatherRecord {
        WeatherRecord {
            id,
            date: self.date,
            city: self.city,
            payload: self.payload,
        }
    }
}

/// Store statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    /// Number of records held
    pub record_count: usize,
    /// Id the next insert will receive
    pub next_id: u64,
    /// Number of distinct cities (case-insensitive)
    pub city_count: usize,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "records={}, cities={}, next_id={}",
            self.record_count, self.city_count, self.next_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_payload_is_flattened() {
        let record = NewWeatherRecord::new(day(1985, 1, 1), "Nashville")
            .field("state", "Tennessee")
            .field("temperatures", json!([17.3, 16.8]))
            .with_id(1);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1,
                "date": "1985-01-01",
                "city": "Nashville",
                "state": "Tennessee",
                "temperatures": [17.3, 16.8]
            })
        );
    }

    #[test]
    fn test_unknown_fields_land_in_payload() {
        let new: NewWeatherRecord = serde_json::from_value(json!({
            "date": "2019-06-11",
            "city": "London",
            "lat": 51.5,
            "lon": -0.12
        }))
        .unwrap();

        assert_eq!(new.date, day(2019, 6, 11));
        assert_eq!(new.payload.len(), 2);
        assert_eq!(new.payload["lat"], json!(51.5));
    }

    #[test]
    fn test_reserved_field_detected() {
        let clean = NewWeatherRecord::new(day(2019, 6, 11), "London").field("lat", 51.5);
        assert_eq!(clean.reserved_field(), None);

        let with_id = clean.clone().field("id", 99);
        assert_eq!(with_id.reserved_field(), Some("id"));

        let with_city = clean.field("city", "Paris");
        assert_eq!(with_city.reserved_field(), Some("city"));
    }

    #[test]
    fn test_invalid_date_rejected() {
        let result: Result<NewWeatherRecord, _> = serde_json::from_value(json!({
            "date": "2019-13-40",
            "city": "London"
        }));
        assert!(result.is_err());
    }
}
