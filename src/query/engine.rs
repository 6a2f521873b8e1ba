//! Query evaluation
//!
//! Applies a `QueryRequest` to a snapshot of records:
//!
//! ```text
//! records → order by id → date filter → city filter → stable date sort
//! ```
//!
//! The date sort is stable and runs on id-ordered input, so records that
//! share a date always come out smallest id first, in either direction.

use crate::query::request::{QueryRequest, SortOrder};
use crate::storage::WeatherRecord;

/// Evaluate `request` against `records`, returning a new ordered list
///
/// The input slice is never modified and may be in any order.
pub fn evaluate(records: &[WeatherRecord], request: &QueryRequest) -> Vec<WeatherRecord> {
    let mut result: Vec<&WeatherRecord> = records.iter().collect();
    result.sort_by_key(|r| r.id);

    if let Some(date) = request.date {
        result.retain(|r| r.date == date);
    }

    if let Some(keys) = request.city_keys() {
        result.retain(|r| {
            let city = r.city.to_lowercase();
            keys.iter().any(|k| *k == city)
        });
    }

    // slice::sort_by is stable
    match request.sort {
        SortOrder::None => {}
        SortOrder::DateAscending => result.sort_by(|a, b| a.date.cmp(&b.date)),
        SortOrder::DateDescending => result.sort_by(|a, b| b.date.cmp(&a.date)),
    }

    result.into_iter().cloned().collect()
}
