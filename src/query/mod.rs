//! Weatherlog Query Engine
//!
//! Filters and orders weather records:
//!
//! - **request**: `QueryRequest` and `SortOrder`
//! - **engine**: `evaluate`, the pure filter-then-sort pipeline
//! - **params**: Parsing of URL query parameters into a request
//! - **executor**: Runs a request against the record store
//!
//! # Semantics
//!
//! ```text
//! 1. order by id ascending
//! 2. keep date == request.date           (if given)
//! 3. keep lower(city) in lower(cities)   (if given)
//! 4. stable sort by date asc/desc        (if requested)
//! ```
//!
//! Records with equal dates keep smallest-id-first in both directions.
//!
//! # Example
//!
//! ```rust
//! use weatherlog::query::{evaluate, QueryRequest, SortOrder};
//! use weatherlog::storage::NewWeatherRecord;
//! use chrono::NaiveDate;
//!
//! let day = |d| NaiveDate::from_ymd_opt(2019, 6, d).unwrap();
//! let records = vec![
//!     NewWeatherRecord::new(day(11), "London").with_id(1),
//!     NewWeatherRecord::new(day(11), "Paris").with_id(2),
//!     NewWeatherRecord::new(day(12), "London").with_id(3),
//! ];
//!
//! let newest_first = evaluate(&records, &QueryRequest::new().sort(SortOrder::DateDescending));
//! let ids: Vec<u64> = newest_first.iter().map(|r| r.id).collect();
//! assert_eq!(ids, vec![3, 1, 2]);
//! ```

mod engine;
mod error;
mod executor;
mod params;
mod request;

pub use engine::evaluate;
pub use error::{QueryError, QueryResult};
pub use executor::QueryExecutor;
pub use params::{parse_cities, parse_date, parse_query_pairs};
pub use request::{QueryRequest, SortOrder};
