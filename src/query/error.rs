//! Query error types
//!
//! Evaluation itself cannot fail; these cover turning raw request
//! parameters into a `QueryRequest`.

use thiserror::Error;

/// Errors that can occur while preparing or running a query
#[derive(Error, Debug)]
pub enum QueryError {
    /// Date parameter is not a `YYYY-MM-DD` calendar date
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Sort parameter is not one of the supported orderings
    #[error("Invalid sort '{0}': use 'date' or '-date'")]
    InvalidSort(String),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
