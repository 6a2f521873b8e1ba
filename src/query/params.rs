//! Parameter parsing
//!
//! Turns raw `key=value` pairs from a URL query string into a
//! `QueryRequest`. Recognized keys are `date`, `city` and `sort`; anything
//! else is ignored.

use chrono::NaiveDate;

use crate::query::error::{QueryError, QueryResult};
use crate::query::request::{QueryRequest, SortOrder};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> QueryResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| QueryError::InvalidDate(s.to_string()))
}

/// Split a comma-separated city list, dropping blank entries
pub fn parse_cities(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Build a request from query-string pairs
///
/// `city` may repeat and each value may hold a comma-separated list.
/// For `date` and `sort` the last occurrence wins. A `city` parameter
/// with only blank values applies no city filter.
pub fn parse_query_pairs<K, V>(pairs: &[(K, V)]) -> QueryResult<QueryRequest>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut request = QueryRequest::new();
    let mut cities: Vec<String> = Vec::new();

    for (key, value) in pairs {
        let value = value.as_ref();
        match key.as_ref() {
            "date" => request.date = Some(parse_date(value)?),
            "city" => cities.extend(parse_cities(value)),
            "sort" => request.sort = value.parse::<SortOrder>()?,
            _ => {}
        }
    }

    if !cities.is_empty() {
        request = request.cities(cities);
    }

    Ok(request)
}
