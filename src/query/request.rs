//! Query request types
//!
//! A `QueryRequest` is built per call (usually from HTTP query parameters)
//! and describes which records to keep and how to order them.

use chrono::NaiveDate;
use std::str::FromStr;

use crate::query::error::QueryError;

/// Requested ordering of the result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Keep the baseline (ascending id) order
    #[default]
    None,
    /// Oldest observation first
    DateAscending,
    /// Newest observation first
    DateDescending,
}

impl FromStr for SortOrder {
    type Err = QueryError;

    /// Parse the wire form: `date`, `-date`, or empty
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(SortOrder::None),
            "date" => Ok(SortOrder::DateAscending),
            "-date" => Ok(SortOrder::DateDescending),
            other => Err(QueryError::InvalidSort(other.to_string())),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::None => write!(f, ""),
            SortOrder::DateAscending => write!(f, "date"),
            SortOrder::DateDescending => write!(f, "-date"),
        }
    }
}

/// Filter and sort options for listing records
///
/// All fields are independent and optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryRequest {
    /// Keep only records observed on this day
    pub date: Option<NaiveDate>,
    /// Keep only records whose city matches one of these, ignoring case
    pub cities: Option<Vec<String>>,
    /// Result ordering
    pub sort: SortOrder,
}

impl QueryRequest {
    /// An empty request: every record, ascending id order
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: filter by exact date
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Builder method: add a city to the match set
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.cities.get_or_insert_with(Vec::new).push(city.into());
        self
    }

    /// Builder method: replace the city match set
    pub fn cities<I, S>(mut self, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cities = Some(cities.into_iter().map(Into::into).collect());
        self
    }

    /// Builder method: set ordering
    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Lowercased city set, or `None` when no city filter applies
    pub(crate) fn city_keys(&self) -> Option<Vec<String>> {
        match self.cities {
            Some(ref cities) if !cities.is_empty() => {
                Some(cities.iter().map(|c| c.to_lowercase()).collect())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_from_str() {
        assert_eq!("date".parse::<SortOrder>().unwrap(), SortOrder::DateAscending);
        assert_eq!("-date".parse::<SortOrder>().unwrap(), SortOrder::DateDescending);
        assert_eq!("".parse::<SortOrder>().unwrap(), SortOrder::None);
        assert!(matches!(
            "city".parse::<SortOrder>(),
            Err(QueryError::InvalidSort(_))
        ));
    }

    #[test]
    fn test_sort_order_display_round_trips() {
        for sort in [SortOrder::DateAscending, SortOrder::DateDescending] {
            assert_eq!(sort.to_string().parse::<SortOrder>().unwrap(), sort);
        }
    }

    #[test]
    fn test_builder() {
        let date = NaiveDate::from_ymd_opt(2019, 6, 11).unwrap();
        let request = QueryRequest::new()
            .date(date)
            .city("London")
            .city("Moscow")
            .sort(SortOrder::DateDescending);

        assert_eq!(request.date, Some(date));
        assert_eq!(
            request.cities,
            Some(vec!["London".to_string(), "Moscow".to_string()])
        );
        assert_eq!(request.sort, SortOrder::DateDescending);
    }

    #[test]
    fn test_empty_city_set_means_no_filter() {
        let request = QueryRequest::new().cities(Vec::<String>::new());
        assert!(request.city_keys().is_none());

        let request = QueryRequest::new().city("LONDON");
        assert_eq!(request.city_keys(), Some(vec!["london".to_string()]));
    }
}
