//! Weather Routes
//!
//! Endpoints for creating and querying weather records.
//!
//! - POST /weather - Store a new record
//! - GET /weather - List records (`date`, `city`, `sort` filters)
//! - GET /weather/:id - Fetch one record

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::query::parse_query_pairs;
use crate::storage::{NewWeatherRecord, WeatherRecord};

const MAX_CITY_LEN: usize = 100;

/// POST /weather
///
/// Store a new observation. The id is assigned by the server.
pub async fn create_weather(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewWeatherRecord>,
) -> ApiResult<(StatusCode, Json<WeatherRecord>)> {
    validate_new_record(&req)?;

    let record = state.store.insert(req).await?;
    tracing::info!(id = record.id, city = %record.city, date = %record.date, "Created weather record");

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /weather?date=YYYY-MM-DD&city=a,b&sort=date|-date
///
/// List records, optionally filtered by date and cities and sorted by date.
pub async fn list_weather(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Json<Vec<WeatherRecord>>> {
    let request = parse_query_pairs(&params)?;
    let records = state.executor.execute(&request).await;
    Ok(Json(records))
}

/// GET /weather/:id
///
/// Fetch a single record, 404 if it does not exist.
pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ApiResult<Json<WeatherRecord>> {
    state
        .store
        .find_by_id(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Weather record {} not found", id)))
}

/// Validate a create request
fn validate_new_record(req: &NewWeatherRecord) -> ApiResult<()> {
    if let Some(key) = req.reserved_field() {
        return Err(ApiError::Validation(format!(
            "{} must not be repeated in the payload; id is assigned by the server",
            key
        )));
    }

    if req.city.trim().is_empty() {
        return Err(ApiError::Validation("city cannot be empty".to_string()));
    }

    if req.city.chars().count() > MAX_CITY_LEN {
        return Err(ApiError::Validation(format!(
            "city exceeds maximum length of {} characters",
            MAX_CITY_LEN
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_record(city: &str) -> NewWeatherRecord {
        NewWeatherRecord::new(NaiveDate::from_ymd_opt(2019, 6, 11).unwrap(), city)
    }

    #[test]
    fn test_validate_new_record_valid() {
        assert!(validate_new_record(&new_record("London").field("lat", 51.5)).is_ok());
    }

    #[test]
    fn test_validate_new_record_blank_city() {
        assert!(validate_new_record(&new_record("   ")).is_err());
    }

    #[test]
    fn test_validate_new_record_long_city() {
        assert!(validate_new_record(&new_record(&"x".repeat(101))).is_err());
    }

    #[test]
    fn test_validate_new_record_rejects_id() {
        assert!(validate_new_record(&new_record("London").field("id", 9)).is_err());
    }
}
