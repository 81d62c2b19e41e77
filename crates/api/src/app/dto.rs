use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// Optional date-range query for the list endpoint. The filter only
/// applies when both bounds are present.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReceiptsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ListReceiptsQuery {
    /// Parse both bounds as ISO (date-only) dates.
    pub fn parsed(
        &self,
    ) -> Result<(Option<NaiveDate>, Option<NaiveDate>), axum::response::Response> {
        Ok((
            parse_iso_date("startDate", self.start_date.as_deref())?,
            parse_iso_date("endDate", self.end_date.as_deref())?,
        ))
    }
}

fn parse_iso_date(
    name: &str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, axum::response::Response> {
    match value {
        None => Ok(None),
        Some(raw) => raw.parse::<NaiveDate>().map(Some).map_err(|_| {
            errors::json_error(
                StatusCode::BAD_REQUEST,
                format!("{name} must be an ISO date (YYYY-MM-DD)"),
            )
        }),
    }
}

// -------------------------
// Response envelope
// -------------------------

/// `{"success": true, "data": ...}` with status 200.
pub fn ok_json<T: serde::Serialize>(data: T) -> axum::response::Response {
    success(StatusCode::OK, data)
}

/// `{"success": true, "data": ...}` with status 201.
pub fn created_json<T: serde::Serialize>(data: T) -> axum::response::Response {
    success(StatusCode::CREATED, data)
}

fn success<T: serde::Serialize>(status: StatusCode, data: T) -> axum::response::Response {
    (
        status,
        axum::Json(serde_json::json!({
            "success": true,
            "data": data,
        })),
    )
        .into_response()
}
