use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::app_state::AppState;

/// Fallback when EXPORT_PASS is unset. Kept from the original deployment;
/// override it in any environment that matters.
pub const DEFAULT_EXPORT_PASS: &str = "0000";

#[derive(Debug, Deserialize)]
pub struct ExportParams {
    pub clave: String,
    pub desde: Option<String>,
    pub hasta: Option<String>,
}

pub async fn export_handler(
    State(app_state): State<AppState>,
    Query(params): Query<ExportParams>,
) -> Response {
    if params.clave != app_state.export_pass {
        warn!("Export rejected: wrong key");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "No autorizado" })),
        )
            .into_response();
    }

    let mut desde = None;
    if let Some(raw) = &params.desde {
        match parse_export_date(raw) {
            Ok(parsed) => desde = Some(parsed),
            Err(_) => return invalid_date_response(),
        }
    }

    let mut hasta = None;
    if let Some(raw) = &params.hasta {
        match parse_export_date(raw) {
            Ok(parsed) => hasta = Some(parsed),
            Err(_) => return invalid_date_response(),
        }
    }

    Json(app_state.movement_db.export(desde, hasta)).into_response()
}

fn invalid_date_response() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "Formato de fecha inválido. Usa YYYY-MM-DD o YYYY-MM-DDTHH:MM:SS"
        })),
    )
        .into_response()
}

/// A bare date means midnight, so `desde` covers the whole day.
fn parse_export_date(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(|date| date.and_time(NaiveTime::MIN)))
}
