//! HTTP route handlers for Axum.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::{
    api::types::ResultDto,
    config::Settings,
    data::export::{ResultRow, RESULTS_CSV, SUMMARY_JSON},
};

use super::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

pub async fn get_summary(state: State<AppState>) -> ApiResult<serde_json::Value> {
    let path = state.settings.join_output(SUMMARY_JSON);
    if !path.exists() {
        return Err((
            StatusCode::NOT_FOUND,
            "no extraction summary; run extract first".to_string(),
        ));
    }
    let text = std::fs::read_to_string(&path).map_err(internal)?;
    let value = serde_json::from_str(&text).map_err(internal)?;
    Ok(Json(value))
}

#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    pub matched: Option<bool>,
}

pub async fn list_results(
    state: State<AppState>,
    Query(query): Query<ResultsQuery>,
) -> ApiResult<Vec<ResultDto>> {
    let mut rows = load_rows(&state.settings)?;
    if let Some(matched) = query.matched {
        rows.retain(|row| row.matched == matched);
    }
    rows.truncate(200);
    Ok(Json(rows.into_iter().map(ResultDto::from).collect()))
}

pub async fn get_result(
    Path(patient_id): Path<String>,
    state: State<AppState>,
) -> ApiResult<ResultDto> {
    let rows = load_rows(&state.settings)?;
    rows.into_iter()
        .find(|row| row.patient_id == patient_id)
        .map(|row| Json(ResultDto::from(row)))
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("no result for {patient_id}")))
}

// Artefacts are re-read per request so a new extract run shows up without a
// server restart.
fn load_rows(settings: &Settings) -> Result<Vec<ResultRow>, (StatusCode, String)> {
    let path = settings.join_output(RESULTS_CSV);
    if !path.exists() {
        warn!("diagnosis_results.csv missing; run extract first");
        return Ok(Vec::new());
    }
    let mut reader = csv::Reader::from_path(&path).map_err(internal)?;
    let mut rows = Vec::new();
    for result in reader.deserialize::<ResultRow>() {
        rows.push(result.map_err(internal)?);
    }
    Ok(rows)
}

fn internal<E: std::fmt::Display>(err: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}
