//! Conversion handlers.
//!
//! Every request gets its own converter. The tree is built and exported in
//! full on a blocking thread before the response is sent.

use axum::extract::rejection::{QueryRejection, StringRejection};
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use nest_core::{ConvertError, ExportOptions, NestingLevels, RecordsToTreeConverter};
use serde_json::Value;

use crate::dto::{ConvertRequest, LevelsQuery};
use crate::error::HttpError;
use crate::state::AppState;

/// Output produced by a conversion.
#[derive(Debug, Clone, Copy)]
enum Output {
    Json,
    Text,
}

/// Convert an envelope carrying both nesting levels and records.
pub async fn convert(
    State(state): State<AppState>,
    body: Result<String, StringRejection>,
) -> Result<Response, HttpError> {
    let body = body?;
    let req: ConvertRequest = serde_json::from_str(&body).map_err(ConvertError::from)?;
    let levels = req.levels()?;

    run(levels, state.export, req.records, Output::Json).await
}

/// Convert a raw list of records, nesting levels given in the query string.
pub async fn nest(
    State(state): State<AppState>,
    query: Result<Query<LevelsQuery>, QueryRejection>,
    body: Result<String, StringRejection>,
) -> Result<Response, HttpError> {
    let Query(query) = query?;
    let levels = query.levels()?;
    let data: Value = serde_json::from_str(&body?).map_err(ConvertError::from)?;

    run(levels, state.export, data, Output::Json).await
}

/// Same input as [`nest`], answered with the plain-text tree rendering.
pub async fn render(
    State(state): State<AppState>,
    query: Result<Query<LevelsQuery>, QueryRejection>,
    body: Result<String, StringRejection>,
) -> Result<Response, HttpError> {
    let Query(query) = query?;
    let levels = query.levels()?;
    let data: Value = serde_json::from_str(&body?).map_err(ConvertError::from)?;

    run(levels, state.export, data, Output::Text).await
}

async fn run(
    levels: NestingLevels,
    export: ExportOptions,
    data: Value,
    output: Output,
) -> Result<Response, HttpError> {
    let level_count = levels.len();

    let result = tokio::task::spawn_blocking(move || {
        let mut converter = RecordsToTreeConverter::with_options(levels, export);
        converter.create_tree_from_value(&data)?;
        match output {
            Output::Json => converter.export_json(),
            Output::Text => converter.render_tree(),
        }
    })
    .await
    .map_err(|e| HttpError::Internal(format!("Conversion task failed: {e}")))?;

    let text = result?;
    tracing::debug!(
        target: "nest.http",
        levels = level_count,
        bytes = text.len(),
        "Conversion finished"
    );

    let content_type = match output {
        Output::Json => "application/json",
        Output::Text => "text/plain; charset=utf-8",
    };
    Ok(([(header::CONTENT_TYPE, content_type)], text).into_response())
}
