//! Project artifact routes
//!
//! A project name may contain slashes (e.g. `github.com/owner/repo`), so routes
//! capture the rest of the path.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::de::IgnoredAny;
use std::sync::Arc;

/// Return the stored analysis for a project, or 404 when none is stored.
pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Response, HttpAppError> {
    match state.storage.get(&name).await? {
        Some(content) => Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            content,
        )
            .into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

/// Store the request body as the project's analysis. The body must be JSON.
pub async fn save_project(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<StatusCode, HttpAppError> {
    serde_json::from_slice::<IgnoredAny>(&body)
        .map_err(|e| HttpAppError::InvalidInput(format!("Invalid JSON body: {}", e)))?;

    state.storage.save(&name, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete the project's analysis. The durable backend keeps the object.
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<StatusCode, HttpAppError> {
    state.storage.delete(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}
