//! Event intake handler

use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use nfd_types::{DeploymentId, Event, RequestId};
use serde::Serialize;
use tracing::info;

/// Inbound correlation header honored before generating a fresh id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Acknowledgment returned for an accepted event
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub request_id: RequestId,
    pub deployment_ids: Vec<DeploymentId>,
}

/// Accept a VNF lifecycle event
///
/// Runs the enrichment pipeline synchronously; pipeline failures abort
/// the request with a classified error before anything is launched. On
/// success the orchestrator's sequences are spawned and the caller gets
/// a 202 with the generated deployment ids right away.
pub async fn post_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<Event>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<EventResponse>)> {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(RequestId::new)
        .unwrap_or_else(RequestId::generate);

    // Content validation: the body must be JSON of the event shape
    let Json(event) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    info!(
        request_id = %request_id,
        target_name = %event.target_name,
        action = %event.service_action,
        "event received"
    );

    let enriched = state.pipeline.enrich(event, request_id.clone()).await?;
    let deployment_ids = state.orchestrator.dispatch(enriched);

    Ok((
        StatusCode::ACCEPTED,
        Json(EventResponse {
            request_id,
            deployment_ids,
        }),
    ))
}
