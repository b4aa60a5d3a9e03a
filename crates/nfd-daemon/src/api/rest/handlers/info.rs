//! Server info and health handlers

use crate::api::rest::state::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

/// API version reported by the info endpoint
pub const API_VERSION: &str = "3.0.0";

/// Server info response
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub server: ServerInfo,
    pub links: Links,
}

#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub description: String,
    pub version: String,
    pub api_version: String,
}

#[derive(Debug, Serialize)]
pub struct Links {
    pub events: String,
}

/// Server info endpoint
pub async fn server_info(State(state): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        server: ServerInfo {
            name: "nfd".to_string(),
            description: "Network function dispatcher".to_string(),
            version: state.version.clone(),
            api_version: API_VERSION.to_string(),
        },
        links: Links {
            events: "/events".to_string(),
        },
    })
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub uptime: String,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime: state.uptime(),
    })
}
