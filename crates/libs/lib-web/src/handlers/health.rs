//! # Health Check

use axum::{extract::State, Json};
use lib_core::Config;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub dataset: String,
    pub chain: String,
}

/// **Route**: `GET /health`
pub async fn health(State(config): State<Config>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        dataset: config.sanity_dataset,
        chain: config.drop_chain,
    })
}
