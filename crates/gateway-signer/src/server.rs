use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;

use crate::error::ServerError;
use crate::signing::{HeaderSigner, SignedHeaders, hmac, joinai};

#[derive(Clone, Default)]
pub struct AppState {
    pub hmac: Option<Arc<dyn HeaderSigner>>,
    pub joinai: Option<Arc<dyn HeaderSigner>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SignQuery {
    pub path: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthcheck", get(|| async move { (StatusCode::OK, "Ok").into_response() }))
        .route("/headers/hmac", get(hmac_headers_handler))
        .route("/headers/joinai", get(joinai_headers_handler))
        .with_state(state)
}

pub async fn run(host: String, port: u16, state: AppState) -> Result<()> {
    let address = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    tracing::info!(%address, "header signer listening");

    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("serving header signer")?;

    Ok(())
}

async fn hmac_headers_handler(
    State(state): State<AppState>,
) -> Result<Json<SignedHeaders>, ServerError> {
    let signer = state
        .hmac
        .ok_or(ServerError::SchemeNotConfigured(hmac::ALGORITHM))?;
    Ok(Json(signer.sign_now(None)?))
}

async fn joinai_headers_handler(
    State(state): State<AppState>,
    Query(params): Query<SignQuery>,
) -> Result<Json<SignedHeaders>, ServerError> {
    let signer = state
        .joinai
        .ok_or(ServerError::SchemeNotConfigured(joinai::ALGORITHM))?;
    Ok(Json(signer.sign_now(params.path.as_deref())?))
}
