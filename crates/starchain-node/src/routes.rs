//! HTTP routes for the star registry.
//!
//! Pure plumbing: each handler maps one external call onto a registrar
//! operation and maps error kinds onto status codes, nothing more.

use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use starchain_ledger::{Block, BlockHash, Registrar, RegistryError, StarRecord};

/// Shared application state passed to handlers.
pub type AppState = Arc<Registrar>;

type ApiError = (StatusCode, String);

/// Build the application router.
pub fn router(registrar: AppState) -> Router {
    Router::new()
        .route("/block/:height", get(block_by_height))
        .route("/blockhash/:hash", get(block_by_hash))
        .route("/requestValidation", post(request_validation))
        .route("/submitstar", post(submit_star))
        .route("/blockaddress/:address", get(stars_by_owner))
        .route("/health", get(health))
        .route("/version", get(version))
        .layer(axum::middleware::from_fn(trace_requests))
        .with_state(registrar)
}

fn to_http(err: RegistryError) -> ApiError {
    let status = match err {
        RegistryError::NotFound => StatusCode::NOT_FOUND,
        RegistryError::MissingInput(_) => StatusCode::BAD_REQUEST,
        RegistryError::ChallengeMismatch => StatusCode::CONFLICT,
        RegistryError::ChallengeExpired => StatusCode::GONE,
        RegistryError::InvalidSignature => StatusCode::UNAUTHORIZED,
        RegistryError::Body(_) => StatusCode::BAD_REQUEST,
    };
    (status, err.to_string())
}

async fn trace_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let response = next.run(req).await;
    tracing::info!(%method, path, status = %response.status(), "request");
    response
}

/// GET /block/:height
async fn block_by_height(
    State(registrar): State<AppState>,
    Path(height): Path<u64>,
) -> Result<Json<Block>, ApiError> {
    let block = registrar.block_by_height(height).await.map_err(to_http)?;
    Ok(Json(block))
}

/// GET /blockhash/:hash
async fn block_by_hash(
    State(registrar): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Json<Block>, ApiError> {
    // A string that does not parse as a digest cannot name a block.
    let hash = BlockHash::from_hex(&hash).map_err(|_| to_http(RegistryError::NotFound))?;
    let block = registrar.block_by_hash(&hash).await.map_err(to_http)?;
    Ok(Json(block))
}

#[derive(Deserialize)]
struct RequestValidationBody {
    #[serde(default)]
    address: String,
}

/// POST /requestValidation
async fn request_validation(
    State(registrar): State<AppState>,
    Json(payload): Json<RequestValidationBody>,
) -> Result<Json<starchain_ledger::ChallengeTicket>, ApiError> {
    let ticket = registrar
        .request_challenge(&payload.address)
        .await
        .map_err(to_http)?;
    Ok(Json(ticket))
}

#[derive(Deserialize)]
struct SubmitStarBody {
    #[serde(default)]
    address: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    signature: String,
    star: Option<serde_json::Value>,
}

/// POST /submitstar
async fn submit_star(
    State(registrar): State<AppState>,
    Json(payload): Json<SubmitStarBody>,
) -> Result<Json<Block>, ApiError> {
    let block = registrar
        .submit_star(
            &payload.address,
            &payload.message,
            &payload.signature,
            payload.star,
        )
        .await
        .map_err(to_http)?;
    Ok(Json(block))
}

/// GET /blockaddress/:address
async fn stars_by_owner(
    State(registrar): State<AppState>,
    Path(address): Path<String>,
) -> Json<Vec<StarRecord>> {
    Json(registrar.stars_by_owner(&address).await)
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    height: u64,
}

/// GET /health
async fn health(State(registrar): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        height: registrar.height().await,
    })
}

#[derive(Serialize)]
struct Version {
    version: &'static str,
}

/// GET /version
async fn version() -> Json<Version> {
    Json(Version {
        version: env!("CARGO_PKG_VERSION"),
    })
}
