use anyhow::Context;
use axum::extract::Request;
use axum::routing::post;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use bloch::{QubitState, SphereScene};
use serde::Deserialize;
use std::fmt::Display;
use std::sync::Arc;
use teleport::{SessionConfig, TeleportReport};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const NORM_TOLERANCE: f64 = 1e-6;

type ApiError = (StatusCode, Json<serde_json::Value>);

#[derive(Default)]
struct AppState {
    /// Values used for any control the request leaves out.
    defaults: SessionConfig,
}

#[derive(Deserialize, Debug, Default)]
pub struct TeleportParams {
    pub alpha: Option<f64>,
    pub phase: Option<f64>,
    pub shots: Option<u32>,
    pub seed: Option<u64>,
}

impl TeleportParams {
    fn apply(self, defaults: &SessionConfig) -> SessionConfig {
        SessionConfig {
            alpha: self.alpha.unwrap_or(defaults.alpha),
            phase: self.phase.unwrap_or(defaults.phase),
            shots: self.shots.unwrap_or(defaults.shots),
            seed: self.seed.or(defaults.seed),
            scene: defaults.scene.clone(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct BlochRequest {
    pub state: QubitState,
    #[serde(default)]
    pub title: String,
    /// Rescale the state instead of rejecting it when it is not normalised.
    #[serde(default)]
    pub normalize: bool,
}

fn bad_request(e: impl Display) -> ApiError {
    warn!("rejecting request: {}", e);
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": e.to_string() })),
    )
}

fn internal_error(e: impl Display) -> ApiError {
    tracing::error!("request failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": e.to_string() })),
    )
}

fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/teleport", get(run_teleport))
        .route("/api/bloch", post(project_bloch))
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request| {
            tracing::debug_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
            )
        }))
        .with_state(state)
        .layer(cors)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::var("TELEPORT_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let app_state = Arc::new(AppState::default());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app(app_state))
        .await
        .context("Server terminated")?;
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn run_teleport(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TeleportParams>,
) -> Result<Json<TeleportReport>, ApiError> {
    let config = params.apply(&state.defaults);
    config.validate().map_err(bad_request)?;
    // Shot loops are CPU-bound; keep them off the async workers.
    let report = tokio::task::spawn_blocking(move || teleport::run(&config))
        .await
        .map_err(internal_error)?
        .map_err(internal_error)?;
    Ok(Json(report))
}

async fn project_bloch(Json(request): Json<BlochRequest>) -> Result<Json<SphereScene>, ApiError> {
    let state = if request.normalize {
        request.state.normalized().map_err(bad_request)?
    } else {
        request
            .state
            .check_normalized(NORM_TOLERANCE)
            .map_err(bad_request)?;
        request.state
    };
    Ok(Json(bloch::project(&state, &request.title)))
}
