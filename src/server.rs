//! HTTP surface for presentation clients.
//!
//! This module provides an HTTP server that:
//! - Scores vitals readings via POST /score
//! - Hosts in-memory viewing sessions, one region store each
//! - Applies relief when the client reports a finished activity
//!
//! # Architecture
//!
//! ```text
//! Brain viewer ──→ POST /sessions ──→ engine ──→ session store (memory)
//!      ▲                                               │
//!      └──── GET /sessions/{id}/paint ◀────────────────┘
//! ```
//!
//! Sessions are never written to disk and disappear when the server stops.

use crate::activities::{Activity, CATALOG};
use crate::config::{Config, ScoringConfig};
use crate::core::{score, RegionKey, StressError, StressReport, VitalsSnapshot};
use crate::mesh::{MeshMap, MeshPaint};
use crate::session::{Session, SessionSettings, SessionSummary, SessionView};
use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind to (0 for random)
    pub port: u16,
    /// Scoring and session configuration
    pub config: Config,
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(port: u16, config: Config) -> Self {
        Self { port, config }
    }
}

/// Shared server state
pub struct ServerState {
    /// Tuning for readings that don't carry their own
    scoring: ScoringConfig,
    /// Relief and elevation settings for new sessions
    settings: SessionSettings,
    /// Region to mesh bindings
    mesh_map: MeshMap,
    /// Live sessions by id
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl ServerState {
    /// Create new server state
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            scoring: config.scoring,
            settings: SessionSettings::from(config),
            mesh_map: config.mesh_map()?,
            sessions: RwLock::new(HashMap::new()),
        })
    }
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions: usize,
}

/// Error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Body of POST /score and POST /sessions.
///
/// Missing tuning fields fall back to the configured scoring.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VitalsRequest {
    pub rmssd: f64,
    pub sdnn: f64,
    pub resp_rate: f64,
    pub spo2: f64,
    pub heart_rate: f64,
    pub sensitivity: Option<f64>,
    pub harshness: Option<f64>,
}

impl VitalsRequest {
    /// Resolve into a snapshot using `scoring` for absent tuning.
    pub fn snapshot(&self, scoring: &ScoringConfig) -> VitalsSnapshot {
        VitalsSnapshot::new(
            self.rmssd,
            self.sdnn,
            self.resp_rate,
            self.spo2,
            self.heart_rate,
        )
        .with_tuning(
            self.sensitivity.unwrap_or(scoring.sensitivity),
            self.harshness.unwrap_or(scoring.harshness),
        )
    }
}

/// Body of POST /sessions/{id}/decrement
#[derive(Debug, Deserialize)]
pub struct DecrementRequest {
    pub region: String,
    /// Defaults to the configured relief amount
    pub amount: Option<f64>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn stress_error(e: StressError) -> ApiError {
    let status = match e {
        StressError::InvalidInput { .. } | StressError::UnknownRegion(_) => StatusCode::BAD_REQUEST,
        StressError::UnknownActivity(_) => StatusCode::NOT_FOUND,
        StressError::NotInitialized => StatusCode::CONFLICT,
    };
    tracing::warn!("Rejected request: {}", e);
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
            code: e.code().to_string(),
        }),
    )
}

fn session_not_found(id: Uuid) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("No session with id {}", id),
            code: "SESSION_NOT_FOUND".to_string(),
        }),
    )
}

/// GET /health
async fn health(State(state): State<Arc<ServerState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        sessions: state.sessions.read().await.len(),
    })
}

/// POST /score
///
/// Scores a reading without starting a session.
async fn score_vitals(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<VitalsRequest>,
) -> Result<Json<StressReport>, ApiError> {
    let report = score(&request.snapshot(&state.scoring)).map_err(stress_error)?;
    Ok(Json(report.rounded()))
}

/// POST /sessions
async fn create_session(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<VitalsRequest>,
) -> Result<(StatusCode, Json<SessionView>), ApiError> {
    let snapshot = request.snapshot(&state.scoring);
    let session = Session::from_snapshot(&snapshot, state.settings).map_err(stress_error)?;
    let view = session.view().map_err(stress_error)?;
    state.sessions.write().await.insert(session.id(), session);
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /sessions/{id}
async fn get_session(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| session_not_found(id))?;
    Ok(Json(session.view().map_err(stress_error)?))
}

/// DELETE /sessions/{id}
async fn end_session(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    match state.sessions.write().await.remove(&id) {
        Some(_) => {
            tracing::info!(session_id = %id, "session ended");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(session_not_found(id)),
    }
}

/// GET /sessions/{id}/summary
async fn session_summary(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSummary>, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| session_not_found(id))?;
    Ok(Json(session.summary().map_err(stress_error)?))
}

/// GET /sessions/{id}/paint
async fn session_paint(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<MeshPaint>>, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| session_not_found(id))?;
    let vector = session.current_vector().map_err(stress_error)?;
    Ok(Json(state.mesh_map.paint(&vector)))
}

/// POST /sessions/{id}/decrement
async fn decrement_region(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<DecrementRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let region: RegionKey = request.region.parse().map_err(stress_error)?;

    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
    let amount = request.amount.unwrap_or(session.relief_amount());
    session
        .relieve_region(region, amount)
        .map_err(stress_error)?;
    Ok(Json(session.view().map_err(stress_error)?))
}

/// POST /sessions/{id}/activities/{activity_id}/complete
async fn complete_activity(
    State(state): State<Arc<ServerState>>,
    Path((id, activity_id)): Path<(Uuid, String)>,
) -> Result<Json<SessionView>, ApiError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
    session
        .complete_activity(&activity_id)
        .map_err(stress_error)?;
    Ok(Json(session.view().map_err(stress_error)?))
}

/// GET /activities
async fn list_activities() -> Json<&'static [Activity]> {
    Json(CATALOG.all())
}

/// Build the router for a given state.
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/score", post(score_vitals))
        .route("/activities", get(list_activities))
        .route("/sessions", post(create_session))
        .route("/sessions/:id", get(get_session).delete(end_session))
        .route("/sessions/:id/summary", get(session_summary))
        .route("/sessions/:id/paint", get(session_paint))
        .route("/sessions/:id/decrement", post(decrement_region))
        .route(
            "/sessions/:id/activities/:activity_id/complete",
            post(complete_activity),
        )
        .layer(
            CorsLayer::new()
                .allow_origin([
                    HeaderValue::from_static("http://localhost"),
                    HeaderValue::from_static("http://127.0.0.1"),
                    HeaderValue::from_static("http://localhost:5173"),
                ])
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Run the HTTP server
pub async fn run(config: ServerConfig) -> anyhow::Result<(SocketAddr, tokio::sync::oneshot::Sender<()>)> {
    let state = Arc::new(ServerState::new(&config.config)?);
    let app = router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    tracing::info!("StressIQ server listening on http://{}", actual_addr);

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                tracing::info!("Server shutdown signal received");
            })
            .await
        {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok((actual_addr, shutdown_tx))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(sensitivity: Option<f64>, harshness: Option<f64>) -> VitalsRequest {
        VitalsRequest {
            rmssd: 15.0,
            sdnn: 25.0,
            resp_rate: 28.0,
            spo2: 95.0,
            heart_rate: 115.0,
            sensitivity,
            harshness,
        }
    }

    #[test]
    fn test_request_falls_back_to_configured_scoring() {
        let scoring = ScoringConfig {
            sensitivity: 0.5,
            harshness: 2.5,
        };

        let snapshot = request(None, None).snapshot(&scoring);
        assert_eq!(snapshot.sensitivity, 0.5);
        assert_eq!(snapshot.harshness, 2.5);

        let snapshot = request(Some(2.0), None).snapshot(&scoring);
        assert_eq!(snapshot.sensitivity, 2.0);
        assert_eq!(snapshot.harshness, 2.5);
    }

    #[test]
    fn test_request_json_tuning_is_optional() {
        let request: VitalsRequest = serde_json::from_str(
            r#"{"rmssd": 50, "sdnn": 50, "resp_rate": 14, "spo2": 98, "heart_rate": 65}"#,
        )
        .unwrap();
        assert_eq!(request.sensitivity, None);
        assert_eq!(request.harshness, None);
    }
}
