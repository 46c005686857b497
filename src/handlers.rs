use crate::aggregator::{Aggregator, LookupOutcome};
use crate::config::Config;
use crate::errors::AppError;
use crate::session::{LookupSession, Panel};
use crate::view::ViewModel;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Stateless pipeline used by the one-shot view endpoint.
    pub aggregator: Aggregator,
    /// Generation-guarded view slot for interactive clients.
    pub session: Arc<LookupSession>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Ok(Self::with_aggregator(Aggregator::from_config(config)?))
    }

    pub fn with_aggregator(aggregator: Aggregator) -> Self {
        Self {
            session: Arc::new(LookupSession::new(aggregator.clone())),
            aggregator,
        }
    }
}

/// Tail number as submitted by the user, unvalidated.
#[derive(Debug, Default, Deserialize)]
pub struct TailQueryParams {
    pub n: Option<String>,
}

impl TailQueryParams {
    fn query(&self) -> &str {
        self.n.as_deref().unwrap_or_default()
    }
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "airlift-view",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /api/v1/view?n=<tail>
///
/// Runs one full lookup and returns the view model.
///
/// # Returns
///
/// * `Result<Json<ViewModel>, AppError>` - The view model, 400 for an empty
///   query, or 502 with a generic message when the aircraft lookup fails.
pub async fn get_view(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TailQueryParams>,
) -> Result<Json<ViewModel>, AppError> {
    tracing::info!("GET /api/v1/view - n: {:?}", params.n);

    match state.aggregator.lookup(params.query()).await? {
        LookupOutcome::Invalid { message } => Err(AppError::Validation(message)),
        LookupOutcome::Ready { view } => Ok(Json(*view)),
    }
}

/// POST /api/v1/session/lookup
///
/// Submits a query into the shared session and returns the panel once that
/// submission settles. A newer submission supersedes this one.
pub async fn submit_lookup(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TailQueryParams>,
) -> Json<Panel> {
    tracing::info!("POST /api/v1/session/lookup - n: {:?}", body.n);
    Json(state.session.submit(body.query()).await)
}

/// GET /api/v1/session
///
/// Current panel snapshot, including the busy flag of an in-flight lookup.
pub async fn get_session(State(state): State<Arc<AppState>>) -> Json<Panel> {
    Json(state.session.snapshot())
}
