use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Message shown to the user when the aircraft lookup itself fails.
pub const LOOKUP_FAILED_MESSAGE: &str = "Lookup failed. Please try again.";

/// Message shown when the query is empty after trimming.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter an N-number.";

/// Lookup error taxonomy.
#[derive(Debug, Clone)]
pub enum AppError {
    /// The query was rejected before any network call.
    Validation(String),
    /// The aircraft endpoint failed (transport, non-success status or malformed body).
    PrimaryFetch(String),
    /// The contacts endpoint failed. Absorbed by the aggregator, never fatal.
    SecondaryFetch(String),
    /// Internal error (client construction, URL building).
    InternalError(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl AppError {
    /// The message safe to show an end user. Upstream details never leak here.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::PrimaryFetch(_) | AppError::InternalError(_) => {
                LOOKUP_FAILED_MESSAGE.to_string()
            }
            AppError::SecondaryFetch(_) => "Contacts not available.".to_string(),
            AppError::WithContext { source, .. } => source.user_message(),
        }
    }

    /// Unwraps context layers down to the originating error.
    pub fn root(&self) -> &AppError {
        match self {
            AppError::WithContext { source, .. } => source.root(),
            other => other,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::PrimaryFetch(msg) => write!(f, "Aircraft lookup failed: {}", msg),
            AppError::SecondaryFetch(msg) => write!(f, "Contacts lookup failed: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Maps each error variant to an HTTP status and a JSON body carrying only the user message.
    fn into_response(self) -> Response {
        let status = match self.root() {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PrimaryFetch(msg) => {
                tracing::error!("Aircraft lookup failed: {}", msg);
                StatusCode::BAD_GATEWAY
            }
            AppError::SecondaryFetch(msg) => {
                tracing::warn!("Contacts lookup failed: {}", msg);
                StatusCode::BAD_GATEWAY
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::WithContext { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let AppError::WithContext { context, source } = &self {
            tracing::error!("Error with context: {} -> {}", context, source);
        }

        let body = Json(json!({
            "error": self.user_message(),
        }));

        (status, body).into_response()
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::InternalError(format!("Invalid upstream URL: {}", err))
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }
}
