//! HTTP transport for the reduction pipeline.
//!
//! Routes:
//! - `POST /reduce` with body `{ "formula": "<text>" }`, answers with [`ReductionData`]
//! - `GET /health`
//!
//! Errors are `{ "error": "<message>" }` with status 400 for invalid input, 413 for oversized
//! bodies and 500 otherwise, including panics inside a handler.
//!
//! The Clique graph grows quadratically with the formula, so both the formula text and its
//! clause count are capped (see [`MAX_FORMULA_LEN`] and [`MAX_CLAUSES`]).
//! Cross-origin requests are allowed from anywhere; preflight `OPTIONS` requests are
//! answered by the CORS layer.

use std::any::Any;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderName, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};

use crate::reduce::{formula_from_json, process_formula_with_limit, ReduceError, ReductionData};

pub const SERVICE_NAME: &str = "clique-reduce";

/// Largest accepted request body, in bytes.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Largest accepted formula, in bytes.
pub const MAX_FORMULA_LEN: usize = 8 * 1024;

/// Largest accepted number of 3-CNF clauses (the graph then has at most `3 * MAX_CLAUSES` nodes).
pub const MAX_CLAUSES: usize = 128;

/// Listening address of the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Error body returned on any failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// Handler-level failure, mapped to a status code and a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Body is not JSON at all
    MalformedBody,
    /// Body exceeds [`MAX_BODY_BYTES`]
    BodyTooLarge,
    /// Formula missing, null, non-textual or empty
    InvalidFormula,
    /// Formula text exceeds [`MAX_FORMULA_LEN`]
    FormulaTooLong,
    /// Formula converts to more than [`MAX_CLAUSES`] clauses
    TooManyClauses,
    /// Anything else; details only go to the log
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody
            | ApiError::InvalidFormula
            | ApiError::FormulaTooLong
            | ApiError::TooManyClauses => StatusCode::BAD_REQUEST,
            ApiError::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::MalformedBody => "Invalid request body",
            ApiError::BodyTooLarge => "Request body too large",
            ApiError::InvalidFormula => "Invalid formula provided",
            ApiError::FormulaTooLong => "Formula too long",
            ApiError::TooManyClauses => "Formula has too many clauses",
            ApiError::Internal => "Internal server error",
        }
    }
}

impl From<ReduceError> for ApiError {
    fn from(e: ReduceError) -> Self {
        match e {
            ReduceError::InvalidInput => ApiError::InvalidFormula,
            ReduceError::TooManyClauses { .. } => ApiError::TooManyClauses,
            ReduceError::Internal(details) => {
                log::error!("Reduction failed: {}", details);
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// CORS policy: any origin, the headers browser clients send.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}

/// Builds the application router.
pub fn router() -> Router {
    with_layers(Router::new().route("/reduce", post(reduce)).route("/health", get(health)))
}

/// Wraps `routes` in the service middleware: panic guard, body limit and CORS.
///
/// The panic guard sits inside CORS so that 500 responses carry CORS headers too.
pub fn with_layers(routes: Router) -> Router {
    routes
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors_layer())
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    log::error!("Handler panicked: {}", details);
    ApiError::Internal.into_response()
}

/// POST /reduce - Run the reduction on `{ "formula": ... }`
///
/// The body is parsed as JSON regardless of its `Content-Type`.
pub async fn reduce(body: Result<Bytes, BytesRejection>) -> Result<Json<ReductionData>, ApiError> {
    let body = body.map_err(|e| {
        log::warn!("Rejecting request body: {}", e);
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::BodyTooLarge
        } else {
            ApiError::MalformedBody
        }
    })?;

    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        log::warn!("Rejecting malformed request body: {}", e);
        ApiError::MalformedBody
    })?;

    let formula = payload.get("formula").unwrap_or(&Value::Null);
    let formula = formula_from_json(formula)?;
    if formula.len() > MAX_FORMULA_LEN {
        log::warn!("Rejecting formula of {} bytes (limit {})", formula.len(), MAX_FORMULA_LEN);
        return Err(ApiError::FormulaTooLong);
    }
    log::info!("Received formula: {:?}", formula);

    let data = process_formula_with_limit(formula, MAX_CLAUSES)?;
    log::info!(
        "Reduced to {} clause(s), {} node(s), {} edge(s)",
        data.cnf3.clauses.len(),
        data.clique.nodes.len(),
        data.clique.edges.len()
    );
    Ok(Json(data))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

/// Binds to `config.addr()` and serves [`router`] until Ctrl+C or SIGTERM.
pub async fn serve(config: &ServerConfig) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    log::info!("{} listening on http://{}", SERVICE_NAME, listener.local_addr()?);

    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            log::info!("Received Ctrl+C, shutting down");
        }
        () = terminate => {
            log::info!("Received SIGTERM, shutting down");
        }
    }
}
