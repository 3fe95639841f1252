//! HTTP ingress for text messages.
//!
//! `POST /api/messages` accepts an [`InboundTextMessage`] as JSON, hands it to
//! the [`Publisher`] and answers `202 Accepted` once the record is enqueued.
//! The response never reflects broker delivery.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::future::Future;
use std::io;
use std::sync::Arc;
use text_producer::{submit, Acknowledgment, InboundTextMessage, PublishError, Publisher, Transport};
use tracing::{debug, error, info, warn};

/// Shared state of the HTTP handlers.
pub struct AppState<T: Transport> {
    pub publisher: Publisher<T>,
}

/// Builds the router with all ingress routes.
pub fn router<T: Transport>(publisher: Publisher<T>) -> Router {
    Router::new()
        .route("/api/messages", post(publish_message::<T>))
        .route("/health", get(health))
        .with_state(Arc::new(AppState { publisher }))
}

/// Resolves once `signal` fires, for use with graceful shutdown.
///
/// A signal listener that fails to install is logged and treated as an
/// immediate shutdown request.
pub async fn shutdown_signal<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}

async fn publish_message<T: Transport>(
    State(state): State<Arc<AppState<T>>>,
    payload: Result<Json<InboundTextMessage>, JsonRejection>,
) -> Result<(StatusCode, Json<Acknowledgment>), ApiError> {
    let Json(message) = payload?;
    debug!("Received message with id {:?}", message.message_id);

    let ack = submit(&state.publisher, message)?;
    Ok((StatusCode::ACCEPTED, Json(ack)))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

/// Request failure surfaced to the client.
#[derive(Debug)]
pub enum ApiError {
    /// The body is not a JSON text message (bad syntax, wrong field types, or
    /// wrong content type). Answered with `400 Bad Request`.
    InvalidMessage(JsonRejection),
    /// The record could not be enqueued. Answered with `503 Service Unavailable`.
    Publish(PublishError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidMessage(rejection)
    }
}

impl From<PublishError> for ApiError {
    fn from(err: PublishError) -> Self {
        ApiError::Publish(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidMessage(rejection) => {
                warn!("Rejected message body: {}", rejection.body_text());
                (StatusCode::BAD_REQUEST, rejection.body_text())
            }
            ApiError::Publish(err) => {
                error!("Failed to hand message to Kafka: {}", err);
                (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
