use axum::{extract::Extension, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::kernel::StoreError;
use crate::server::app::AxumAppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check endpoint
///
/// Pings the credential store (bounded by the store timeout).
/// Returns 200 OK if it answers, 503 Service Unavailable otherwise.
pub async fn health_handler(
    Extension(state): Extension<AxumAppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let db_health = match state.deps.store.ping().await {
        Ok(()) => DatabaseHealth {
            status: "ok".to_string(),
            error: None,
        },
        Err(StoreError::Timeout(limit)) => DatabaseHealth {
            status: "error".to_string(),
            error: Some(format!("Query timeout (>{}s)", limit.as_secs())),
        },
        Err(e) => {
            error!(error = ?e, "Health check query failed");
            DatabaseHealth {
                status: "error".to_string(),
                error: Some("Query failed".to_string()),
            }
        }
    };

    let is_healthy = db_health.error.is_none();

    let (status_code, overall_status) = if is_healthy {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        status_code,
        Json(HealthResponse {
            status: overall_status.to_string(),
            database: db_health,
        }),
    )
}
