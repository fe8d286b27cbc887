use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Mock middleware error variants.
///
/// Build-time failures (catalog construction) surface as `Err` from
/// [`CannedLayer::new`](crate::CannedLayer::new). Request-time failures are
/// shaped into JSON error responses local to the one request that hit them.
#[derive(Debug, thiserror::Error)]
pub enum CannedError {
    /// Fixture content failed to parse as JSON after comment stripping.
    #[error("malformed fixture {}", path.display())]
    MalformedFixture {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The catalog page asset could not be written into `mock-api/`.
    #[error("failed to write catalog page asset")]
    Template(#[source] std::io::Error),
    /// A `_status` override matched a fixture but is not a valid HTTP status code.
    #[error("invalid _status override {0:?}")]
    InvalidStatus(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl CannedError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedFixture { .. } => "MALFORMED_FIXTURE",
            Self::Template(_) => "TEMPLATE",
            Self::InvalidStatus(_) => "INVALID_STATUS",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for CannedError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            Self::MalformedFixture { .. } | Self::Template(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        // Log 500s only — a resolver miss never reaches here, and 4xx are
        // expected client mistakes. Broken fixtures need the parse error
        // logged so authors notice them immediately.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, kind = self.kind(), "fixture request failed");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
