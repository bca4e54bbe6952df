//! Error-to-HTTP response conversion.
//!
//! Wraps [`ResolveError`] so handlers can return `Result<_, ApiError>` and
//! get the JSON error bodies the extract endpoint promises.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reelcore::ResolveError;
use serde_json::json;

/// Body text for an invalid URL; the offending input is not echoed back.
pub const INVALID_URL_MESSAGE: &str = "Invalid Instagram URL";

#[derive(Debug)]
pub struct ApiError(ResolveError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    pub fn inner(&self) -> &ResolveError {
        &self.0
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self.0 {
            ResolveError::InvalidUrl(url) => {
                tracing::info!(%url, "Rejected URL without shortcode");
                json!({ "error": INVALID_URL_MESSAGE })
            }
            ResolveError::MissingUrl => json!({ "error": self.0.to_string() }),
            other => {
                tracing::error!(
                    status = %status,
                    category = other.subcategory(),
                    error = %other,
                    "Extraction failed"
                );
                match other.shortcode() {
                    Some(shortcode) => json!({ "error": other.to_string(), "shortcode": shortcode }),
                    None => json!({ "error": other.to_string() }),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}
