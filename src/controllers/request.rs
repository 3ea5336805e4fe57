//! Helpers shared by the controllers that call the backend.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{ApiError, ApiResult};
use crate::models::ApiEnvelope;
use crate::session::SessionStore;
use crate::transport::HttpResponse;

/// Token for the `Authorization` header, read at call time.
pub(crate) fn bearer_token(session: &SessionStore) -> ApiResult<String> {
    session.token().ok_or(ApiError::MissingToken)
}

/// Checks the HTTP status and decodes the envelope. The envelope's own
/// `status_code` is left for the caller to judge.
pub(crate) fn decode_envelope<D: DeserializeOwned>(
    response: &HttpResponse,
) -> ApiResult<ApiEnvelope<D>> {
    if !response.is_success() {
        let message = serde_json::from_str::<ApiEnvelope<Value>>(&response.body)
            .ok()
            .and_then(|envelope| envelope.message);
        return Err(ApiError::http(response.status, message));
    }

    Ok(serde_json::from_str(&response.body)?)
}

/// Application error for an envelope whose `status_code` is not accepted.
pub(crate) fn application_error(status_code: u16, message: Option<String>, fallback: &str) -> ApiError {
    ApiError::Application {
        status_code,
        message: message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string()),
    }
}
