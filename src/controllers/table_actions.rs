use std::sync::Arc;

use serde_json::{Value, json};

#[cfg(test)]
use mockall::automock;

use super::request::{application_error, bearer_token, decode_envelope};
use super::{ApiResult, Refresh};
use crate::models::ApiEnvelope;
use crate::session::SessionStore;
use crate::transport::{HttpRequest, Method, Transport};

/// Envelope status codes accepted for a mutation.
const SUCCESS_CODES: [u16; 2] = [200, 201];

/// Blocking yes/no prompt shown before destructive actions. Can be mocked in tests.
#[cfg_attr(test, automock)]
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

/// Confirmation that always agrees.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableActionOptions {
    /// Ask before deleting.
    pub confirm_delete: bool,
}

impl Default for TableActionOptions {
    fn default() -> Self {
        Self {
            confirm_delete: true,
        }
    }
}

/// Create/update/delete/status-change calls sharing one loading and error state.
///
/// Mutations report success as a `bool`; the error text stays available
/// through [`TableActions::error`] for inline display. On success the
/// caller's [`Refresh`] (usually the list's `RemoteCollection`) is reloaded.
pub struct TableActions {
    session: Arc<SessionStore>,
    transport: Arc<dyn Transport>,
    confirm: Box<dyn Confirm + Send>,
    options: TableActionOptions,
    loading: bool,
    error: Option<String>,
}

impl TableActions {
    pub fn new(
        session: Arc<SessionStore>,
        transport: Arc<dyn Transport>,
        confirm: impl Confirm + Send + 'static,
    ) -> Self {
        Self {
            session,
            transport,
            confirm: Box::new(confirm),
            options: TableActionOptions::default(),
            loading: false,
            error: None,
        }
    }

    pub fn with_options(mut self, options: TableActionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Sends an authenticated JSON call and checks both the HTTP status and
    /// the envelope's `status_code`. The JSON content type goes out even
    /// without a body. The error is recorded before being returned.
    pub async fn handle_api_call(
        &mut self,
        endpoint: &str,
        method: Method,
        body: Option<Value>,
    ) -> ApiResult<ApiEnvelope<Value>> {
        self.loading = true;
        self.error = None;

        let result = self.call(endpoint, method, body).await;

        self.loading = false;
        if let Err(e) = &result {
            self.error = Some(e.to_string());
        }
        result
    }

    pub async fn handle_create(
        &mut self,
        endpoint: &str,
        body: Value,
        refresh: &mut impl Refresh,
    ) -> bool {
        self.mutate(endpoint, Method::Post, Some(body), refresh).await
    }

    /// Updates go out as `POST`, the verb the backend accepts for edits.
    pub async fn handle_update(
        &mut self,
        endpoint: &str,
        body: Value,
        refresh: &mut impl Refresh,
    ) -> bool {
        self.mutate(endpoint, Method::Post, Some(body), refresh).await
    }

    /// Deletes `item_id`, asking first unless `confirm_delete` is off.
    /// A declined prompt returns `false` without sending anything.
    pub async fn handle_delete(
        &mut self,
        endpoint: &str,
        item_id: &str,
        item_name: Option<&str>,
        refresh: &mut impl Refresh,
    ) -> bool {
        if self.options.confirm_delete {
            let message = format!(
                "Are you sure you want to delete {}?",
                item_name.unwrap_or("this item")
            );
            if !self.confirm.confirm(&message) {
                tracing::debug!(item_id, "delete cancelled");
                return false;
            }
        }

        let url = item_url(endpoint, item_id, None);
        self.mutate(&url, Method::Delete, None, refresh).await
    }

    pub async fn handle_status_change(
        &mut self,
        endpoint: &str,
        item_id: &str,
        new_status: &str,
        refresh: &mut impl Refresh,
    ) -> bool {
        let url = item_url(endpoint, item_id, Some("change-status"));
        let body = json!({ "status": new_status });
        self.mutate(&url, Method::Post, Some(body), refresh).await
    }

    async fn mutate(
        &mut self,
        endpoint: &str,
        method: Method,
        body: Option<Value>,
        refresh: &mut impl Refresh,
    ) -> bool {
        match self.handle_api_call(endpoint, method, body).await {
            Ok(_) => {
                refresh.refresh().await;
                true
            }
            Err(e) => {
                tracing::error!(%method, endpoint, error = %e, "table action failed");
                false
            }
        }
    }

    async fn call(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<Value>,
    ) -> ApiResult<ApiEnvelope<Value>> {
        let token = bearer_token(&self.session)?;

        let mut request = HttpRequest::new(method, endpoint)
            .with_bearer(token)
            .as_json();
        if let Some(body) = body {
            request = request.with_json(body);
        }

        let response = self.transport.send(request).await?;
        let envelope = decode_envelope::<Value>(&response)?;
        if !SUCCESS_CODES.contains(&envelope.status_code) {
            return Err(application_error(
                envelope.status_code,
                envelope.message,
                "Operation failed",
            ));
        }
        Ok(envelope)
    }
}

/// Resolves the URL of one row: `{id}` in the template is substituted,
/// otherwise the id (and `suffix`) are appended as path segments.
fn item_url(endpoint: &str, item_id: &str, suffix: Option<&str>) -> String {
    if endpoint.contains("{id}") {
        return endpoint.replace("{id}", item_id);
    }

    let base = endpoint.trim_end_matches('/');
    match suffix {
        Some(suffix) => format!("{}/{}/{}", base, item_id, suffix),
        None => format!("{}/{}", base, item_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_is_substituted() {
        assert_eq!(
            item_url("http://h/api/activities/{id}/cancel", "9", Some("change-status")),
            "http://h/api/activities/9/cancel"
        );
    }

    #[test]
    fn id_and_suffix_are_appended() {
        assert_eq!(item_url("http://h/api/activities/", "9", None), "http://h/api/activities/9");
        assert_eq!(
            item_url("http://h/api/activities", "9", Some("change-status")),
            "http://h/api/activities/9/change-status"
        );
    }
}
