use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::cli::error::CliResult;
use crate::controllers::{CollectionConfig, Confirm, FieldName, RemoteCollection, TableActions};
use crate::session::{SessionStore, get_session_path};
use crate::transport::{ReqwestTransport, Transport};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Wires the controllers to the backend for one CLI invocation.
pub struct ApiClient {
    base_url: String,
    session: Arc<SessionStore>,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Create a client backed by reqwest and the on-disk session.
    ///
    /// Priority for base URL:
    /// 1. Explicit `api_url` parameter
    /// 2. AHUB_API_URL environment variable
    /// 3. Default: http://localhost:8080/api
    ///
    /// The session file defaults to the XDG data directory.
    pub fn new(api_url: Option<String>, session_file: Option<PathBuf>) -> CliResult<Self> {
        let session = SessionStore::open(session_file.unwrap_or_else(get_session_path))?;
        Ok(Self::with_parts(
            resolve_base_url(api_url),
            Arc::new(session),
            Arc::new(ReqwestTransport::new()),
        ))
    }

    pub fn with_parts(
        base_url: impl Into<String>,
        session: Arc<SessionStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Absolute URL of an API path such as `/activities`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// List controller for `config`, positioned on `page` and loaded with
    /// a single fetch.
    pub async fn collection<T, S, K>(
        &self,
        config: CollectionConfig<S, K>,
        page: u32,
    ) -> RemoteCollection<T, S, K>
    where
        T: DeserializeOwned,
        S: FieldName,
        K: FieldName,
    {
        let mut collection = RemoteCollection::new(
            config.enabled(false),
            self.session.clone(),
            self.transport.clone(),
        );
        collection.handle_page_change(page).await;
        collection.set_enabled(true).await;
        collection
    }

    pub fn table_actions(&self, confirm: impl Confirm + Send + 'static) -> TableActions {
        TableActions::new(self.session.clone(), self.transport.clone(), confirm)
    }
}

fn resolve_base_url(api_url: Option<String>) -> String {
    api_url
        .or_else(|| env::var("AHUB_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

#[cfg(test)]
#[path = "api_client_test.rs"]
mod api_client_test;
