use std::fmt;
use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use tracing::instrument;

use super::request::{application_error, bearer_token, decode_envelope};
use super::{ApiError, ApiResult, FieldName, FilterValue, Filters, Pagination, SortDirection, Sorting};
use crate::models::PageData;
use crate::session::SessionStore;
use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};

/// Hook applied to the assembled query parameters just before a request.
pub type ParamsTransform =
    Arc<dyn Fn(Vec<(String, String)>) -> Vec<(String, String)> + Send + Sync>;

/// Construction parameters of a [`RemoteCollection`].
pub struct CollectionConfig<S: FieldName, K: FieldName> {
    endpoint: String,
    initial_filters: Vec<(K, FilterValue)>,
    initial_sort_field: S,
    initial_sort_direction: SortDirection,
    initial_page_size: u32,
    additional_params: Vec<(String, String)>,
    enabled: bool,
    transform_params: Option<ParamsTransform>,
}

impl<S: FieldName, K: FieldName> CollectionConfig<S, K> {
    /// Defaults: no filters, descending sort, 10 rows per page, enabled.
    pub fn new(endpoint: impl Into<String>, initial_sort_field: S) -> Self {
        Self {
            endpoint: endpoint.into(),
            initial_filters: Vec::new(),
            initial_sort_field,
            initial_sort_direction: SortDirection::Desc,
            initial_page_size: 10,
            additional_params: Vec::new(),
            enabled: true,
            transform_params: None,
        }
    }

    pub fn filters(mut self, filters: impl IntoIterator<Item = (K, FilterValue)>) -> Self {
        self.initial_filters = filters.into_iter().collect();
        self
    }

    pub fn sort_direction(mut self, direction: SortDirection) -> Self {
        self.initial_sort_direction = direction;
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.initial_page_size = page_size;
        self
    }

    /// Static parameter sent with every request, e.g. `isApproved=true`.
    pub fn additional_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_params.push((key.into(), value.into()));
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn transform_params<F>(mut self, transform: F) -> Self
    where
        F: Fn(Vec<(String, String)>) -> Vec<(String, String)> + Send + Sync + 'static,
    {
        self.transform_params = Some(Arc::new(transform));
        self
    }
}

/// Loading, error and data state of one remote list.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionState<T> {
    /// Rows in server order.
    pub data: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub total_elements: u64,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            loading: false,
            error: None,
            total_elements: 0,
        }
    }
}

/// A dispatched fetch. Only the ticket of the latest dispatch is applied
/// on completion; older ones are discarded.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    sequence: u64,
    request: HttpRequest,
}

impl FetchTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }
}

/// Which part of the query a handler touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryChange {
    Page,
    Sorting,
    Filters,
}

/// Server-paginated, filterable, sortable list bound to one endpoint.
///
/// Every handler applies its change synchronously and then fetches the
/// matching page (unless the collection is disabled). Filter and sort
/// changes return to page 1 first; page changes leave filters and sort
/// untouched.
pub struct RemoteCollection<T, S: FieldName, K: FieldName> {
    endpoint: String,
    additional_params: Vec<(String, String)>,
    transform_params: Option<ParamsTransform>,
    enabled: bool,
    session: Arc<SessionStore>,
    transport: Arc<dyn Transport>,
    pagination: Pagination,
    sorting: Sorting<S>,
    filters: Filters<K>,
    state: CollectionState<T>,
    dispatched: u64,
}

impl<T, S: FieldName, K: FieldName> fmt::Debug for RemoteCollection<T, S, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteCollection")
            .field("endpoint", &self.endpoint)
            .field("enabled", &self.enabled)
            .field("pagination", &self.pagination)
            .field("sorting", &self.sorting)
            .field("filters", &self.filters)
            .field("rows", &self.state.data.len())
            .field("loading", &self.state.loading)
            .field("error", &self.state.error)
            .finish()
    }
}

impl<T, S, K> RemoteCollection<T, S, K>
where
    T: DeserializeOwned,
    S: FieldName,
    K: FieldName,
{
    /// Builds the collection without fetching.
    pub fn new(
        config: CollectionConfig<S, K>,
        session: Arc<SessionStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            endpoint: config.endpoint,
            additional_params: config.additional_params,
            transform_params: config.transform_params,
            enabled: config.enabled,
            session,
            transport,
            pagination: Pagination::new(config.initial_page_size),
            sorting: Sorting::new(config.initial_sort_field, config.initial_sort_direction),
            filters: Filters::new(config.initial_filters),
            state: CollectionState::default(),
            dispatched: 0,
        }
    }

    /// Builds the collection and loads the first page when enabled.
    pub async fn mount(
        config: CollectionConfig<S, K>,
        session: Arc<SessionStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let mut collection = Self::new(config, session, transport);
        if collection.enabled {
            collection.refetch().await;
        }
        collection
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn data(&self) -> &[T] {
        &self.state.data
    }

    pub fn loading(&self) -> bool {
        self.state.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn total_elements(&self) -> u64 {
        self.state.total_elements
    }

    pub fn state(&self) -> &CollectionState<T> {
        &self.state
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn sorting(&self) -> &Sorting<S> {
        &self.sorting
    }

    pub fn filters(&self) -> &Filters<K> {
        &self.filters
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Parameters of the next request: `page` (0-based), `size`, `sort`,
    /// active filters, then the static parameters (which win on a name
    /// clash), passed through `transform_params` when configured.
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params: IndexMap<String, String> = IndexMap::new();
        params.insert("page".to_string(), self.pagination.api_page().to_string());
        params.insert("size".to_string(), self.pagination.page_size().to_string());
        params.insert("sort".to_string(), self.sorting.sort_string());
        params.extend(self.filters.build_query_params());
        params.extend(self.additional_params.iter().cloned());

        let params: Vec<(String, String)> = params.into_iter().collect();
        match &self.transform_params {
            Some(transform) => transform(params),
            None => params,
        }
    }

    /// First half of a fetch: stamps a new sequence number, checks the
    /// session and builds the request.
    ///
    /// A missing token fails here, before anything is sent, and is recorded
    /// as the error state.
    pub fn begin_fetch(&mut self) -> ApiResult<FetchTicket> {
        self.dispatched += 1;
        let sequence = self.dispatched;

        let token = match bearer_token(&self.session) {
            Ok(token) => token,
            Err(e) => {
                self.fail(&e);
                return Err(e);
            }
        };

        self.state.loading = true;
        self.state.error = None;

        let request = HttpRequest::get(self.endpoint.clone())
            .with_query(self.query_params())
            .with_bearer(token);
        tracing::debug!(sequence, endpoint = %self.endpoint, "dispatching fetch");

        Ok(FetchTicket { sequence, request })
    }

    /// Second half of a fetch. Returns `false` when the ticket was
    /// superseded by a newer dispatch and its outcome was dropped.
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<HttpResponse, TransportError>,
    ) -> bool {
        if ticket.sequence != self.dispatched {
            tracing::debug!(
                sequence = ticket.sequence,
                latest = self.dispatched,
                "discarding superseded response"
            );
            return false;
        }

        match outcome.map_err(ApiError::from).and_then(|r| Self::decode_page(&r)) {
            Ok(page) => {
                self.pagination.set_total_pages(page.total_pages());
                self.state.total_elements = page.total_elements();
                self.state.data = page.into_results();
                self.state.error = None;
                self.state.loading = false;
            }
            Err(e) => self.fail(&e),
        }
        true
    }

    /// Re-runs the fetch for the current state, whether or not the
    /// collection is enabled. Used to resync after external mutations.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn refetch(&mut self) {
        let Ok(ticket) = self.begin_fetch() else {
            return;
        };
        let outcome = self.transport.send(ticket.request.clone()).await;
        self.complete_fetch(&ticket, outcome);
    }

    pub async fn set_enabled(&mut self, enabled: bool) {
        let was_enabled = self.enabled;
        self.enabled = enabled;
        if enabled && !was_enabled {
            self.refetch().await;
        }
    }

    pub async fn handle_page_change(&mut self, page: u32) {
        self.pagination.handle_page_change(page);
        self.query_changed(QueryChange::Page).await;
    }

    pub async fn handle_page_size_change(&mut self, page_size: u32) {
        self.pagination.handle_page_size_change(page_size);
        self.query_changed(QueryChange::Page).await;
    }

    pub async fn handle_sort_change(&mut self, field: S) {
        self.sorting.handle_sort_change(field);
        self.query_changed(QueryChange::Sorting).await;
    }

    pub async fn toggle_sort_direction(&mut self) {
        self.sorting.toggle_direction();
        self.query_changed(QueryChange::Sorting).await;
    }

    pub async fn set_sorting(&mut self, field: S, direction: SortDirection) {
        self.sorting.set_sorting(field, direction);
        self.query_changed(QueryChange::Sorting).await;
    }

    pub async fn update_filter(&mut self, key: K, value: impl Into<FilterValue>) {
        self.filters.update_filter(key, value);
        self.query_changed(QueryChange::Filters).await;
    }

    pub async fn update_filters(&mut self, partial: impl IntoIterator<Item = (K, FilterValue)>) {
        self.filters.update_filters(partial);
        self.query_changed(QueryChange::Filters).await;
    }

    pub async fn reset_filters(&mut self) {
        self.filters.reset_filters();
        self.query_changed(QueryChange::Filters).await;
    }

    pub async fn clear_filter(&mut self, key: K) {
        self.filters.clear_filter(key);
        self.query_changed(QueryChange::Filters).await;
    }

    pub async fn handle_select_change(&mut self, key: K, value: &str) {
        self.filters.handle_select_change(key, value);
        self.query_changed(QueryChange::Filters).await;
    }

    pub async fn handle_input_change(&mut self, key: K, value: &str) {
        self.filters.handle_input_change(key, value);
        self.query_changed(QueryChange::Filters).await;
    }

    pub async fn handle_date_change(&mut self, key: K, date: Option<DateTime<Utc>>) {
        self.filters.handle_date_change(key, date);
        self.query_changed(QueryChange::Filters).await;
    }

    // Filter and sort changes feed into the page, never the other way round.
    async fn query_changed(&mut self, change: QueryChange) {
        if matches!(change, QueryChange::Filters | QueryChange::Sorting) {
            self.pagination.reset_page();
        }
        if self.enabled {
            self.refetch().await;
        }
    }

    fn decode_page(response: &HttpResponse) -> ApiResult<PageData<T>> {
        let envelope = decode_envelope::<PageData<T>>(response)?;
        match envelope.data {
            Some(page) if envelope.status_code == 200 => Ok(page),
            _ => Err(application_error(
                envelope.status_code,
                envelope.message,
                "Failed to fetch data",
            )),
        }
    }

    // Stale rows are never kept next to an error.
    fn fail(&mut self, error: &ApiError) {
        tracing::warn!(endpoint = %self.endpoint, error = %error, "fetch failed");
        self.state.error = Some(error.to_string());
        self.state.data.clear();
        self.state.total_elements = 0;
        self.state.loading = false;
        self.pagination.set_total_pages(1);
    }
}

/// Something that can reload itself after a mutation.
pub trait Refresh {
    fn refresh(&mut self) -> impl Future<Output = ()>;
}

/// Refresher that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRefresh;

impl Refresh for NoRefresh {
    fn refresh(&mut self) -> impl Future<Output = ()> {
        async {}
    }
}

impl<T, S, K> Refresh for RemoteCollection<T, S, K>
where
    T: DeserializeOwned,
    S: FieldName,
    K: FieldName,
{
    fn refresh(&mut self) -> impl Future<Output = ()> {
        self.refetch()
    }
}
