//! Listing data access over the fixture set and the remote provider.

use crate::config::Settings;
use crate::error::{FilterError, RemoteError};
use crate::generation::{QueryGenerations, QueryTicket};
use crate::models::{DataSource, PropertyRecord};
use crate::sources::demo_adapter::{self, DemoAdapter};
use crate::sources::fixture::{filter_records, fixtures};
use crate::sources::payload::ListResponse;
use crate::sources::types::{Pagination, QueryFilter, QueryResult};
use crate::sources::{ListingsTransport, RealtyClient};
use anyhow::Result;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Number of records `get_featured` returns when the caller has no preference
pub const DEFAULT_FEATURED_LIMIT: usize = 4;

/// Notified about how each query was served.
///
/// Remote failures are hidden from callers of [`PropertyRepository::query`];
/// this is where they stay visible to operators.
pub trait QueryObserver: Send + Sync {
    /// The remote path failed and fixture data is being served instead
    fn on_fallback(&self, error: &RemoteError, filter: &QueryFilter);

    /// A query completed; `served_by` is the source that produced `result`
    fn on_served(&self, _served_by: DataSource, _filter: &QueryFilter, _result: &QueryResult) {}
}

/// Default observer: structured log lines through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl QueryObserver for TracingObserver {
    fn on_fallback(&self, error: &RemoteError, filter: &QueryFilter) {
        warn!(
            error = %error,
            kind = error.kind(),
            location = ?filter.location,
            "Remote listings unavailable, serving fixture data"
        );
    }

    fn on_served(&self, served_by: DataSource, filter: &QueryFilter, result: &QueryResult) {
        debug!(
            source = %served_by,
            location = ?filter.location,
            returned = result.properties.len(),
            total = result.total,
            "Query served"
        );
    }
}

/// Entry point for listing queries
pub struct PropertyRepository {
    source: DataSource,
    page_size: usize,
    transport: Arc<dyn ListingsTransport>,
    adapter: DemoAdapter,
    observer: Arc<dyn QueryObserver>,
}

impl PropertyRepository {
    /// Create a repository over `transport`, starting in fixture mode
    pub fn new(transport: Arc<dyn ListingsTransport>) -> Self {
        Self {
            source: DataSource::Fixture,
            page_size: crate::sources::types::DEFAULT_PAGE_SIZE,
            transport,
            adapter: DemoAdapter::default(),
            observer: Arc::new(TracingObserver),
        }
    }

    /// Create a repository backed by the Realty API client
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = RealtyClient::new(settings.remote.clone())?;
        info!(
            source = %settings.source,
            provider = client.provider_name(),
            "Listings repository ready"
        );

        Ok(Self::new(Arc::new(client))
            .with_source(settings.source)
            .with_page_size(settings.page_size)
            .with_adapter(DemoAdapter::new(settings.adapter)))
    }

    pub fn with_source(mut self, source: DataSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_adapter(mut self, adapter: DemoAdapter) -> Self {
        self.adapter = adapter;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn QueryObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The data source new queries will use
    pub fn source(&self) -> DataSource {
        self.source
    }

    /// Switch the data source for subsequent queries
    pub fn set_source(&mut self, source: DataSource) {
        if self.source != source {
            info!(from = %self.source, to = %source, "Switching listings source");
        }
        self.source = source;
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Run a filtered, paginated query against the active source.
    ///
    /// Remote failures never surface here: the fixture result for the same
    /// filter is returned instead and the observer is told. The only error is
    /// a filter that cannot be executed.
    pub async fn query(&self, filter: &QueryFilter) -> Result<QueryResult, FilterError> {
        self.query_with_source(filter, self.source).await
    }

    /// Run a query against `source` regardless of the active mode
    pub async fn query_with_source(
        &self,
        filter: &QueryFilter,
        source: DataSource,
    ) -> Result<QueryResult, FilterError> {
        let page = filter.resolve(self.page_size)?;

        let (served_by, result) = match source {
            DataSource::Fixture => (DataSource::Fixture, self.fixture_query(filter, page)),
            DataSource::Remote => match self.remote_query(filter, page).await {
                Ok(result) => (DataSource::Remote, result),
                Err(e) => {
                    self.observer.on_fallback(&e, filter);
                    (DataSource::Fixture, self.fixture_query(filter, page))
                }
            },
        };

        self.observer.on_served(served_by, filter, &result);
        Ok(result)
    }

    /// Run `query` under `ticket`; `None` if a newer ticket was issued meanwhile
    pub async fn query_if_current(
        &self,
        generations: &QueryGenerations,
        ticket: QueryTicket,
        filter: &QueryFilter,
    ) -> Result<Option<QueryResult>, FilterError> {
        let result = self.query(filter).await?;
        if generations.is_current(ticket) {
            Ok(Some(result))
        } else {
            debug!(
                generation = ticket.generation(),
                "Discarding superseded query result"
            );
            Ok(None)
        }
    }

    /// Look up a fixture record by id
    pub fn get_by_id(&self, id: &str) -> Option<PropertyRecord> {
        fixtures().iter().find(|p| p.id == id).cloned()
    }

    /// Up to `limit` featured fixture records, in fixture order
    pub fn get_featured(&self, limit: usize) -> Vec<PropertyRecord> {
        fixtures()
            .iter()
            .filter(|p| p.featured)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Fixture records whose title, location or description contains `text`
    pub fn search_by_text(&self, text: &str) -> Vec<PropertyRecord> {
        let needle = text.trim().to_lowercase();
        fixtures()
            .iter()
            .filter(|p| p.mentions(&needle))
            .cloned()
            .collect()
    }

    /// First page of records at `location` from the active source
    pub async fn get_by_location(&self, location: &str) -> Result<Vec<PropertyRecord>, FilterError> {
        let filter = QueryFilter::new().location(location);
        Ok(self.query(&filter).await?.properties)
    }

    fn fixture_query(&self, filter: &QueryFilter, page: Pagination) -> QueryResult {
        filter_records(fixtures(), filter, page)
    }

    async fn remote_query(
        &self,
        filter: &QueryFilter,
        page: Pagination,
    ) -> Result<QueryResult, RemoteError> {
        let request = demo_adapter::build_request(filter, page, self.adapter.settings());
        let response = self.transport.list(&request).await?;
        Ok(self.normalize_response(&response, filter, page))
    }

    fn normalize_response(
        &self,
        response: &ListResponse,
        filter: &QueryFilter,
        page: Pagination,
    ) -> QueryResult {
        let mut rng = rand::rng();
        let mut seen = HashSet::new();

        let properties: Vec<PropertyRecord> = response
            .results()
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                self.adapter
                    .normalize(raw, index, filter.location_term(), &mut rng)
            })
            .filter(|record| seen.insert(record.id.clone()))
            .collect();

        let total = response.total().unwrap_or(properties.len());
        debug!(
            received = response.results().len(),
            normalized = properties.len(),
            total,
            "Normalized remote listings"
        );

        QueryResult {
            properties: properties.into_iter().take(page.limit).collect(),
            total,
        }
    }
}
