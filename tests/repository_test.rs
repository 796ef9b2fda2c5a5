//! Repository-level tests for listing queries
//!
//! These tests drive `PropertyRepository` end to end:
//! - Fixture filtering, pagination and convenience lookups
//! - Remote normalization through an in-process fake transport
//! - Silent fallback to fixture data when the remote path fails

use async_trait::async_trait;
use estate_listings::config::{RemoteSettings, Settings};
use estate_listings::sources::payload::{ListRequest, ListResponse};
use estate_listings::sources::ListingsTransport;
use estate_listings::{
    DataSource, FilterError, PropertyRecord, PropertyRepository, QueryFilter, QueryGenerations,
    QueryObserver, QueryResult, RemoteError,
};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Transport that answers every request with a canned JSON payload
struct CannedTransport {
    payload: Value,
    requests: Mutex<Vec<ListRequest>>,
}

impl CannedTransport {
    fn new(payload: Value) -> Arc<Self> {
        Arc::new(Self {
            payload,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<ListRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ListingsTransport for CannedTransport {
    async fn list(&self, request: &ListRequest) -> Result<ListResponse, RemoteError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(serde_json::from_value(self.payload.clone())?)
    }

    fn provider_name(&self) -> &'static str {
        "canned"
    }
}

/// Transport that always fails the way a provider outage would
struct FailingTransport {
    status: u16,
}

#[async_trait]
impl ListingsTransport for FailingTransport {
    async fn list(&self, _request: &ListRequest) -> Result<ListResponse, RemoteError> {
        Err(RemoteError::Status {
            status: self.status,
            body: "upstream unavailable".to_string(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "failing"
    }
}

#[derive(Default)]
struct RecordingObserver {
    fallbacks: Mutex<Vec<&'static str>>,
    served: Mutex<Vec<DataSource>>,
}

impl QueryObserver for RecordingObserver {
    fn on_fallback(&self, error: &RemoteError, _filter: &QueryFilter) {
        self.fallbacks.lock().unwrap().push(error.kind());
    }

    fn on_served(&self, served_by: DataSource, _filter: &QueryFilter, _result: &QueryResult) {
        self.served.lock().unwrap().push(served_by);
    }
}

fn fixture_repo() -> PropertyRepository {
    PropertyRepository::new(Arc::new(FailingTransport { status: 500 }))
}

fn remote_repo(transport: Arc<dyn ListingsTransport>) -> (PropertyRepository, Arc<RecordingObserver>) {
    let observer = Arc::new(RecordingObserver::default());
    let repo = PropertyRepository::new(transport)
        .with_source(DataSource::Remote)
        .with_observer(observer.clone());
    (repo, observer)
}

fn ids(properties: &[PropertyRecord]) -> Vec<&str> {
    properties.iter().map(|p| p.id.as_str()).collect()
}

fn provider_payload() -> Value {
    json!({
        "data": {
            "home_search": {
                "total": 312,
                "results": [
                    {
                        "property_id": "1001",
                        "list_price": 750000,
                        "description": {"name": "Canyon House", "beds": 4, "baths": 3, "sqft": 2200, "text": "Hillside views"},
                        "location": {"address": {"line": "9 Canyon Rd", "city": "Beverly Hills", "coordinate": {"lat": 34.09, "lon": -118.41}}},
                        "primary_photo": {"href": "https://ap.rdcpix.com/1001.jpg"}
                    },
                    {
                        "property_id": "1002",
                        "list_price": 420000
                    },
                    {
                        "list_price": 390000
                    },
                    {
                        "property_id": "1001",
                        "list_price": 999999
                    }
                ]
            }
        }
    })
}

// ---------------------------------------------------------------------------
// Fixture source
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_unconstrained_query_counts_every_fixture() {
    let repo = fixture_repo();
    let result = repo.query(&QueryFilter::new()).await.unwrap();

    assert_eq!(result.total, 8);
    assert_eq!(result.properties.len(), 8);
    assert_eq!(ids(&result.properties), vec!["1", "2", "3", "4", "5", "6", "7", "8"]);
}

#[tokio::test]
async fn test_default_limit_caps_page_length() {
    let repo = fixture_repo().with_page_size(3);
    let result = repo.query(&QueryFilter::new()).await.unwrap();

    assert_eq!(result.properties.len(), 3);
    assert_eq!(result.total, 8);
}

#[tokio::test]
async fn test_page_length_never_exceeds_limit() {
    let repo = fixture_repo();
    for limit in 1..=10 {
        for offset in 0..=9 {
            let filter = QueryFilter::new().limit(limit).offset(offset);
            let result = repo.query(&filter).await.unwrap();
            assert!(result.properties.len() <= limit);
            assert_eq!(result.total, 8);
        }
    }
}

#[tokio::test]
async fn test_mumbai_scenario() {
    let repo = fixture_repo();
    let filter = QueryFilter::new().location("Mumbai").limit(2).offset(0);
    let result = repo.query(&filter).await.unwrap();

    assert_eq!(result.total, 1);
    assert_eq!(result.properties.len(), 1);
    assert_eq!(result.properties[0].title, "Luxury Sky Residence");
}

#[tokio::test]
async fn test_two_bedroom_featured_scenario() {
    let repo = fixture_repo();

    let expected: Vec<PropertyRecord> = repo
        .query(&QueryFilter::new())
        .await
        .unwrap()
        .properties
        .into_iter()
        .filter(|p| p.bedrooms == 2 && p.featured)
        .collect();
    assert_eq!(ids(&expected), vec!["1"]);

    for limit in [1, 5, 50] {
        let filter = QueryFilter::new().bedrooms(2).featured(true).limit(limit);
        let result = repo.query(&filter).await.unwrap();
        assert_eq!(result.total, expected.len());
        assert_eq!(result.properties, expected);
    }
}

#[tokio::test]
async fn test_pagination_concatenates_consistently() {
    let repo = fixture_repo();
    let base = QueryFilter::new().location("a");

    for n in 1..=4 {
        for m in 1..=4 {
            let first = repo.query(&base.clone().offset(0).limit(n)).await.unwrap();
            let second = repo.query(&base.clone().offset(n).limit(m)).await.unwrap();
            let whole = repo.query(&base.clone().offset(0).limit(n + m)).await.unwrap();

            let mut joined = first.properties.clone();
            joined.extend(second.properties);
            assert_eq!(joined, whole.properties, "n={} m={}", n, m);
        }
    }
}

#[tokio::test]
async fn test_identical_queries_are_idempotent() {
    let repo = fixture_repo();
    let filter = QueryFilter::new().min_price(90_000_000).limit(4);

    let first = repo.query(&filter).await.unwrap();
    let second = repo.query(&filter).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_price_bounds_are_inclusive() {
    let repo = fixture_repo();

    let at_min = repo
        .query(&QueryFilter::new().min_price(200_000_000))
        .await
        .unwrap();
    assert_eq!(ids(&at_min.properties), vec!["5"]);

    let at_max = repo
        .query(&QueryFilter::new().max_price(85_000_000))
        .await
        .unwrap();
    assert_eq!(ids(&at_max.properties), vec!["6"]);

    let exact = repo
        .query(&QueryFilter::new().min_price(110_000_000).max_price(110_000_000))
        .await
        .unwrap();
    assert_eq!(ids(&exact.properties), vec!["7"]);
}

#[tokio::test]
async fn test_offset_past_the_end_keeps_total() {
    let repo = fixture_repo();
    let result = repo
        .query(&QueryFilter::new().featured(true).offset(100))
        .await
        .unwrap();

    assert!(result.properties.is_empty());
    assert_eq!(result.total, 4);
}

#[tokio::test]
async fn test_invalid_filters_are_rejected() {
    let repo = fixture_repo();

    let zero = repo.query(&QueryFilter::new().limit(0)).await;
    assert_eq!(zero, Err(FilterError::ZeroLimit));

    let inverted = repo
        .query(&QueryFilter::new().min_price(2).max_price(1))
        .await;
    assert_eq!(
        inverted,
        Err(FilterError::InvertedPriceRange { min: 2, max: 1 })
    );
}

#[tokio::test]
async fn test_get_by_id() {
    let repo = fixture_repo();

    let found = repo.get_by_id("4").unwrap();
    assert_eq!(found.title, "Beachfront Villa");
    assert!(repo.get_by_id("404").is_none());
}

#[tokio::test]
async fn test_get_featured_preserves_fixture_order() {
    let repo = fixture_repo();

    assert_eq!(ids(&repo.get_featured(4)), vec!["1", "2", "4", "8"]);
    assert_eq!(ids(&repo.get_featured(2)), vec!["1", "2"]);
    assert!(repo.get_featured(0).is_empty());
}

#[tokio::test]
async fn test_search_by_text_matches_any_field() {
    let repo = fixture_repo();

    // title
    assert_eq!(ids(&repo.search_by_text("haveli")), vec!["5"]);
    // location
    assert_eq!(ids(&repo.search_by_text("KERALA")), vec!["8"]);
    // description
    assert_eq!(ids(&repo.search_by_text("venture capital")), vec!["7"]);
    // location and description of two records
    assert_eq!(ids(&repo.search_by_text("bangalore")), vec!["3", "7"]);

    assert!(repo.search_by_text("igloo").is_empty());
    assert_eq!(repo.search_by_text("").len(), 8);
}

#[tokio::test]
async fn test_get_by_location() {
    let repo = fixture_repo();
    let properties = repo.get_by_location("goa").await.unwrap();
    assert_eq!(ids(&properties), vec!["4"]);
}

// ---------------------------------------------------------------------------
// Source selection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_source_switching() {
    let transport = CannedTransport::new(provider_payload());
    let mut repo = PropertyRepository::new(transport.clone());
    assert_eq!(repo.source(), DataSource::Fixture);

    repo.query(&QueryFilter::new()).await.unwrap();
    assert!(transport.requests().is_empty());

    repo.set_source(DataSource::Remote);
    assert_eq!(repo.source(), DataSource::Remote);
    let result = repo.query(&QueryFilter::new()).await.unwrap();
    assert_eq!(result.total, 312);
    assert_eq!(transport.requests().len(), 1);

    let fixture = repo
        .query_with_source(&QueryFilter::new(), DataSource::Fixture)
        .await
        .unwrap();
    assert_eq!(fixture.total, 8);
    assert_eq!(repo.source(), DataSource::Remote);
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_settings_select_initial_source() {
    let settings = Settings {
        source: DataSource::Remote,
        page_size: 5,
        ..Settings::default()
    };
    let repo = PropertyRepository::from_settings(&settings).unwrap();

    assert_eq!(repo.source(), DataSource::Remote);
    assert_eq!(repo.page_size(), 5);
}

// ---------------------------------------------------------------------------
// Remote source
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_remote_request_translation() {
    let transport = CannedTransport::new(provider_payload());
    let (repo, _) = remote_repo(transport.clone());

    let filter = QueryFilter::new()
        .location("Delhi")
        .max_price(249_000_000)
        .limit(3)
        .offset(6);
    repo.query(&filter).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let body = serde_json::to_value(&requests[0]).unwrap();
    assert_eq!(
        body,
        json!({
            "limit": 3,
            "offset": 6,
            "postal_code": "10001",
            "status": ["for_sale", "ready_to_build"],
            "sort": {"direction": "desc", "field": "list_date"},
            "price": {"max": 2_000_000}
        })
    );
}

#[tokio::test]
async fn test_remote_unknown_location_uses_default_locality() {
    let transport = CannedTransport::new(provider_payload());
    let (repo, _) = remote_repo(transport.clone());

    repo.query(&QueryFilter::new().location("Atlantis"))
        .await
        .unwrap();
    assert_eq!(transport.requests()[0].postal_code, "90004");
}

#[tokio::test]
async fn test_remote_results_are_normalized() {
    let transport = CannedTransport::new(provider_payload());
    let (repo, observer) = remote_repo(transport);

    let result = repo.query(&QueryFilter::new()).await.unwrap();

    assert_eq!(result.total, 312);
    // the repeated "1001" is dropped
    assert_eq!(ids(&result.properties), vec!["1001", "1002", "api-2"]);

    let ids_seen: HashSet<_> = result.properties.iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids_seen.len(), result.properties.len());
    assert!(result.properties.iter().all(|p| !p.images.is_empty()));

    let canyon = &result.properties[0];
    assert_eq!(canyon.title, "Canyon House");
    assert_eq!(canyon.location, "9 Canyon Rd, Beverly Hills");
    assert_eq!(canyon.price, 93_375_000);
    assert_eq!(canyon.size, 204);
    assert_eq!(canyon.bedrooms, 4);
    assert_eq!(canyon.bathrooms, 3);
    assert_eq!(canyon.images[0], "https://ap.rdcpix.com/1001.jpg");

    assert!(observer.fallbacks.lock().unwrap().is_empty());
    assert_eq!(*observer.served.lock().unwrap(), vec![DataSource::Remote]);
}

#[tokio::test]
async fn test_remote_known_city_hides_provider_address() {
    for (city, postal_code) in [("Chennai", "02101"), ("Hyderabad", "98101"), ("Kolkata", "19103")] {
        let transport = CannedTransport::new(provider_payload());
        let (repo, _) = remote_repo(transport.clone());

        let result = repo.query(&QueryFilter::new().location(city)).await.unwrap();

        assert_eq!(transport.requests()[0].postal_code, postal_code);
        for property in &result.properties {
            assert_eq!(property.location, format!("Central Area, {}", city));
        }
    }
}

#[tokio::test]
async fn test_remote_results_respect_limit() {
    let transport = CannedTransport::new(provider_payload());
    let (repo, _) = remote_repo(transport);

    let result = repo.query(&QueryFilter::new().limit(2)).await.unwrap();
    assert_eq!(result.properties.len(), 2);
    assert_eq!(result.total, 312);
}

#[tokio::test]
async fn test_remote_total_defaults_to_record_count() {
    let transport = CannedTransport::new(json!({
        "data": {"home_search": {"results": [{"property_id": "a"}, {"property_id": "b"}]}}
    }));
    let (repo, _) = remote_repo(transport);

    let result = repo.query(&QueryFilter::new()).await.unwrap();
    assert_eq!(result.total, 2);
}

#[tokio::test]
async fn test_remote_empty_payload_is_an_empty_result() {
    let transport = CannedTransport::new(json!({}));
    let (repo, observer) = remote_repo(transport);

    let result = repo.query(&QueryFilter::new()).await.unwrap();
    assert_eq!(result, QueryResult::empty());
    assert!(observer.fallbacks.lock().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_remote_failure_falls_back_to_fixture_result() {
    let (repo, observer) = remote_repo(Arc::new(FailingTransport { status: 503 }));
    let filter = QueryFilter::new().location("Bangalore").limit(1);

    let result = repo.query(&filter).await.unwrap();
    let expected = repo
        .query_with_source(&filter, DataSource::Fixture)
        .await
        .unwrap();

    assert_eq!(result, expected);
    assert_eq!(result.total, 2);
    assert_eq!(*observer.fallbacks.lock().unwrap(), vec!["status"]);
    assert_eq!(
        *observer.served.lock().unwrap(),
        vec![DataSource::Fixture, DataSource::Fixture]
    );
}

#[tokio::test]
async fn test_malformed_payload_falls_back() {
    let transport = CannedTransport::new(json!({"data": {"home_search": {"total": "many"}}}));
    let (repo, observer) = remote_repo(transport);

    let result = repo.query(&QueryFilter::new().featured(true)).await.unwrap();
    assert_eq!(result.total, 4);
    assert_eq!(*observer.fallbacks.lock().unwrap(), vec!["malformed"]);
}

#[tokio::test]
async fn test_missing_api_key_falls_back_without_network() {
    let settings = Settings {
        source: DataSource::Remote,
        remote: RemoteSettings {
            api_key: None,
            base_url: "http://127.0.0.1:9".to_string(),
            ..RemoteSettings::default()
        },
        ..Settings::default()
    };
    let observer = Arc::new(RecordingObserver::default());
    let repo = PropertyRepository::from_settings(&settings)
        .unwrap()
        .with_observer(observer.clone());

    let result = repo.query(&QueryFilter::new().location("Mumbai")).await.unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(*observer.fallbacks.lock().unwrap(), vec!["missing_api_key"]);
}

// ---------------------------------------------------------------------------
// Superseded queries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_superseded_query_is_discarded() {
    let repo = fixture_repo();
    let generations = QueryGenerations::new();

    let stale = generations.issue();
    let fresh = generations.issue();

    let filter = QueryFilter::new().location("Goa");
    let dropped = repo
        .query_if_current(&generations, stale, &filter)
        .await
        .unwrap();
    assert!(dropped.is_none());

    let kept = repo
        .query_if_current(&generations, fresh, &filter)
        .await
        .unwrap();
    assert_eq!(kept.map(|r| r.total), Some(1));
}
