//! Wire types for the Realty listings endpoint (`POST /properties/v3/list`).
//!
//! Response fields are all optional: the provider omits freely and the demo
//! adapter substitutes a value for anything missing.

use serde::{Deserialize, Serialize};

/// Listing statuses requested from the provider
pub const LISTING_STATUSES: [&str; 2] = ["for_sale", "ready_to_build"];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListRequest {
    pub limit: usize,
    pub offset: usize,
    pub postal_code: String,
    pub status: Vec<String>,
    pub sort: SortSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceRange>,
}

impl ListRequest {
    pub fn new(postal_code: impl Into<String>, limit: usize, offset: usize) -> Self {
        Self {
            limit,
            offset,
            postal_code: postal_code.into(),
            status: LISTING_STATUSES.iter().map(|s| s.to_string()).collect(),
            sort: SortSpec::newest_first(),
            price: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SortSpec {
    pub direction: String,
    pub field: String,
}

impl SortSpec {
    pub fn newest_first() -> Self {
        Self {
            direction: "desc".to_string(),
            field: "list_date".to_string(),
        }
    }
}

/// Price bounds in the provider's currency (USD)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub data: Option<ResponseData>,
}

impl ListResponse {
    pub fn results(&self) -> &[RawListing] {
        self.data
            .as_ref()
            .and_then(|d| d.home_search.as_ref())
            .and_then(|s| s.results.as_deref())
            .unwrap_or(&[])
    }

    pub fn total(&self) -> Option<usize> {
        self.data
            .as_ref()
            .and_then(|d| d.home_search.as_ref())
            .and_then(|s| s.total)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseData {
    #[serde(default)]
    pub home_search: Option<HomeSearch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HomeSearch {
    #[serde(default)]
    pub total: Option<usize>,
    #[serde(default)]
    pub results: Option<Vec<RawListing>>,
}

/// One listing as the provider sends it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListing {
    #[serde(default)]
    pub property_id: Option<String>,
    #[serde(default)]
    pub list_price: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<RawDescription>,
    #[serde(default)]
    pub location: Option<RawLocation>,
    #[serde(default)]
    pub primary_photo: Option<RawPhoto>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDescription {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub sqft: Option<f64>,
    #[serde(default)]
    pub beds: Option<f64>,
    #[serde(default)]
    pub baths: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLocation {
    #[serde(default)]
    pub address: Option<RawAddress>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAddress {
    #[serde(default)]
    pub line: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub coordinate: Option<RawCoordinate>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawCoordinate {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPhoto {
    #[serde(default)]
    pub href: Option<String>,
}
