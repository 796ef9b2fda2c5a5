use crate::error::FilterError;
use crate::models::PropertyRecord;
use serde::{Deserialize, Serialize};

/// Page size used when neither the filter nor the settings supply one
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Largest page a single query may return; larger limits are clamped
pub const MAX_PAGE_SIZE: usize = 200;

/// Filter and pagination parameters for a listings query
///
/// Every field is optional; a missing field places no constraint on that
/// dimension.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QueryFilter {
    /// Case-insensitive substring of the location string
    pub location: Option<String>,
    /// Inclusive lower price bound (INR)
    pub min_price: Option<u64>,
    /// Inclusive upper price bound (INR)
    pub max_price: Option<u64>,
    /// Exact number of bedrooms
    pub bedrooms: Option<u32>,
    /// Exact featured flag
    pub featured: Option<bool>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn min_price(mut self, price: u64) -> Self {
        self.min_price = Some(price);
        self
    }

    pub fn max_price(mut self, price: u64) -> Self {
        self.max_price = Some(price);
        self
    }

    pub fn bedrooms(mut self, bedrooms: u32) -> Self {
        self.bedrooms = Some(bedrooms);
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// The location constraint, ignoring blank strings
    pub fn location_term(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    /// Check the filter and resolve its pagination window.
    pub fn resolve(&self, default_limit: usize) -> Result<Pagination, FilterError> {
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(FilterError::InvertedPriceRange { min, max });
            }
        }

        let limit = match self.limit {
            Some(0) => return Err(FilterError::ZeroLimit),
            Some(limit) => limit,
            None => default_limit.max(1),
        };

        Ok(Pagination {
            limit: limit.min(MAX_PAGE_SIZE),
            offset: self.offset.unwrap_or(0),
        })
    }
}

/// A validated pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: usize,
    pub offset: usize,
}

impl Pagination {
    /// Exclusive end index of the window, saturating on overflow
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.limit)
    }

    /// Slice `items` down to this window
    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let start = self.offset.min(items.len());
        let end = self.end().min(items.len());
        items[start..end].to_vec()
    }
}

/// One page of query results
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QueryResult {
    pub properties: Vec<PropertyRecord>,
    /// Number of matches before pagination
    pub total: usize,
}

impl QueryResult {
    pub fn empty() -> Self {
        Self::default()
    }
}
