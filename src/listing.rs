//! Helpers for presenting query results: client-side sort orders, page
//! arithmetic and display formatting.

use crate::models::PropertyRecord;
use crate::sources::types::QueryFilter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Listing pages show this many cards
pub const LISTING_PAGE_SIZE: usize = 9;

/// Client-side ordering applied to a page of results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Keep the order the source returned
    #[default]
    Newest,
    PriceLow,
    PriceHigh,
    SizeLarge,
    SizeSmall,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::PriceLow => "price-low",
            SortOrder::PriceHigh => "price-high",
            SortOrder::SizeLarge => "size-large",
            SortOrder::SizeSmall => "size-small",
        }
    }

    /// Sort `properties` in place. Ties keep their incoming order.
    pub fn apply(&self, properties: &mut [PropertyRecord]) {
        match self {
            SortOrder::Newest => {}
            SortOrder::PriceLow => properties.sort_by_key(|p| p.price),
            SortOrder::PriceHigh => properties.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::SizeLarge => properties.sort_by(|a, b| b.size.cmp(&a.size)),
            SortOrder::SizeSmall => properties.sort_by_key(|p| p.size),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "newest" => Ok(SortOrder::Newest),
            "price-low" => Ok(SortOrder::PriceLow),
            "price-high" => Ok(SortOrder::PriceHigh),
            "size-large" => Ok(SortOrder::SizeLarge),
            "size-small" => Ok(SortOrder::SizeSmall),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

/// A 1-based page of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub per_page: usize,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: LISTING_PAGE_SIZE,
        }
    }
}

impl PageWindow {
    /// Page numbers below 1 are treated as 1, and `per_page` as at least 1
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.per_page)
    }

    /// Copy of `filter` restricted to this page
    pub fn to_filter(&self, filter: &QueryFilter) -> QueryFilter {
        filter.clone().limit(self.per_page).offset(self.offset())
    }
}

/// Format a rupee amount with Indian digit grouping, e.g. `₹12,50,00,000`
pub fn format_price(price: u64) -> String {
    let digits = price.to_string();
    if digits.len() <= 3 {
        return format!("₹{}", digits);
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("₹{},{}", groups.join(","), tail)
}

/// Format an area in square meters
pub fn format_area(size: u32) -> String {
    format!("{} sq.m.", size)
}
