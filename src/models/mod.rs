use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where listing data is served from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// The bundled in-memory listings
    #[default]
    Fixture,
    /// The third-party listings provider
    Remote,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Fixture => "fixture",
            DataSource::Remote => "remote",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixture" | "mock" => Ok(DataSource::Fixture),
            "remote" | "api" => Ok(DataSource::Remote),
            other => Err(format!(
                "unknown data source '{}', expected 'fixture' or 'remote'",
                other
            )),
        }
    }
}

/// Geographic position of a property
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Core property data model
///
/// Prices are whole rupees and sizes are square meters. `images` is never
/// empty for a record handed to a caller; the first entry is the primary image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyRecord {
    pub id: String,
    pub title: String,
    pub location: String,
    pub price: u64,
    pub size: u32,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub description: String,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub featured: bool,
    pub coordinates: Coordinates,
}

impl PropertyRecord {
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Case-insensitive substring match against title, location and description.
    /// `needle` must already be lowercased.
    pub(crate) fn mentions(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.location.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}
