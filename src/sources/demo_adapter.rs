//! Demo adapter: fits the US listings provider onto the Indian-market schema.
//!
//! Everything in here is presentation glue for a mismatched dataset. The
//! currency conversion is a fixed approximate rate, city names are mapped to
//! arbitrary US postal codes, and missing fields are filled with plausible
//! random values. None of it is market data and none of it should be read as
//! financially meaningful.

use crate::models::{Coordinates, PropertyRecord};
use crate::sources::payload::{ListRequest, PriceRange, RawListing};
use crate::sources::types::{Pagination, QueryFilter};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Postal code used when the requested city is not in [`LOCALITIES`]
pub const DEFAULT_LOCALITY: &str = "90004";

/// City name to provider locality key
pub const LOCALITIES: &[(&str, &str)] = &[
    ("mumbai", "90210"),
    ("delhi", "10001"),
    ("bangalore", "94102"),
    ("goa", "33139"),
    ("pune", "78701"),
    ("hyderabad", "98101"),
    ("chennai", "02101"),
    ("kolkata", "19103"),
];

const SUB_AREAS: &[(&str, &[&str])] = &[
    ("mumbai", &["Bandra West", "Juhu", "Andheri", "Powai", "Lower Parel"]),
    ("delhi", &["Connaught Place", "Karol Bagh", "Lajpat Nagar", "Dwarka", "Gurgaon"]),
    ("bangalore", &["Koramangala", "Indiranagar", "Whitefield", "Electronic City", "HSR Layout"]),
    ("goa", &["Candolim", "Calangute", "Anjuna", "Panjim", "Margao"]),
    ("pune", &["Koregaon Park", "Hinjewadi", "Baner", "Kothrud", "Viman Nagar"]),
];

/// Sub-area for a known city that has no list in [`SUB_AREAS`]
const CENTRAL_AREA: &[&str] = &["Central Area"];

const AMENITY_CATALOG: &[&str] = &[
    "Swimming Pool",
    "Gym",
    "Parking",
    "Security",
    "Garden",
    "Clubhouse",
    "Children's Play Area",
    "Elevator",
    "Power Backup",
    "Water Supply",
    "Intercom",
    "Maintenance Staff",
    "CCTV",
    "Fire Safety",
    "Vastu Compliant",
];

pub const PLACEHOLDER_IMAGES: [&str; 3] = [
    "https://images.pexels.com/photos/1571460/pexels-photo-1571460.jpeg",
    "https://images.pexels.com/photos/1643383/pexels-photo-1643383.jpeg",
    "https://images.pexels.com/photos/1669799/pexels-photo-1669799.jpeg",
];

const DEFAULT_COORDINATES: Coordinates = Coordinates {
    lat: 19.0760,
    lng: 72.8777,
};

const DEFAULT_PROVIDER_PRICE: f64 = 1_000_000.0;
const SQFT_TO_SQM: f64 = 0.092903;
const FEATURED_PROBABILITY: f64 = 0.3;

/// Conversion constants for the demo adapter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdapterSettings {
    /// Rupees per provider dollar
    pub usd_to_inr: f64,
    /// Extra multiplier applied after currency conversion
    pub market_adjustment: f64,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            usd_to_inr: 83.0,
            market_adjustment: 1.5,
        }
    }
}

impl AdapterSettings {
    fn factor(&self) -> f64 {
        self.usd_to_inr * self.market_adjustment
    }

    /// Provider price (USD) to displayed price (INR), floored
    pub fn to_local_price(&self, provider_price: f64) -> u64 {
        let converted = (provider_price * self.factor()).floor();
        if converted.is_finite() && converted > 0.0 {
            converted as u64
        } else {
            0
        }
    }

    /// Displayed price (INR) back to provider price (USD).
    /// `round_up` selects ceiling for upper bounds so the bound stays inclusive.
    pub fn to_provider_price(&self, local_price: u64, round_up: bool) -> u64 {
        let factor = self.factor();
        if !(factor.is_finite() && factor > 0.0) {
            return local_price;
        }
        let raw = local_price as f64 / factor;
        if round_up {
            raw.ceil() as u64
        } else {
            raw.floor() as u64
        }
    }
}

/// Known city named by a free-text location: exact match first, then the
/// first known city contained in the text.
fn known_city(location: &str) -> Option<&'static str> {
    let needle = location.trim().to_lowercase();
    LOCALITIES
        .iter()
        .find(|(city, _)| *city == needle)
        .or_else(|| LOCALITIES.iter().find(|(city, _)| needle.contains(city)))
        .map(|(city, _)| *city)
}

/// Provider locality key for a free-text location
pub fn locality_for(location: Option<&str>) -> &'static str {
    location
        .and_then(known_city)
        .and_then(|city| LOCALITIES.iter().find(|(c, _)| *c == city))
        .map_or(DEFAULT_LOCALITY, |(_, code)| *code)
}

/// Translate a query into the provider's request shape
pub fn build_request(
    filter: &QueryFilter,
    page: Pagination,
    settings: &AdapterSettings,
) -> ListRequest {
    let mut request = ListRequest::new(locality_for(filter.location_term()), page.limit, page.offset);

    let min = filter.min_price.map(|p| settings.to_provider_price(p, false));
    let max = filter.max_price.map(|p| settings.to_provider_price(p, true));
    if min.is_some() || max.is_some() {
        request.price = Some(PriceRange { min, max });
    }

    request
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn tag_to_amenity(tag: &str) -> String {
    tag.split('_')
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalizes raw provider listings into [`PropertyRecord`]s
#[derive(Debug, Clone, Default)]
pub struct DemoAdapter {
    settings: AdapterSettings,
}

impl DemoAdapter {
    pub fn new(settings: AdapterSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AdapterSettings {
        &self.settings
    }

    /// Build one record. `index` is the listing's position in the response,
    /// used for the fallback id; `requested_location` is the filter's location.
    pub fn normalize<R: Rng>(
        &self,
        raw: &RawListing,
        index: usize,
        requested_location: Option<&str>,
        rng: &mut R,
    ) -> PropertyRecord {
        let description = raw.description.clone().unwrap_or_default();
        let address = raw
            .location
            .as_ref()
            .and_then(|l| l.address.clone())
            .unwrap_or_default();

        let id = raw
            .property_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format!("api-{}", index));

        let title = description
            .name
            .clone()
            .or_else(|| address.line.clone())
            .unwrap_or_else(|| "Property".to_string());

        let provider_price = raw
            .list_price
            .or(raw.price)
            .unwrap_or(DEFAULT_PROVIDER_PRICE);

        // Zero, negative or missing counts are all treated as absent
        let size = match positive(description.sqft) {
            Some(sqft) => ((sqft * SQFT_TO_SQM).round() as u32).max(1),
            None => rng.random_range(50..250),
        };
        let bedrooms = match positive(description.beds).map(|b| b.round() as u32) {
            Some(beds) if beds > 0 => beds,
            _ => rng.random_range(1..=4),
        };
        let bathrooms = match positive(description.baths).map(|b| b.round() as u32) {
            Some(baths) if baths > 0 => baths,
            _ => rng.random_range(1..=3),
        };

        let coordinates = address
            .coordinate
            .and_then(|c| Some(Coordinates { lat: c.lat?, lng: c.lon? }))
            .unwrap_or(DEFAULT_COORDINATES);

        PropertyRecord {
            id,
            title,
            location: self.display_location(&address.line, &address.city, requested_location, rng),
            price: self.settings.to_local_price(provider_price),
            size,
            bedrooms,
            bathrooms,
            description: description
                .text
                .unwrap_or_else(|| "Beautiful property in prime location".to_string()),
            amenities: self.amenities(raw.tags.as_deref(), rng),
            images: images(raw),
            featured: rng.random_bool(FEATURED_PROBABILITY),
            coordinates,
        }
    }

    fn display_location<R: Rng>(
        &self,
        line: &Option<String>,
        city: &Option<String>,
        requested_location: Option<&str>,
        rng: &mut R,
    ) -> String {
        if let Some(known) = requested_location.and_then(known_city) {
            let areas = SUB_AREAS
                .iter()
                .find(|(c, _)| *c == known)
                .map_or(CENTRAL_AREA, |(_, areas)| *areas);
            if let Some(area) = areas.choose(rng) {
                return format!("{}, {}", area, capitalize(known));
            }
        }

        match (line, city) {
            (Some(line), Some(city)) => format!("{}, {}", line, city),
            (Some(line), None) => line.clone(),
            _ => "Prime Location, India".to_string(),
        }
    }

    fn amenities<R: Rng>(&self, tags: Option<&[String]>, rng: &mut R) -> Vec<String> {
        if let Some(tags) = tags.filter(|t| !t.is_empty()) {
            return tags.iter().map(|t| tag_to_amenity(t)).collect();
        }

        let count = rng.random_range(3..=8);
        let mut catalog = AMENITY_CATALOG.to_vec();
        catalog.shuffle(rng);
        catalog.into_iter().take(count).map(str::to_string).collect()
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

fn images(raw: &RawListing) -> Vec<String> {
    let primary = raw
        .primary_photo
        .as_ref()
        .and_then(|p| p.href.as_deref())
        .filter(|href| !href.is_empty());

    match primary {
        Some(href) => std::iter::once(href)
            .chain(PLACEHOLDER_IMAGES.iter().skip(1).copied())
            .map(str::to_string)
            .collect(),
        None => PLACEHOLDER_IMAGES.iter().map(|s| s.to_string()).collect(),
    }
}
