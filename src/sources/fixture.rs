use crate::models::{Coordinates, PropertyRecord};
use crate::sources::types::{Pagination, QueryFilter, QueryResult};
use std::sync::OnceLock;

static FIXTURES: OnceLock<Vec<PropertyRecord>> = OnceLock::new();

/// The bundled listings, built once and shared for the process lifetime
pub fn fixtures() -> &'static [PropertyRecord] {
    FIXTURES.get_or_init(build_fixtures)
}

/// Run `filter` against `records`.
///
/// Constraints apply in a fixed order (location, min price, max price,
/// bedrooms, featured) and `total` counts matches before the window is cut.
pub fn filter_records(
    records: &[PropertyRecord],
    filter: &QueryFilter,
    page: Pagination,
) -> QueryResult {
    let location = filter.location_term().map(str::to_lowercase);

    let matches: Vec<PropertyRecord> = records
        .iter()
        .filter(|p| {
            location
                .as_deref()
                .map_or(true, |l| p.location.to_lowercase().contains(l))
        })
        .filter(|p| filter.min_price.map_or(true, |min| p.price >= min))
        .filter(|p| filter.max_price.map_or(true, |max| p.price <= max))
        .filter(|p| filter.bedrooms.map_or(true, |b| p.bedrooms == b))
        .filter(|p| filter.featured.map_or(true, |f| p.featured == f))
        .cloned()
        .collect();

    QueryResult {
        total: matches.len(),
        properties: page.apply(&matches),
    }
}

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    title: &str,
    location: &str,
    price: u64,
    size: u32,
    bedrooms: u32,
    bathrooms: u32,
    description: &str,
    amenities: &[&str],
    images: &[&str],
    featured: bool,
    (lat, lng): (f64, f64),
) -> PropertyRecord {
    PropertyRecord {
        id: id.to_string(),
        title: title.to_string(),
        location: location.to_string(),
        price,
        size,
        bedrooms,
        bathrooms,
        description: description.to_string(),
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
        images: images.iter().map(|i| i.to_string()).collect(),
        featured,
        coordinates: Coordinates { lat, lng },
    }
}

fn build_fixtures() -> Vec<PropertyRecord> {
    vec![
        record(
            "1",
            "Luxury Sky Residence",
            "Bandra West, Mumbai",
            125_000_000,
            120,
            2,
            2,
            "Experience the pinnacle of luxury living in this spectacular sky residence. Floor-to-ceiling windows offer breathtaking panoramic views of Mumbai's skyline and Arabian Sea.",
            &["Infinity Pool", "Fitness Center", "Rooftop Garden", "Private Parking", "24/7 Security", "Smart Home System"],
            &[
                "https://images.pexels.com/photos/1571460/pexels-photo-1571460.jpeg",
                "https://images.pexels.com/photos/1643383/pexels-photo-1643383.jpeg",
                "https://images.pexels.com/photos/1669799/pexels-photo-1669799.jpeg",
            ],
            true,
            (19.0596, 72.8295),
        ),
        record(
            "2",
            "Riverside Oasis",
            "Yamuna Expressway, Delhi",
            180_000_000,
            180,
            3,
            3,
            "Stunning riverside condominium with unobstructed views of the Yamuna River. Premium imported materials and world-class amenities.",
            &["Private Pier", "Infinity Edge Pool", "Sky Lounge", "Concierge Service", "Tennis Court", "Children's Playground"],
            &[
                "https://images.pexels.com/photos/2121121/pexels-photo-2121121.jpeg",
                "https://images.pexels.com/photos/1918291/pexels-photo-1918291.jpeg",
                "https://images.pexels.com/photos/3935333/pexels-photo-3935333.jpeg",
            ],
            true,
            (28.6139, 77.2090),
        ),
        record(
            "3",
            "Tech Hub Apartment",
            "Electronic City, Bangalore",
            95_000_000,
            110,
            2,
            2,
            "Modern apartment in Bangalore's tech hub. Perfect for IT professionals with easy access to major tech companies.",
            &["Co-working Space", "High-speed Internet", "Gym", "Swimming Pool", "Cafeteria", "Shuttle Service"],
            &[
                "https://images.pexels.com/photos/1974596/pexels-photo-1974596.jpeg",
                "https://images.pexels.com/photos/1428348/pexels-photo-1428348.jpeg",
                "https://images.pexels.com/photos/271816/pexels-photo-271816.jpeg",
            ],
            false,
            (12.8456, 77.6603),
        ),
        record(
            "4",
            "Beachfront Villa",
            "Candolim, Goa",
            150_000_000,
            200,
            4,
            3,
            "Luxurious beachfront villa with private beach access. Perfect for vacation home or rental investment.",
            &["Private Beach", "Swimming Pool", "Garden", "BBQ Area", "Parking", "Security"],
            &[
                "https://images.pexels.com/photos/2476632/pexels-photo-2476632.jpeg",
                "https://images.pexels.com/photos/2417842/pexels-photo-2417842.jpeg",
                "https://images.pexels.com/photos/189296/pexels-photo-189296.jpeg",
            ],
            true,
            (15.5166, 73.7615),
        ),
        record(
            "5",
            "Heritage Haveli",
            "Udaipur, Rajasthan",
            200_000_000,
            300,
            5,
            4,
            "Restored heritage haveli with traditional Rajasthani architecture. Unique investment opportunity in the City of Lakes.",
            &["Courtyard", "Traditional Architecture", "Lake View", "Heritage Value", "Tourist Potential", "Parking"],
            &[
                "https://images.pexels.com/photos/53610/large-home-residential-house-architecture-53610.jpeg",
                "https://images.pexels.com/photos/2089698/pexels-photo-2089698.jpeg",
                "https://images.pexels.com/photos/2351649/pexels-photo-2351649.jpeg",
            ],
            false,
            (24.5854, 73.7125),
        ),
        record(
            "6",
            "IT Park Apartment",
            "Hitech City, Hyderabad",
            85_000_000,
            95,
            2,
            2,
            "Contemporary apartment near major IT companies. Excellent connectivity and modern amenities.",
            &["Metro Connectivity", "Shopping Mall", "Food Court", "Gym", "Swimming Pool", "Security"],
            &[
                "https://images.pexels.com/photos/1438832/pexels-photo-1438832.jpeg",
                "https://images.pexels.com/photos/275484/pexels-photo-275484.jpeg",
                "https://images.pexels.com/photos/2029698/pexels-photo-2029698.jpeg",
            ],
            false,
            (17.4485, 78.3908),
        ),
        record(
            "7",
            "Startup Hub Loft",
            "Koramangala, Bangalore",
            110_000_000,
            130,
            2,
            2,
            "Trendy loft in Bangalore's startup ecosystem. Walking distance to cafes, co-working spaces, and venture capital firms.",
            &["Co-working Space", "Rooftop Terrace", "High-speed Internet", "Cafeteria", "Event Space", "Parking"],
            &[
                "https://images.pexels.com/photos/1918291/pexels-photo-1918291.jpeg",
                "https://images.pexels.com/photos/1571460/pexels-photo-1571460.jpeg",
                "https://images.pexels.com/photos/276554/pexels-photo-276554.jpeg",
            ],
            false,
            (12.9352, 77.6245),
        ),
        record(
            "8",
            "Backwater Resort",
            "Alleppey, Kerala",
            120_000_000,
            150,
            3,
            2,
            "Serene backwater resort property with traditional Kerala architecture. Perfect for eco-tourism business.",
            &["Backwater Access", "Traditional Design", "Boat Jetty", "Organic Garden", "Ayurveda Center", "Restaurant"],
            &[
                "https://images.pexels.com/photos/2480608/pexels-photo-2480608.jpeg",
                "https://images.pexels.com/photos/2119714/pexels-photo-2119714.jpeg",
                "https://images.pexels.com/photos/2724749/pexels-photo-2724749.jpeg",
            ],
            true,
            (9.4981, 76.3388),
        ),
    ]
}
