use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use estate_listings::listing::{format_area, format_price, PageWindow, SortOrder};
use estate_listings::repository::DEFAULT_FEATURED_LIMIT;
use estate_listings::{DataSource, PropertyRecord, PropertyRepository, QueryFilter, Settings};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "estate-listings")]
#[command(about = "Browse property listings from the fixture set or the Realty API")]
#[command(version)]
struct Cli {
    /// Override LISTINGS_SOURCE (fixture or remote)
    #[arg(long, global = true)]
    source: Option<DataSource>,

    /// Print results as pretty JSON instead of cards
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filtered, paginated listing query
    Query {
        /// Location substring, e.g. "Mumbai"
        #[arg(short, long)]
        location: Option<String>,

        /// Minimum price in rupees
        #[arg(long)]
        min_price: Option<u64>,

        /// Maximum price in rupees
        #[arg(long)]
        max_price: Option<u64>,

        /// Exact number of bedrooms
        #[arg(short, long)]
        bedrooms: Option<u32>,

        /// Only featured (true) or only non-featured (false) listings
        #[arg(long)]
        featured: Option<bool>,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Listings per page
        #[arg(long, default_value_t = estate_listings::listing::LISTING_PAGE_SIZE)]
        per_page: usize,

        /// newest, price-low, price-high, size-large or size-small
        #[arg(short, long, default_value = "newest")]
        sort: SortOrder,
    },

    /// Show one listing by id
    Show {
        id: String,
    },

    /// Featured listings
    Featured {
        #[arg(short, long, default_value_t = DEFAULT_FEATURED_LIMIT)]
        limit: usize,
    },

    /// Free-text search over title, location and description
    Search {
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("estate_listings=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::from_env().context("Failed to load settings")?;
    if let Some(source) = cli.source {
        settings.source = source;
    }

    let repository = PropertyRepository::from_settings(&settings)?;
    info!("🏠 Estate Listings ({} source)", repository.source());

    match cli.command {
        Commands::Query {
            location,
            min_price,
            max_price,
            bedrooms,
            featured,
            page,
            per_page,
            sort,
        } => {
            let window = PageWindow::new(page, per_page);
            let filter = window.to_filter(&QueryFilter {
                location,
                min_price,
                max_price,
                bedrooms,
                featured,
                ..QueryFilter::default()
            });

            let mut result = repository
                .query(&filter)
                .await
                .context("Invalid query")?;
            sort.apply(&mut result.properties);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                info!(
                    "Page {} of {} ({} matching properties)",
                    window.page,
                    window.total_pages(result.total),
                    result.total
                );
                print_cards(&result.properties, window.offset());
            }
        }
        Commands::Show { id } => match repository.get_by_id(&id) {
            Some(property) if cli.json => {
                println!("{}", serde_json::to_string_pretty(&property)?)
            }
            Some(property) => print_cards(std::slice::from_ref(&property), 0),
            None => anyhow::bail!("No property with id '{}'", id),
        },
        Commands::Featured { limit } => {
            let properties = repository.get_featured(limit);
            output(&properties, cli.json)?;
        }
        Commands::Search { text } => {
            let properties = repository.search_by_text(&text);
            info!("Found {} properties matching '{}'", properties.len(), text);
            output(&properties, cli.json)?;
        }
    }

    Ok(())
}

fn output(properties: &[PropertyRecord], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(properties)?);
    } else {
        print_cards(properties, 0);
    }
    Ok(())
}

fn print_cards(properties: &[PropertyRecord], start: usize) {
    for (i, property) in properties.iter().enumerate() {
        println!(
            "{}. {} ({})",
            start + i + 1,
            property.title,
            format_price(property.price)
        );
        println!("   {}", property.location);
        println!(
            "   {} bed, {} bath, {}",
            property.bedrooms,
            property.bathrooms,
            format_area(property.size)
        );
        if property.featured {
            println!("   Featured");
        }
        println!("   ID: {}", property.id);
        println!("   Amenities: {}", property.amenities.join(", "));
        if let Some(image) = property.primary_image() {
            println!("   Image: {}", image);
        }
        println!();
    }
}
