//! Property listing data layer.
//!
//! Serves filtered, paginated listings from a bundled fixture set or from the
//! Realty listings provider, normalizing provider payloads through a demo
//! adapter and falling back to fixture data whenever the provider fails.

pub mod config;
pub mod error;
pub mod generation;
pub mod listing;
pub mod models;
pub mod repository;
pub mod sources;

pub use config::Settings;
pub use error::{FilterError, RemoteError};
pub use generation::{QueryGenerations, QueryTicket};
pub use models::{Coordinates, DataSource, PropertyRecord};
pub use repository::{PropertyRepository, QueryObserver, TracingObserver};
pub use sources::{QueryFilter, QueryResult};
