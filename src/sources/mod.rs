pub mod demo_adapter;
pub mod fixture;
pub mod payload;
pub mod realty;
pub mod traits;
pub mod types;

pub use demo_adapter::{AdapterSettings, DemoAdapter};
pub use realty::RealtyClient;
pub use traits::ListingsTransport;
pub use types::{Pagination, QueryFilter, QueryResult};
