pub mod client;
pub mod mapper;
pub mod query;
pub mod ranker;
pub mod types;

pub use client::{CatalogClient, CatalogError, IgdbClient};
pub use types::{GameSummary, RawCatalogRecord};
