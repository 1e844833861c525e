pub mod client;
pub mod error;
pub mod flatten;
pub mod types;

pub use client::CatalogClient;
pub use error::ScraperError;
pub use flatten::flatten_products;
pub use types::{CatalogProduct, CatalogVariant, ProductsPage};
