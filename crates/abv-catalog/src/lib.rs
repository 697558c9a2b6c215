pub mod error;
pub mod image_cache;
pub mod untappd;

pub use error::{CatalogError, Result};
pub use image_cache::ImageCache;
pub use untappd::{trim_ws, UntappdClient};
