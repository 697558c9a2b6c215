use std::sync::Arc;

use abv_catalog::{ImageCache, UntappdClient};
use abv_core::Drink;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

/// Result of a background task, delivered back to the event loop.
#[derive(Debug)]
pub enum AsyncResultType {
    /// Catalog search for the drink name typed into the popup.
    SearchFinished {
        query: String,
        results: Result<Vec<Drink>, String>,
    },
    /// Label image download for a newly created drink.
    ImageCached {
        url: String,
        result: Result<(), String>,
    },
}

/// Handles to everything the interface runs off the event loop.
#[derive(Clone)]
pub struct Services {
    pub runtime: Handle,
    pub catalog: Arc<UntappdClient>,
    pub images: ImageCache,
}

pub fn spawn_search(services: &Services, tx: UnboundedSender<AsyncResultType>, query: String) {
    let catalog = services.catalog.clone();
    services.runtime.spawn(async move {
        let results = catalog
            .search_by_name(&query)
            .await
            .map_err(|e| e.to_string());
        let _ = tx.send(AsyncResultType::SearchFinished { query, results });
    });
}

pub fn spawn_image_cache(services: &Services, tx: UnboundedSender<AsyncResultType>, url: String) {
    let images = services.images.clone();
    services.runtime.spawn(async move {
        let result = images.fetch(&url).await.map(|_| ()).map_err(|e| e.to_string());
        let _ = tx.send(AsyncResultType::ImageCached { url, result });
    });
}
