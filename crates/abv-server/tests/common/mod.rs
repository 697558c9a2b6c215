#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use abv_core::{Database, Drink, DrinkEntry, InventoryStore};

/// In-memory inventory with three drinks, two of them in stock.
pub fn seeded_store() -> Arc<Database> {
    let db = Arc::new(Database::open_in_memory().unwrap());

    let mut bells = Drink::new("100", "Bell's Brewery", "Two Hearted").with_style("IPA - American");
    bells.logo = "https://example.test/labels/two-hearted.jpeg".to_string();
    db.create_drink(&bells).unwrap();
    db.create_drink(&Drink::new("200", "Acme Brewing", "Lager").with_style("Lager"))
        .unwrap();
    db.create_drink(&Drink::new("300", "Zed Ales", "Stout").with_style("Stout"))
        .unwrap();

    db.record_input(&DrinkEntry::new("100", 2)).unwrap();
    db.record_input(&DrinkEntry::new("200", 6)).unwrap();
    db.record_output(&DrinkEntry::new("200", 1)).unwrap();
    db.record_input(&DrinkEntry::new("300", 1)).unwrap();
    db.record_output(&DrinkEntry::new("300", 1)).unwrap();
    db
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
