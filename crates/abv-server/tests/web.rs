//! Integration tests for the front-end server.

mod common;

use axum::http::{header, StatusCode};
use common::{body_bytes, get};
use tempfile::TempDir;

use abv_server::{web_router, WebState};

fn web_root() -> TempDir {
    let root = TempDir::new().unwrap();
    std::fs::write(
        root.path().join("front.html"),
        "<html><body data-api=\"http://{{.}}:8081\"></body></html>",
    )
    .unwrap();
    std::fs::create_dir_all(root.path().join("static/css")).unwrap();
    std::fs::write(root.path().join("static/css/main.css"), "body { color: #eceff4; }").unwrap();
    std::fs::create_dir_all(root.path().join("images")).unwrap();
    std::fs::write(root.path().join("images/label.jpeg"), [0xff, 0xd8, 0xff]).unwrap();
    root
}

fn app(root: &TempDir) -> axum::Router {
    let state = WebState::load(root.path(), root.path().join("images"), "bar.local").unwrap();
    web_router(state)
}

#[tokio::test]
async fn front_page_substitutes_api_url() {
    let root = web_root();
    let response = get(app(&root), "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert_eq!(body, "<html><body data-api=\"http://bar.local:8081\"></body></html>");
}

#[tokio::test]
async fn serves_static_files() {
    let root = web_root();
    let response = get(app(&root), "/static/css/main.css").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"body { color: #eceff4; }");
}

#[tokio::test]
async fn serves_cached_images() {
    let root = web_root();
    let response = get(app(&root), "/images/label.jpeg").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, vec![0xff, 0xd8, 0xff]);
}

#[tokio::test]
async fn missing_image_is_404() {
    let root = web_root();
    let response = get(app(&root), "/images/nope.png").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
