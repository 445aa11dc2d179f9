mod common;

use common::{API_KEY, desk, error_message, spawn_app};
use reqwest::Method;

const ROUTES: [(Method, &str); 7] = [
    (Method::GET, "/"),
    (Method::GET, "/api/products"),
    (Method::GET, "/api/products/1"),
    (Method::POST, "/api/products"),
    (Method::PUT, "/api/products/1"),
    (Method::DELETE, "/api/products/1"),
    (Method::GET, "/no/such/route"),
];

#[tokio::test]
async fn every_route_requires_the_api_key() {
    let app = spawn_app().await;

    for (method, path) in ROUTES {
        let resp = app
            .client
            .request(method.clone(), app.url(path))
            .json(&desk())
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 401, "{method} {path}");
        assert_eq!(
            error_message(resp).await,
            "Unauthorized: Invalid or missing API key",
            "{method} {path}"
        );
    }

    assert_eq!(app.store.list(), shelf::seed());
}

#[tokio::test]
async fn wrong_key_is_rejected_and_store_is_untouched() {
    let app = spawn_app().await;

    for key in ["", "wrong", "TEST-API-KEY", "test-api-key-extra"] {
        let resp = app
            .client
            .delete(app.url("/api/products/1"))
            .header("x-api-key", key)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 401, "key {key:?}");
    }

    assert_eq!(app.store.len(), 3);
    assert!(app.store.get("1").is_some());
}

#[tokio::test]
async fn unauthorized_response_is_json() {
    let app = spawn_app().await;
    let resp = app.client.get(app.url("/api/products")).send().await.unwrap();

    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.contains("application/json"));
}

#[tokio::test]
async fn header_name_is_case_insensitive() {
    let app = spawn_app().await;
    let resp = app
        .client
        .get(app.url("/"))
        .header("X-API-Key", API_KEY)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
}
