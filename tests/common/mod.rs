//! Shared helpers for the HTTP API tests.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};
use shelf::{Pipeline, Server, Store, app};

pub const API_KEY: &str = "test-api-key";

/// A running server plus a handle to the store behind it.
pub struct TestServer {
    pub base: String,
    pub store: Arc<Store>,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// A request builder that already carries the right API key.
    pub fn authed(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header("x-api-key", API_KEY)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.authed(reqwest::Method::GET, path).send().await.unwrap()
    }

    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.authed(reqwest::Method::POST, path).json(body).send().await.unwrap()
    }

    pub async fn put(&self, path: &str, body: &Value) -> reqwest::Response {
        self.authed(reqwest::Method::PUT, path).json(body).send().await.unwrap()
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.authed(reqwest::Method::DELETE, path).send().await.unwrap()
    }
}

/// Spin up the product API on an OS-assigned port with a freshly seeded store.
pub async fn spawn_app() -> TestServer {
    let store = Arc::new(Store::seeded());
    spawn_pipeline(Arc::clone(&store), app(Arc::clone(&store), API_KEY)).await
}

/// Spin up an arbitrary pipeline; `store` is only kept for assertions.
pub async fn spawn_pipeline(store: Arc<Store>, pipeline: Pipeline) -> TestServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let server = Server::from_listener(listener);
    let port = server.local_addr().unwrap().port();
    tokio::spawn(async move {
        server
            .serve_with_shutdown(pipeline, std::future::pending())
            .await
            .unwrap();
    });
    TestServer {
        base: format!("http://127.0.0.1:{}", port),
        store,
        client: reqwest::Client::new(),
    }
}

pub fn desk() -> Value {
    json!({
        "name": "Desk",
        "description": "Standing desk with memory presets",
        "price": 450,
        "category": "furniture",
        "inStock": true
    })
}

pub async fn error_message(resp: reqwest::Response) -> String {
    let body: Value = resp.json().await.unwrap();
    body["error"].as_str().unwrap().to_owned()
}
