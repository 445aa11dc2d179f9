//! Product API routes and the middleware chain they run behind.
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | GET | `/` | 200 text | — |
//! | GET | `/api/products` | 200, array | — |
//! | GET | `/api/products/{id}` | 200, object | 404 |
//! | POST | `/api/products` | 201, object | 400 |
//! | PUT | `/api/products/{id}` | 200, object | 404, 400 |
//! | DELETE | `/api/products/{id}` | 200, removed object | 404 |
//!
//! Every route sits behind the API-key gate (401).

use std::future::Future;
use std::sync::Arc;

use http::StatusCode;

use crate::error::Error;
use crate::middleware::{ApiKey, Pipeline, Recover, RequestLog};
use crate::product::ProductInput;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::store::Store;

pub const WELCOME: &str = "Welcome to the Product API! Go to /api/products to see all products.";
pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// The full application: product routes behind logging, the API-key gate and
/// central error formatting.
pub fn app(store: Arc<Store>, api_key: impl Into<String>) -> Pipeline {
    with_middleware(routes(store), api_key)
}

/// Wraps any router in the standard chain:
/// logging → API key → routing, with errors formatted on the way out.
pub fn with_middleware(router: Router, api_key: impl Into<String>) -> Pipeline {
    Pipeline::new(router)
        .layer(RequestLog)
        .layer(ApiKey::new(api_key))
        .layer(Recover)
}

/// The product routes on their own, with no middleware.
pub fn routes(store: Arc<Store>) -> Router {
    Router::new()
        .get("/", root)
        .get("/api/products", with_store(Arc::clone(&store), list_products))
        .get("/api/products/{id}", with_store(Arc::clone(&store), get_product))
        .post("/api/products", with_store(Arc::clone(&store), create_product))
        .put("/api/products/{id}", with_store(Arc::clone(&store), update_product))
        .delete("/api/products/{id}", with_store(store, delete_product))
}

/// Adapts a `(store, request)` handler to the router's `(request)` shape.
fn with_store<F, Fut>(store: Arc<Store>, handler: F) -> impl Fn(Request) -> Fut + Send + Sync + 'static
where
    F: Fn(Arc<Store>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, Error>> + Send + 'static,
{
    move |req| handler(Arc::clone(&store), req)
}

fn product_id(req: &Request) -> &str {
    req.param("id").unwrap_or_default()
}

fn not_found() -> Response {
    Response::error(StatusCode::NOT_FOUND, PRODUCT_NOT_FOUND)
}

// GET /
async fn root(_req: Request) -> Result<Response, Error> {
    Ok(Response::text(WELCOME))
}

// GET /api/products
async fn list_products(store: Arc<Store>, _req: Request) -> Result<Response, Error> {
    Response::json(&store.list())
}

// GET /api/products/{id}
async fn get_product(store: Arc<Store>, req: Request) -> Result<Response, Error> {
    match store.get(product_id(&req)) {
        Some(product) => Response::json(&product),
        None => Ok(not_found()),
    }
}

// POST /api/products
async fn create_product(store: Arc<Store>, req: Request) -> Result<Response, Error> {
    let input = ProductInput::from_json(req.body_json()?)?;
    let fields = match input.validate() {
        Ok(fields) => fields,
        Err(missing) => return Ok(Response::error(StatusCode::BAD_REQUEST, missing.to_string())),
    };
    let product = store.create(fields);
    Response::builder().status(StatusCode::CREATED).json(&product)
}

// PUT /api/products/{id}
async fn update_product(store: Arc<Store>, req: Request) -> Result<Response, Error> {
    let input = ProductInput::from_json(req.body_json()?)?;
    match store.update(product_id(&req), input) {
        Ok(Some(product)) => Response::json(&product),
        Ok(None) => Ok(not_found()),
        Err(missing) => Ok(Response::error(StatusCode::BAD_REQUEST, missing.to_string())),
    }
}

// DELETE /api/products/{id}
async fn delete_product(store: Arc<Store>, req: Request) -> Result<Response, Error> {
    match store.remove(product_id(&req)) {
        Some(product) => Response::json(&product),
        None => Ok(not_found()),
    }
}
