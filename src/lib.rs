//! # shelf
//!
//! A small HTTP API over an in-memory product catalog.
//!
//! Every request runs through a fixed chain: a log line, an `x-api-key`
//! check, then routing to one of the product handlers. Errors a handler
//! propagates (and panics) come back out through a formatting stage that
//! renders them as `{"error": "…"}`. Products live in a locked `Vec` for the
//! life of the process; nothing is persisted.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use shelf::{Server, Store, app};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), shelf::Error> {
//!     let store = Arc::new(Store::seeded());
//!     Server::bind("0.0.0.0:3000")
//!         .await?
//!         .serve(app(store, "my-secret-api-key"))
//!         .await
//! }
//! ```
//!
//! ## Building blocks
//!
//! The HTTP layer is usable on its own: a [`Router`] maps method + path to
//! `async fn(Request) -> Result<impl IntoResponse, Error>` handlers, and a
//! [`Pipeline`] puts [`middleware`] stages in front of it.

mod config;
mod error;
mod handler;
mod product;
mod request;
mod response;
mod router;
mod routes;
mod server;
mod store;

pub mod middleware;

pub use config::{Config, DEFAULT_API_KEY, DEFAULT_HOST, DEFAULT_PORT};
pub use error::{Error, INTERNAL_SERVER_ERROR};
pub use handler::Handler;
pub use middleware::{Middleware, Next, Pipeline};
pub use product::{MissingFields, Product, ProductFields, ProductInput, seed};
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use routes::{PRODUCT_NOT_FOUND, WELCOME, app, routes, with_middleware};
pub use server::Server;
pub use store::Store;
