//! Middleware layer.
//!
//! Every request runs through a fixed chain of stages before the router sees
//! it. A stage receives the [`Request`] and a [`Next`] handle to the rest of
//! the chain; it either calls `next.run(req)` or answers by itself, which
//! short-circuits everything downstream.
//!
//! Built-in stages:
//! - [`RequestLog`] — one log line per request: timestamp, method, URL
//! - [`ApiKey`] — rejects requests without the shared `x-api-key`
//! - [`Recover`] — turns propagated errors and panics into JSON responses
//!
//! ```rust,no_run
//! use shelf::{Pipeline, Router};
//! use shelf::middleware::{ApiKey, Recover, RequestLog};
//!
//! # let router = Router::new();
//! let app = Pipeline::new(router)
//!     .layer(RequestLog)
//!     .layer(ApiKey::new("my-secret-api-key"))
//!     .layer(Recover);
//! ```

mod api_key;
mod recover;
mod request_log;

use std::sync::Arc;

pub use api_key::{API_KEY_HEADER, ApiKey, UNAUTHORIZED};
pub use recover::Recover;
pub use request_log::RequestLog;
pub(crate) use request_log::log_request;
#[cfg(test)]
pub(crate) use request_log::testing::capture;

pub use crate::handler::BoxFuture;
use crate::request::Request;
use crate::router::Router;

/// A request-processing stage.
pub trait Middleware: Send + Sync + 'static {
    fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> BoxFuture<'a>;
}

/// The remainder of the chain after the current stage.
pub struct Next<'a> {
    stages: &'a [Arc<dyn Middleware>],
    router: &'a Router,
}

impl<'a> Next<'a> {
    /// Passes `req` to the next stage, or to the router after the last one.
    pub fn run(self, req: Request) -> BoxFuture<'a> {
        match self.stages.split_first() {
            Some((stage, rest)) => stage.handle(req, Next { stages: rest, router: self.router }),
            None => self.router.dispatch(req),
        }
    }
}

/// A router wrapped in its middleware chain. This is what the
/// [`Server`](crate::Server) serves.
pub struct Pipeline {
    stages: Vec<Arc<dyn Middleware>>,
    router: Router,
}

impl Pipeline {
    pub fn new(router: Router) -> Self {
        Self { stages: Vec::new(), router }
    }

    /// Appends a stage. Stages run in the order they were added; the router
    /// always runs last.
    pub fn layer(mut self, stage: impl Middleware) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Runs one request through the whole chain.
    pub fn handle(&self, req: Request) -> BoxFuture<'_> {
        Next { stages: &self.stages, router: &self.router }.run(req)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use bytes::Bytes;
    use http::{Method, StatusCode};

    use super::*;
    use crate::error::Error;
    use crate::response::Response;

    /// Records its name on the way in, then calls through.
    struct Mark(&'static str, Arc<Mutex<Vec<&'static str>>>);

    impl Middleware for Mark {
        fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> BoxFuture<'a> {
            if let Ok(mut seen) = self.1.lock() {
                seen.push(self.0);
            }
            next.run(req)
        }
    }

    /// Answers by itself without calling through.
    struct Teapot;

    impl Middleware for Teapot {
        fn handle<'a>(&'a self, _req: Request, _next: Next<'a>) -> BoxFuture<'a> {
            Box::pin(async { Ok::<_, Error>(Response::status(StatusCode::IM_A_TEAPOT)) })
        }
    }

    fn get(uri: &str) -> Request {
        let (parts, ()) = http::Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts();
        Request::from_parts(parts, Bytes::new())
    }

    fn router(seen: Arc<Mutex<Vec<&'static str>>>) -> Router {
        Router::new().get("/", move |_req: Request| {
            let seen = Arc::clone(&seen);
            async move {
                seen.lock().unwrap().push("handler");
                Ok::<_, Error>("ok")
            }
        })
    }

    #[tokio::test]
    async fn stages_run_in_registration_order_then_router() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let app = Pipeline::new(router(Arc::clone(&seen)))
            .layer(Mark("first", Arc::clone(&seen)))
            .layer(Mark("second", Arc::clone(&seen)));

        let resp = app.handle(get("/")).await.unwrap();
        assert_eq!(resp.body(), b"ok");
        assert_eq!(*seen.lock().unwrap(), ["first", "second", "handler"]);
    }

    #[tokio::test]
    async fn a_stage_can_short_circuit() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let app = Pipeline::new(router(Arc::clone(&seen)))
            .layer(Teapot)
            .layer(Mark("after", Arc::clone(&seen)));

        let resp = app.handle(get("/")).await.unwrap();
        assert_eq!(resp.status_code(), StatusCode::IM_A_TEAPOT);
        assert!(seen.lock().unwrap().is_empty());
    }
}
