//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. The router is the last
//! stage of the middleware chain: whatever reaches it is dispatched to the
//! matching handler, or answered with a JSON 404.
//!
//! Matching ignores a single trailing slash, path parameters are
//! percent-decoded, and `HEAD` falls back to the `GET` route with the body
//! dropped.

use std::collections::HashMap;
use std::sync::Arc;

use http::{Method, StatusCode};
use matchit::Router as MatchitRouter;
use percent_encoding::percent_decode_str;

use crate::error::Error;
use crate::handler::{BoxFuture, BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;

/// The application router.
///
/// Build it once at startup and hand it to [`Pipeline::new`](crate::Pipeline::new).
/// Each registration returns `self` so calls chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::GET, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::POST, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::PUT, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::DELETE, path, handler)
    }

    pub(crate) fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path,
        };
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), percent_decode_str(v).decode_utf8_lossy().into_owned()))
            .collect();
        Some((handler, params))
    }

    /// Routes one request to its handler.
    pub(crate) fn dispatch(&self, mut req: Request) -> BoxFuture<'static> {
        if let Some((handler, params)) = self.lookup(req.method(), req.path()) {
            req.params = params;
            return handler.call(req);
        }
        if *req.method() == Method::HEAD {
            if let Some((handler, params)) = self.lookup(&Method::GET, req.path()) {
                req.params = params;
                let fut = handler.call(req);
                return Box::pin(async move { Ok::<_, Error>(fut.await?.without_body()) });
            }
        }
        let message = format!("Cannot {} {}", req.method(), req.path());
        Box::pin(async move { Ok::<_, Error>(Response::error(StatusCode::NOT_FOUND, message)) })
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
