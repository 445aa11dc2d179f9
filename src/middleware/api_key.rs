//! Shared-secret authentication.
//!
//! Every request must carry the configured key in `x-api-key`. The header
//! name is matched case-insensitively; the value must match exactly and is
//! compared in constant time. Unknown paths are gated too, so an
//! unauthenticated client cannot tell which routes exist.

use http::StatusCode;
use subtle::ConstantTimeEq;
use tracing::debug;

use super::{BoxFuture, Middleware, Next};
use crate::error::Error;
use crate::request::Request;
use crate::response::Response;

pub const API_KEY_HEADER: &str = "x-api-key";
pub const UNAUTHORIZED: &str = "Unauthorized: Invalid or missing API key";

/// Shared-secret gate. Requests whose `x-api-key` header is missing or does
/// not match get a 401 and never reach the stages behind this one.
pub struct ApiKey {
    expected: String,
}

impl ApiKey {
    pub fn new(expected: impl Into<String>) -> Self {
        Self { expected: expected.into() }
    }

    fn accepts(&self, presented: Option<&str>) -> bool {
        presented.is_some_and(|key| key.as_bytes().ct_eq(self.expected.as_bytes()).into())
    }
}

impl Middleware for ApiKey {
    fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> BoxFuture<'a> {
        if self.accepts(req.header(API_KEY_HEADER)) {
            return next.run(req);
        }
        debug!(method = %req.method(), path = req.path(), "rejected: missing or invalid api key");
        Box::pin(async { Ok::<_, Error>(Response::error(StatusCode::UNAUTHORIZED, UNAUTHORIZED)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_exact_key_is_accepted() {
        let gate = ApiKey::new("my-secret-api-key");
        assert!(gate.accepts(Some("my-secret-api-key")));
        assert!(!gate.accepts(None));
        assert!(!gate.accepts(Some("")));
        assert!(!gate.accepts(Some("my-secret-api-ke")));
        assert!(!gate.accepts(Some("MY-SECRET-API-KEY")));
        assert!(!gate.accepts(Some("my-secret-api-key ")));
    }
}
