//! Error formatting stage.
//!
//! Sits directly in front of the router. Handler errors keep their status and
//! client message; panics become a 500 and the server keeps running. Detail
//! that is not safe for clients only reaches the log.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::error;

use super::{BoxFuture, Middleware, Next};
use crate::error::Error;
use crate::request::Request;
use crate::response::IntoResponse;

/// Central error formatting.
///
/// Anything downstream that returns `Err`, or panics, is logged and turned
/// into `{"error": …}` with the error's status. This stage always yields `Ok`.
pub struct Recover;

impl Middleware for Recover {
    fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> BoxFuture<'a> {
        let method = req.method().clone();
        let url = req.original_url().to_owned();
        Box::pin(async move {
            let err = match AssertUnwindSafe(async move { next.run(req).await }).catch_unwind().await {
                Ok(Ok(resp)) => return Ok(resp),
                Ok(Err(err)) => err,
                Err(payload) => Error::Panic(panic_message(payload.as_ref()).to_owned()),
            };
            error!(%method, %url, status = err.status().as_u16(), "{err}");
            Ok::<_, Error>(err.into_response())
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}
