//! Unified error type.

use http::StatusCode;
use thiserror::Error;

use crate::response::{IntoResponse, Response};

/// Message sent to clients for failures that carry no safe detail of their own.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// The error type returned by shelf's fallible operations.
///
/// Expected outcomes (401, 404, a failed presence check) are expressed as
/// [`Response`] values by the stage that detects them. `Error` is for what a
/// handler propagates with `?`: an unreadable or malformed body, a failed
/// serialisation, a socket that would not bind. Whatever reaches the
/// error-formatting stage is rendered as `{"error": …}` with [`Error::status`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read request body: {0}")]
    Body(#[from] hyper::Error),

    #[error("{0}")]
    MalformedBody(#[source] serde_json::Error),

    #[error("failed to serialise response: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("handler panicked: {0}")]
    Panic(String),

    /// An application error with an explicit status, for handlers that want
    /// the central formatter to render it.
    #[error("{message}")]
    Status { status: StatusCode, message: String },
}

impl Error {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Status { status, message: message.into() }
    }

    /// The HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Body(_) | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::Status { status, .. } => *status,
            Self::Io(_) | Self::Serialize(_) | Self::Panic(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message placed in the `error` field of the response body.
    pub fn client_message(&self) -> String {
        match self {
            Self::Io(_) | Self::Serialize(_) | Self::Panic(_) => INTERNAL_SERVER_ERROR.to_owned(),
            Self::Status { message, .. } if message.is_empty() => INTERNAL_SERVER_ERROR.to_owned(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        Response::error(self.status(), self.client_message())
    }
}
