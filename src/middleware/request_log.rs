//! Access log: one `info` line per request, written before anything else
//! looks at it, so rejected and failing requests are logged too.

use chrono::{DateTime, SecondsFormat, Utc};
use http::Method;
use tracing::info;

use super::{BoxFuture, Middleware, Next};
use crate::request::Request;

/// Logs `[<timestamp>] <METHOD> <url>` for every request, then calls through.
///
/// The timestamp is UTC with millisecond precision, e.g.
/// `2024-05-01T09:30:00.123Z`. The URL includes the query string.
pub struct RequestLog;

impl Middleware for RequestLog {
    fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> BoxFuture<'a> {
        log_request(req.method(), req.original_url());
        next.run(req)
    }
}

/// Emits the access-log line. The server calls this directly for requests
/// whose body could not be read and so never enter the pipeline.
pub(crate) fn log_request(method: &Method, url: &str) {
    info!("{}", line(Utc::now(), method, url));
}

fn line(at: DateTime<Utc>, method: &Method, url: &str) -> String {
    format!("[{}] {method} {url}", at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::io;
    use std::sync::Arc;

    use parking_lot::Mutex;
    use tracing::subscriber::DefaultGuard;

    #[derive(Clone, Default)]
    pub(crate) struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> { Ok(()) }
    }

    impl Captured {
        pub(crate) fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    /// Routes this thread's log output into a buffer, message text only.
    pub(crate) fn capture() -> (Captured, DefaultGuard) {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_level(false)
            .with_target(false)
            .finish();
        (captured, tracing::subscriber::set_default(subscriber))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bytes::Bytes;
    use chrono::TimeZone;
    use http::StatusCode;

    use super::testing::capture;
    use super::*;
    use crate::{Router, Store, routes, with_middleware};

    fn request(method: Method, uri: &str) -> Request {
        let (parts, ()) = http::Request::builder()
            .method(method)
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts();
        Request::from_parts(parts, Bytes::new())
    }

    #[test]
    fn line_has_millisecond_utc_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
            + chrono::Duration::milliseconds(7);
        assert_eq!(
            line(at, &Method::DELETE, "/api/products/2?force=1"),
            "[2024-05-01T09:30:00.007Z] DELETE /api/products/2?force=1",
        );
    }

    #[tokio::test]
    async fn unauthenticated_request_is_still_logged() {
        let (captured, _guard) = capture();

        let app = with_middleware(routes(Arc::new(Store::seeded())), "secret");
        let resp = app.handle(request(Method::GET, "/api/products?x=1")).await.unwrap();
        assert_eq!(resp.status_code(), StatusCode::UNAUTHORIZED);

        let output = captured.text();
        let logged = output
            .lines()
            .find(|l| l.contains("GET /api/products?x=1"))
            .unwrap_or_else(|| panic!("no access line in {output:?}"))
            .trim();
        let (stamp, rest) = logged.strip_prefix('[').unwrap().split_once("] ").unwrap();
        assert_eq!(rest, "GET /api/products?x=1");
        assert_eq!(stamp.len(), "2024-05-01T09:30:00.123Z".len());
        assert!(stamp.ends_with('Z'));
        DateTime::parse_from_rfc3339(stamp).unwrap();
    }

    #[tokio::test]
    async fn unmatched_route_is_logged_before_the_404() {
        let (captured, _guard) = capture();

        let app = crate::Pipeline::new(Router::new()).layer(RequestLog);
        let resp = app.handle(request(Method::PATCH, "/nowhere")).await.unwrap();
        assert_eq!(resp.status_code(), StatusCode::NOT_FOUND);
        assert!(captured.text().contains("PATCH /nowhere"));
    }
}
