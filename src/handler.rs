//! # Handler Module
//!
//! The single capability every routing target satisfies: take a request and
//! write a response.
//!
//! Anything that implements [`Handler`] can be registered on a route or used
//! as a router fallback, including another [`Router`](crate::router::Router).
//! Plain closures are lifted into the trait with [`handler_fn`].
//!
//! ```rust
//! use routemux::handler::{handler_fn, Request};
//! use routemux::router::Router;
//! use routemux::server::ResponseWriter;
//! use std::fmt::Write;
//!
//! let mut router = Router::new();
//! router
//!     .get("/hello/:name", handler_fn(|req: &mut Request, res: &mut ResponseWriter| {
//!         write!(res, "query: {}", req.uri().query().unwrap_or(""))?;
//!         Ok(())
//!     }))
//!     .unwrap();
//! ```

use crate::server::ResponseWriter;
use bytes::Bytes;
use http::StatusCode;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Request type flowing through the router.
pub type Request = http::Request<Bytes>;

/// Outcome of a handler invocation.
///
/// Errors are never inspected by the router; they are returned to whoever
/// called [`Handler::serve`].
pub type HandlerResult = anyhow::Result<()>;

/// Shared, type-erased handler reference held by routes and routers.
pub type SharedHandler = Arc<dyn Handler>;

/// Something that can answer a request.
pub trait Handler: Send + Sync {
    /// Handle `req`, writing the response into `res`.
    fn serve(&self, req: &mut Request, res: &mut ResponseWriter) -> HandlerResult;
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn serve(&self, req: &mut Request, res: &mut ResponseWriter) -> HandlerResult {
        (**self).serve(req, res)
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn serve(&self, req: &mut Request, res: &mut ResponseWriter) -> HandlerResult {
        (**self).serve(req, res)
    }
}

/// Adapter lifting a plain function or closure into a [`Handler`].
#[derive(Clone, Copy)]
pub struct HandlerFn<F>(F);

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&mut Request, &mut ResponseWriter) -> HandlerResult + Send + Sync,
{
    fn serve(&self, req: &mut Request, res: &mut ResponseWriter) -> HandlerResult {
        (self.0)(req, res)
    }
}

impl<F> std::fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HandlerFn")
    }
}

/// Wrap a closure as a [`Handler`].
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: Fn(&mut Request, &mut ResponseWriter) -> HandlerResult + Send + Sync,
{
    HandlerFn(f)
}

/// Built-in responder used when nothing else matched.
///
/// Replies `404` with a plain-text body of `Not Found\n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotFound;

impl Handler for NotFound {
    fn serve(&self, _req: &mut Request, res: &mut ResponseWriter) -> HandlerResult {
        res.error(StatusCode::NOT_FOUND, "Not Found");
        Ok(())
    }
}

static NOT_FOUND_HANDLER: Lazy<SharedHandler> = Lazy::new(|| Arc::new(NotFound));

/// The process-wide default fallback, shared by every router that was not
/// given one of its own.
#[must_use]
pub fn not_found_handler() -> SharedHandler {
    Arc::clone(&NOT_FOUND_HANDLER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_request() -> Request {
        http::Request::builder()
            .uri("/missing")
            .body(Bytes::new())
            .unwrap()
    }

    #[test]
    fn test_not_found_writes_plain_404() {
        let mut req = empty_request();
        let mut res = ResponseWriter::new();
        NotFound.serve(&mut req, &mut res).unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(res.body_str(), "Not Found\n");
        assert_eq!(
            res.headers().get(http::header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn test_handler_fn_errors_pass_through() {
        let failing = handler_fn(|_req, _res| Err(anyhow::anyhow!("boom")));
        let mut req = empty_request();
        let mut res = ResponseWriter::new();
        let err = failing.serve(&mut req, &mut res).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_shared_default_is_reused() {
        let a = not_found_handler();
        let b = not_found_handler();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
