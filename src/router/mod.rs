//! # Router Module
//!
//! Path matching and dispatch for routemux. Routes are declared with
//! sinatra-style patterns (`/users/:id`), matched in registration order and
//! gated by method and, optionally, by host.
//!
//! ## Architecture
//!
//! Routing happens in two phases:
//!
//! 1. **Compilation**: at registration each pattern becomes an anchored regex
//!    plus the ordered list of its placeholder names. Malformed patterns are
//!    rejected here, never at request time.
//!
//! 2. **Matching**: for each request the router checks its host restriction,
//!    scans the routes registered for the request method and then the
//!    any-method routes, and dispatches to the first match. Captured segments
//!    are appended to the request's query string before the handler runs.
//!    Without a match the fallback handler (404 by default) gets the request
//!    untouched.
//!
//! ## Example
//!
//! ```rust
//! use routemux::handler::{handler_fn, Request};
//! use routemux::router::Router;
//! use routemux::server::ResponseWriter;
//! use std::fmt::Write;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut router = Router::new();
//! router.get("/pets/:id", handler_fn(|req: &mut Request, res: &mut ResponseWriter| {
//!     write!(res, "{}", req.uri().query().unwrap_or(""))?;
//!     Ok(())
//! }))?;
//!
//! let request = http::Request::get("/pets/42?limit=1").body(bytes::Bytes::new())?;
//! let response = router.respond(request)?;
//! assert_eq!(response.body().as_ref(), b"id=42&limit=1");
//! # Ok(())
//! # }
//! ```
//!
//! ## Composition
//!
//! [`Router`] implements [`Handler`](crate::handler::Handler), so a router
//! can be another router's fallback. A host-restricted API router can hand
//! everything it does not own to a general-purpose router.

mod core;
mod pattern;
mod route;

pub use core::{MethodTier, RouteMatch, Router};
pub use pattern::{Pattern, PatternError};
pub use route::Route;
