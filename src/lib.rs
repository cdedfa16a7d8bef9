//! # routemux
//!
//! **routemux** is a small request-routing layer that sits in front of HTTP
//! handlers. It maps an incoming (host, method, path) triple to a registered
//! handler, extracts named path segments and merges them into the request's
//! query string before delegating.
//!
//! ## Architecture
//!
//! - **[`router`]** - Pattern compilation, routes, and the dispatching [`Router`]
//! - **[`handler`]** - The [`Handler`] capability, closure adapter and default 404
//! - **[`server`]** - Query parsing and merging, host extraction, [`ResponseWriter`]
//! - **[`config`]** - Route tables loaded from YAML, JSON or TOML
//! - **[`registry`]** - Name-addressable handlers for route tables
//! - **[`runtime_config`]** - Environment-driven runtime settings
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `routemux` command-line tool
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Transport
//!     participant Router
//!     participant Route
//!     participant Handler
//!     participant Fallback
//!
//!     Transport->>Router: serve(GET http://api.example.com/users/42?x=1)
//!     Router->>Router: Host gate (port stripped)
//!     alt Host mismatch
//!         Router->>Fallback: serve(unmodified request)
//!     end
//!     Router->>Router: Scan GET routes, then ANY routes
//!     alt No route matches
//!         Router->>Fallback: serve(unmodified request)
//!         Fallback-->>Transport: 404 Not Found
//!     end
//!     Router->>Route: dispatch("/users/42")
//!     Route->>Route: Extract {id: 42}, query becomes id=42&x=1
//!     Route->>Handler: serve(request, response)
//!     Handler-->>Transport: response (errors propagate unchanged)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use routemux::{handler_fn, Request, ResponseWriter, Router};
//! use std::fmt::Write;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut api = Router::new();
//! api.set_host("api.example.com");
//! api.get("/users/:id", handler_fn(|req: &mut Request, res: &mut ResponseWriter| {
//!     write!(res, "user query: {}", req.uri().query().unwrap_or(""))?;
//!     Ok(())
//! }))?;
//!
//! let mut site = Router::new();
//! site.handle(handler_fn(|_req: &mut Request, res: &mut ResponseWriter| {
//!     res.write_str("site")?;
//!     Ok(())
//! }));
//! api.set_fallback(site);
//!
//! let response = api.respond(
//!     http::Request::get("http://api.example.com/users/42").body(bytes::Bytes::new())?,
//! )?;
//! assert_eq!(response.body().as_ref(), b"user query: id=42");
//!
//! let response = api.respond(
//!     http::Request::get("http://www.example.com/users/42").body(bytes::Bytes::new())?,
//! )?;
//! assert_eq!(response.body().as_ref(), b"site");
//! # Ok(())
//! # }
//! ```
//!
//! ## Runtime Considerations
//!
//! Registration takes `&mut self`. Once a router is built, wrap it in an
//! `Arc` and share it across worker threads; request handling only reads the
//! table. The router performs no I/O of its own and owns no timeouts.

pub mod cli;
pub mod config;
mod echo;
pub mod handler;
pub mod logging;
pub mod registry;
pub mod router;
pub mod runtime_config;
pub mod server;

pub use config::{ConfigError, RouteTableConfig};
pub use echo::EchoHandler;
pub use handler::{handler_fn, Handler, HandlerFn, HandlerResult, NotFound, Request};
pub use registry::HandlerRegistry;
pub use router::{MethodTier, Pattern, PatternError, Route, RouteMatch, Router};
pub use runtime_config::RuntimeConfig;
pub use server::{Params, ResponseWriter};
