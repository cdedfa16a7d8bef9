//! Router core module - hot path for request routing.
//!
//! Each request makes one pass: host gate, ordered scan over the routes of
//! its method followed by the any-method routes, then dispatch to the first
//! match or to the fallback handler.

use super::pattern::PatternError;
use super::route::Route;
use crate::handler::{not_found_handler, Handler, HandlerResult, Request, SharedHandler};
use crate::runtime_config::RuntimeConfig;
use crate::server::{decode_path, request_host, strip_port, Params, ResponseWriter};
use bytes::Bytes;
use http::{Method, Response};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Which bucket of the route table a route lives in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MethodTier {
    /// Only requests with exactly this method
    Method(Method),
    /// Any method; consulted after the method-specific routes
    Any,
}

impl fmt::Display for MethodTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodTier::Method(method) => f.pad(method.as_str()),
            MethodTier::Any => f.pad("ANY"),
        }
    }
}

impl FromStr for MethodTier {
    type Err = http::method::InvalidMethod;

    /// `ANY` (any case) selects the any-method tier; anything else must be a
    /// valid HTTP method token and is upper-cased.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("ANY") {
            return Ok(MethodTier::Any);
        }
        Method::from_bytes(s.to_ascii_uppercase().as_bytes()).map(MethodTier::Method)
    }
}

impl From<Method> for MethodTier {
    fn from(method: Method) -> Self {
        MethodTier::Method(method)
    }
}

/// Result of resolving a request without dispatching it.
#[derive(Debug, Clone)]
pub struct RouteMatch<'r> {
    /// Tier the matched route was registered under
    pub tier: MethodTier,
    /// The matched route
    pub route: &'r Route,
    /// Parameters captured from the path
    pub path_params: Params,
}

/// Request router: host gate, method tiers and a fallback handler.
///
/// Routes are tried in registration order within a tier, method-specific
/// routes before any-method routes. Registration needs `&mut self`; share
/// the finished router behind an `Arc` to serve from several threads.
#[derive(Clone)]
pub struct Router {
    routes: HashMap<Method, Vec<Route>>,
    any: Vec<Route>,
    host: String,
    fallback: SharedHandler,
    config: RuntimeConfig,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Empty router answering every request with the default 404.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    #[must_use]
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            routes: HashMap::new(),
            any: Vec::new(),
            host: String::new(),
            fallback: not_found_handler(),
            config,
        }
    }

    pub fn get<H: Handler + 'static>(&mut self, pattern: &str, handler: H) -> Result<(), PatternError> {
        self.route(Method::GET, pattern, handler)
    }

    pub fn post<H: Handler + 'static>(&mut self, pattern: &str, handler: H) -> Result<(), PatternError> {
        self.route(Method::POST, pattern, handler)
    }

    pub fn put<H: Handler + 'static>(&mut self, pattern: &str, handler: H) -> Result<(), PatternError> {
        self.route(Method::PUT, pattern, handler)
    }

    pub fn delete<H: Handler + 'static>(&mut self, pattern: &str, handler: H) -> Result<(), PatternError> {
        self.route(Method::DELETE, pattern, handler)
    }

    pub fn patch<H: Handler + 'static>(&mut self, pattern: &str, handler: H) -> Result<(), PatternError> {
        self.route(Method::PATCH, pattern, handler)
    }

    pub fn head<H: Handler + 'static>(&mut self, pattern: &str, handler: H) -> Result<(), PatternError> {
        self.route(Method::HEAD, pattern, handler)
    }

    pub fn options<H: Handler + 'static>(&mut self, pattern: &str, handler: H) -> Result<(), PatternError> {
        self.route(Method::OPTIONS, pattern, handler)
    }

    /// Register `handler` for `pattern` under an arbitrary method.
    pub fn route<H: Handler + 'static>(
        &mut self,
        method: Method,
        pattern: &str,
        handler: H,
    ) -> Result<(), PatternError> {
        let route = Route::new(pattern, Arc::new(handler))?;
        self.add_route(MethodTier::Method(method), route);
        Ok(())
    }

    /// Register `handler` for `pattern` regardless of request method.
    pub fn any<H: Handler + 'static>(&mut self, pattern: &str, handler: H) -> Result<(), PatternError> {
        let route = Route::new(pattern, Arc::new(handler))?;
        self.add_route(MethodTier::Any, route);
        Ok(())
    }

    /// Register a catch-all: matches every path under every method. It joins
    /// the any-method tier, so routes registered before it still win.
    pub fn handle<H: Handler + 'static>(&mut self, handler: H) {
        self.add_route(MethodTier::Any, Route::catch_all(Arc::new(handler)));
    }

    /// Append an already-built route to a tier.
    pub fn add_route(&mut self, tier: MethodTier, route: Route) {
        debug!(
            method = %tier,
            pattern = %route.pattern(),
            params = ?route.pattern().names(),
            route_name = route.name().unwrap_or(""),
            "Route registered"
        );
        match tier {
            MethodTier::Method(method) => self.routes.entry(method).or_default().push(route),
            MethodTier::Any => self.any.push(route),
        }
    }

    /// Restrict this router to one host. An empty string lifts the restriction.
    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
        info!(host = %self.host, "Router host restriction set");
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Replace the handler used when nothing matches. Another `Router` is a
    /// valid fallback.
    pub fn set_fallback<H: Handler + 'static>(&mut self, handler: H) {
        self.fallback = Arc::new(handler);
    }

    #[must_use]
    pub fn fallback(&self) -> &SharedHandler {
        &self.fallback
    }

    /// Whether `host` (port suffix allowed) passes the host gate.
    #[must_use]
    pub fn match_host(&self, host: &str) -> bool {
        self.host.is_empty() || strip_port(host).eq_ignore_ascii_case(&self.host)
    }

    /// Whether the request passes the host gate.
    #[must_use]
    pub fn matches(&self, req: &Request) -> bool {
        self.match_host(request_host(req).unwrap_or(""))
    }

    /// First route matching `path` for `method`, with the tier it came from.
    fn find(&self, method: &Method, path: &str) -> Option<(MethodTier, &Route)> {
        let exact = self
            .routes
            .get(method)
            .and_then(|routes| routes.iter().find(|route| route.matches(path)));
        if let Some(route) = exact {
            return Some((MethodTier::Method(method.clone()), route));
        }
        self.any
            .iter()
            .find(|route| route.matches(path))
            .map(|route| (MethodTier::Any, route))
    }

    /// Resolve a request without dispatching it.
    ///
    /// Applies the host gate and the ordered scan; `None` means the fallback
    /// would be invoked.
    #[must_use]
    pub fn resolve(&self, method: &Method, host: &str, path: &str) -> Option<RouteMatch<'_>> {
        if !self.match_host(host) {
            return None;
        }
        let (tier, route) = self.find(method, path)?;
        Some(RouteMatch {
            tier,
            route,
            path_params: route.extract_params(path),
        })
    }

    /// Every route in listing order: method tiers sorted by method name, then
    /// the any-method tier. Within a tier, routes keep registration order.
    #[must_use]
    pub fn routes(&self) -> Vec<(MethodTier, &Route)> {
        let mut methods: Vec<&Method> = self.routes.keys().collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        let mut out = Vec::new();
        for method in methods {
            for route in &self.routes[method] {
                out.push((MethodTier::Method(method.clone()), route));
            }
        }
        out.extend(self.any.iter().map(|route| (MethodTier::Any, route)));
        out
    }

    /// Write the host restriction and every route, in listing order, to `out`.
    pub fn dump_routes<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        let routes = self.routes();
        let host = if self.host.is_empty() { "*" } else { self.host.as_str() };
        writeln!(out, "host: {host}")?;
        writeln!(out, "routes: {}", routes.len())?;
        for (tier, route) in routes {
            writeln!(
                out,
                "{tier:<7} {:<32} -> {}",
                route.pattern(),
                route.name().unwrap_or("<unnamed>")
            )?;
        }
        Ok(())
    }

    /// Run a request through the router and collect the response.
    pub fn respond(&self, mut req: Request) -> anyhow::Result<Response<Bytes>> {
        let mut res = ResponseWriter::new();
        self.serve(&mut req, &mut res)?;
        Ok(res.into_response())
    }
}

impl Handler for Router {
    fn serve(&self, req: &mut Request, res: &mut ResponseWriter) -> HandlerResult {
        if !self.matches(req) {
            debug!(
                host = request_host(req).unwrap_or(""),
                expected_host = %self.host,
                "Host gate rejected request"
            );
            return self.fallback.serve(req, res);
        }

        let match_start = Instant::now();
        let path = decode_path(req.uri().path()).into_owned();
        let found = self.find(req.method(), &path);
        let match_duration = match_start.elapsed();

        if match_duration > self.config.slow_match_threshold {
            warn!(
                method = %req.method(),
                path = %path,
                duration_us = match_duration.as_micros(),
                "Slow route matching detected"
            );
        }

        match found {
            Some((tier, route)) => {
                debug!(
                    method = %req.method(),
                    path = %path,
                    tier = %tier,
                    pattern = %route.pattern(),
                    duration_us = match_duration.as_micros(),
                    "Route matched"
                );
                route.dispatch(&path, req, res)
            }
            None => {
                debug!(
                    method = %req.method(),
                    path = %path,
                    duration_us = match_duration.as_micros(),
                    "No route matched"
                );
                self.fallback.serve(req, res)
            }
        }
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("any", &self.any)
            .field("host", &self.host)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
