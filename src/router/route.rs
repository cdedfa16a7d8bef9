use super::pattern::{Pattern, PatternError};
use crate::handler::{Handler, HandlerResult, Request, SharedHandler};
use crate::server::{decode_path, encode_query, merge_params, parse_query, set_query, Params};
use crate::server::ResponseWriter;
use anyhow::Context;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A compiled pattern paired with the handler it dispatches to.
#[derive(Clone)]
pub struct Route {
    pattern: Pattern,
    handler: SharedHandler,
    name: Option<Arc<str>>,
}

impl Route {
    /// Compile `pattern` and bind it to `handler`.
    pub fn new(pattern: &str, handler: SharedHandler) -> Result<Self, PatternError> {
        Ok(Self::from_pattern(Pattern::compile(pattern)?, handler))
    }

    /// A route that matches every path and extracts nothing.
    #[must_use]
    pub fn catch_all(handler: SharedHandler) -> Self {
        Self::from_pattern(Pattern::anything(), handler)
    }

    #[must_use]
    pub fn from_pattern(pattern: Pattern, handler: SharedHandler) -> Self {
        Self {
            pattern,
            handler,
            name: None,
        }
    }

    /// Attach a label, typically the handler name from a route table file.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    #[must_use]
    pub fn handler(&self) -> &SharedHandler {
        &self.handler
    }

    /// Whether the whole of `path` matches this route.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }

    /// Named parameters captured from `path`.
    ///
    /// Only meaningful after [`Route::matches`] returned true; a path that does
    /// not match yields an empty map. A name used twice in the pattern collects
    /// both values in order.
    #[must_use]
    pub fn extract_params(&self, path: &str) -> Params {
        let mut params = Params::new();
        let Some(values) = self.pattern.captures(path) else {
            return params;
        };
        for (name, value) in self.pattern.names().iter().zip(values) {
            params
                .entry(name.clone())
                .or_default()
                .push(value.to_string());
        }
        params
    }

    /// Merge the parameters captured from `path` into the request query and
    /// hand the request to the route's handler.
    ///
    /// `path` must be the decoded path of `req`.
    ///
    /// Existing query values come first, captured values follow.
    pub(crate) fn dispatch(
        &self,
        path: &str,
        req: &mut Request,
        res: &mut ResponseWriter,
    ) -> HandlerResult {
        let extracted = self.extract_params(path);
        let mut params = parse_query(req.uri().query().unwrap_or(""));
        merge_params(&mut params, extracted);
        let query = encode_query(&params);
        set_query(req, &query).context("failed to rewrite request query")?;

        debug!(
            pattern = %self.pattern,
            route_name = self.name().unwrap_or(""),
            query = %query,
            "Dispatching to route handler"
        );

        self.handler.serve(req, res)
    }
}

impl Handler for Route {
    fn serve(&self, req: &mut Request, res: &mut ResponseWriter) -> HandlerResult {
        let path = decode_path(req.uri().path()).into_owned();
        self.dispatch(&path, req, res)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern.as_str())
            .field("names", &self.pattern.names())
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
