use crate::handler::Request;
use http::header::HOST;
use http::uri::{InvalidUri, InvalidUriParts, PathAndQuery};
use http::Uri;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Multi-valued parameter map.
///
/// Keys iterate in sorted order, values keep insertion order, so
/// [`encode_query`] output is deterministic.
pub type Params = BTreeMap<String, Vec<String>>;

/// Parse a raw query string (without the leading `?`).
///
/// Repeated keys keep every value in the order they appear.
#[must_use]
pub fn parse_query(query: &str) -> Params {
    let mut params = Params::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        params
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    params
}

/// Serialize parameters as `application/x-www-form-urlencoded`, keys sorted.
#[must_use]
pub fn encode_query(params: &Params) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, values) in params {
        for value in values {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}

/// Append every value of `extra` after the existing values under the same key.
pub fn merge_params(into: &mut Params, extra: Params) {
    for (key, mut values) in extra {
        into.entry(key).or_default().append(&mut values);
    }
}

/// Failure rebuilding a request URI after its query changed.
#[derive(Debug)]
pub enum QueryRewriteError {
    /// The new path-and-query did not parse
    PathAndQuery(InvalidUri),
    /// The URI parts could not be reassembled
    Parts(InvalidUriParts),
}

impl fmt::Display for QueryRewriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryRewriteError::PathAndQuery(e) => write!(f, "invalid path and query: {e}"),
            QueryRewriteError::Parts(e) => write!(f, "invalid uri parts: {e}"),
        }
    }
}

impl std::error::Error for QueryRewriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueryRewriteError::PathAndQuery(e) => Some(e),
            QueryRewriteError::Parts(e) => Some(e),
        }
    }
}

/// Replace the query component of the request URI, leaving scheme,
/// authority and path untouched. An empty `query` removes the `?`.
///
/// The URI is left as it is when the query would not change, or when it has
/// no path component to attach a query to (authority-form `CONNECT` targets).
pub fn set_query(req: &mut Request, query: &str) -> Result<(), QueryRewriteError> {
    if req.uri().query().unwrap_or("") == query {
        return Ok(());
    }
    let mut parts = req.uri().clone().into_parts();
    let Some(path) = parts.path_and_query.as_ref().map(PathAndQuery::path) else {
        return Ok(());
    };
    let rebuilt = if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    };
    parts.path_and_query =
        Some(PathAndQuery::try_from(rebuilt).map_err(QueryRewriteError::PathAndQuery)?);
    *req.uri_mut() = Uri::from_parts(parts).map_err(QueryRewriteError::Parts)?;
    Ok(())
}

/// Host the request is addressed to, port included.
///
/// Absolute-form targets carry the host in the URI; origin-form targets
/// (what a server normally receives) carry it in the `Host` header.
#[must_use]
pub fn request_host(req: &Request) -> Option<&str> {
    if let Some(authority) = req.uri().authority() {
        return Some(authority.as_str());
    }
    req.headers().get(HOST).and_then(|v| v.to_str().ok())
}

/// Drop a `:port` suffix and any userinfo; bracketed IPv6 literals keep
/// their brackets.
#[must_use]
pub fn strip_port(host: &str) -> &str {
    let host = host.rsplit_once('@').map_or(host, |(_, h)| h);
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    host.split(':').next().unwrap_or(host)
}

/// Percent-decode a request path for matching.
///
/// Paths that do not decode to UTF-8 are matched as-is.
#[must_use]
pub fn decode_path(path: &str) -> Cow<'_, str> {
    urlencoding::decode(path).unwrap_or(Cow::Borrowed(path))
}
