//! # Route Table Configuration
//!
//! Declarative route tables loaded from YAML, JSON or TOML and bound to
//! handlers by name through a [`HandlerRegistry`].
//!
//! ```yaml
//! host: api.example.com
//! fallback: not_found
//! routes:
//!   - method: GET
//!     pattern: /users/:id
//!     handler: get_user
//!   - method: ANY
//!     handler: catch_all       # no pattern: matches every path
//! ```
//!
//! Routes keep file order, which is also their precedence order.

use crate::registry::HandlerRegistry;
use crate::router::{MethodTier, Pattern, PatternError, Route, Router};
use crate::runtime_config::RuntimeConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// Serialization format of a route table file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Yaml,
    Json,
    Toml,
}

impl TableFormat {
    /// Pick the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(TableFormat::Yaml),
            "json" => Some(TableFormat::Json),
            "toml" => Some(TableFormat::Toml),
            _ => None,
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableFormat::Yaml => f.write_str("YAML"),
            TableFormat::Json => f.write_str("JSON"),
            TableFormat::Toml => f.write_str("TOML"),
        }
    }
}

/// One route entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// HTTP method or `ANY`
    #[serde(default = "default_method")]
    pub method: String,
    /// Sinatra-style pattern; omitted for a catch-all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Registry name of the handler
    pub handler: String,
}

fn default_method() -> String {
    "ANY".to_string()
}

/// A whole route table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTableConfig {
    /// Host restriction; omitted or empty means any host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Registry name of the fallback handler; omitted means the default 404
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// Route table loading or binding failure.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The extension is not one of yaml/yml/json/toml
    UnsupportedFormat { path: PathBuf },
    /// The document did not deserialize
    Parse { format: TableFormat, message: String },
    /// `method` is neither `ANY` nor a valid HTTP method token
    UnknownMethod { index: usize, method: String },
    /// No handler is registered under this name
    UnknownHandler { index: Option<usize>, handler: String },
    /// The route pattern did not compile
    Pattern { index: usize, source: PatternError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read route table {}: {source}", path.display())
            }
            ConfigError::UnsupportedFormat { path } => write!(
                f,
                "unsupported route table format for {} (expected .yaml, .yml, .json or .toml)",
                path.display()
            ),
            ConfigError::Parse { format, message } => {
                write!(f, "failed to parse {format} route table: {message}")
            }
            ConfigError::UnknownMethod { index, method } => {
                write!(f, "route #{index}: unknown method '{method}'")
            }
            ConfigError::UnknownHandler {
                index: Some(index),
                handler,
            } => write!(f, "route #{index}: no handler registered as '{handler}'"),
            ConfigError::UnknownHandler {
                index: None,
                handler,
            } => write!(f, "fallback: no handler registered as '{handler}'"),
            ConfigError::Pattern { index, source } => write!(f, "route #{index}: {source}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Pattern { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl RouteTableConfig {
    /// Read and parse a route table, choosing the format by extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = TableFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(&text, format)?;
        info!(
            path = %path.display(),
            format = %format,
            routes_count = table.routes.len(),
            "Route table loaded"
        );
        Ok(table)
    }

    /// Parse a route table from text.
    pub fn parse(text: &str, format: TableFormat) -> Result<Self, ConfigError> {
        let parsed = match format {
            TableFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
            TableFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            TableFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| ConfigError::Parse { format, message })
    }

    /// Compile every route and bind handlers from `registry`.
    ///
    /// All patterns, methods and handler names are checked before the router
    /// is returned, so a router built here never holds an unusable route.
    pub fn build(
        &self,
        registry: &HandlerRegistry,
        runtime: RuntimeConfig,
    ) -> Result<Router, ConfigError> {
        let mut router = Router::with_config(runtime);

        for (index, entry) in self.routes.iter().enumerate() {
            let tier: MethodTier = entry
                .method
                .parse()
                .map_err(|_| ConfigError::UnknownMethod {
                    index,
                    method: entry.method.clone(),
                })?;
            let handler = registry
                .get(&entry.handler)
                .ok_or_else(|| ConfigError::UnknownHandler {
                    index: Some(index),
                    handler: entry.handler.clone(),
                })?;
            let pattern = match &entry.pattern {
                Some(source) => Pattern::compile(source)
                    .map_err(|source| ConfigError::Pattern { index, source })?,
                None => Pattern::anything(),
            };
            router.add_route(
                tier,
                Route::from_pattern(pattern, handler).with_name(entry.handler.as_str()),
            );
        }

        if let Some(host) = self.host.as_deref().filter(|h| !h.is_empty()) {
            router.set_host(host);
        }

        if let Some(name) = &self.fallback {
            let handler = registry.get(name).ok_or_else(|| ConfigError::UnknownHandler {
                index: None,
                handler: name.clone(),
            })?;
            router.set_fallback(handler);
        }

        info!(
            routes_count = self.routes.len(),
            host = self.host.as_deref().unwrap_or(""),
            "Router built from route table"
        );
        Ok(router)
    }
}
