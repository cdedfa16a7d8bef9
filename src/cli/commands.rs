use crate::config::RouteTableConfig;
use crate::echo::EchoHandler;
use crate::registry::HandlerRegistry;
use crate::router::Router;
use crate::runtime_config::RuntimeConfig;
use crate::server::decode_path;
use anyhow::{Context, Result};
use bytes::Bytes;
use clap::{Parser, Subcommand};
use http::{Method, Uri};
use serde_json::json;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Command-line interface for routemux
///
/// Inspects route table files and resolves sample requests against them.
#[derive(Parser)]
#[command(name = "routemux")]
#[command(about = "routemux CLI", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Compile a route table and list its routes
    Routes {
        /// Route table file (YAML, JSON or TOML)
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Show which route a request would hit, without dispatching it
    Resolve {
        /// Route table file (YAML, JSON or TOML)
        #[arg(short, long)]
        file: PathBuf,

        /// Request method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request target, absolute (`http://host/path?q`) or origin-form (`/path?q`)
        #[arg(short, long)]
        url: String,
    },
    /// Dispatch a request through echo handlers and print the response
    Call {
        /// Route table file (YAML, JSON or TOML)
        #[arg(short, long)]
        file: PathBuf,

        /// Request method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request target, absolute (`http://host/path?q`) or origin-form (`/path?q`)
        #[arg(short, long)]
        url: String,
    },
}

/// Run the CLI, writing to stdout.
pub fn run_cli(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_cli_to(cli, &mut out)
}

/// Run the CLI, writing command output to `out`.
pub fn run_cli_to<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    match cli.command {
        Commands::Routes { file } => {
            let router = load_router(&file)?;
            router.dump_routes(out)?;
        }
        Commands::Resolve { file, method, url } => {
            let router = load_router(&file)?;
            let method = parse_method(&method)?;
            let uri: Uri = url.parse().with_context(|| format!("invalid url '{url}'"))?;
            let host = uri.authority().map_or("", |a| a.as_str());
            let path = decode_path(uri.path());
            match router.resolve(&method, host, &path) {
                Some(found) => {
                    let report = json!({
                        "handler": found.route.name(),
                        "tier": found.tier.to_string(),
                        "pattern": found.route.pattern().as_str(),
                        "params": found.path_params,
                    });
                    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
                }
                None => writeln!(out, "no route matched {method} {url}; fallback handles it")?,
            }
        }
        Commands::Call { file, method, url } => {
            let router = load_router(&file)?;
            let method = parse_method(&method)?;
            let request = http::Request::builder()
                .method(method)
                .uri(url.as_str())
                .body(Bytes::new())
                .with_context(|| format!("invalid request target '{url}'"))?;
            let response = router.respond(request)?;
            writeln!(out, "{}", response.status())?;
            writeln!(out, "{}", String::from_utf8_lossy(response.body()))?;
        }
    }
    Ok(())
}

fn parse_method(method: &str) -> Result<Method> {
    Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("invalid method '{method}'"))
}

/// Load a route table and bind every handler name it mentions to an
/// [`EchoHandler`].
fn load_router(file: &Path) -> Result<Router> {
    let table = RouteTableConfig::load(file)?;
    let registry = echo_registry(&table);
    let router = table
        .build(&registry, RuntimeConfig::from_env())
        .with_context(|| format!("failed to build router from {}", file.display()))?;
    Ok(router)
}

fn echo_registry(table: &RouteTableConfig) -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    let names = table
        .routes
        .iter()
        .map(|r| r.handler.as_str())
        .chain(table.fallback.as_deref());
    for name in names {
        if !registry.contains(name) {
            registry.register(name, EchoHandler::new(name));
        }
    }
    registry
}
