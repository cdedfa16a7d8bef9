//! # CLI Module
//!
//! Command-line tooling around route table files.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! Compile a table and list its routes, grouped by method:
//!
//! ```bash
//! routemux routes --file routes.yaml
//! ```
//!
//! ### `resolve`
//!
//! Show which route a request would hit and the parameters it captures:
//!
//! ```bash
//! routemux resolve --file routes.yaml --method GET --url http://api.example.com/users/42
//! ```
//!
//! ### `call`
//!
//! Dispatch the request for real, with every handler name bound to an echo
//! handler, and print the response:
//!
//! ```bash
//! routemux call --file routes.yaml --url '/users/42?expand=posts'
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, run_cli_to, Cli, Commands};
