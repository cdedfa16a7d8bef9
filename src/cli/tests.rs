//! Unit tests for CLI commands

use crate::cli::{run_cli_to, Cli, Commands};
use clap::Parser;
use std::io::Write;

const TABLE: &str = r#"
host: api.example.com
routes:
  - method: GET
    pattern: /users/:id
    handler: get_user
  - method: any
    pattern: /files/:name
    handler: files
"#;

fn table_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(TABLE.as_bytes()).unwrap();
    file
}

fn run(args: &[&str]) -> String {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    run_cli_to(cli, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_resolve_command_defaults_to_get() {
    let cli = Cli::try_parse_from(["routemux", "resolve", "--file", "t.yaml", "--url", "/a"]).unwrap();
    match cli.command {
        Commands::Resolve { file, method, url } => {
            assert_eq!(file.to_string_lossy(), "t.yaml");
            assert_eq!(method, "GET");
            assert_eq!(url, "/a");
        }
        _ => panic!("Expected Resolve command"),
    }
}

#[test]
fn test_routes_lists_table() {
    let file = table_file();
    let out = run(&["routemux", "routes", "--file", file.path().to_str().unwrap()]);
    assert!(out.contains("host: api.example.com"));
    assert!(out.contains("routes: 2"));
    assert!(out.contains("GET     /users/:id"));
    assert!(out.contains("-> files"));
}

#[test]
fn test_resolve_prints_match() {
    let file = table_file();
    let out = run(&[
        "routemux",
        "resolve",
        "--file",
        file.path().to_str().unwrap(),
        "--url",
        "http://api.example.com/users/42",
    ]);
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["handler"], "get_user");
    assert_eq!(report["tier"], "GET");
    assert_eq!(report["params"]["id"][0], "42");
}

#[test]
fn test_resolve_reports_host_miss() {
    let file = table_file();
    let out = run(&[
        "routemux",
        "resolve",
        "--file",
        file.path().to_str().unwrap(),
        "--url",
        "http://other.example.com/users/42",
    ]);
    assert!(out.starts_with("no route matched"));
}

#[test]
fn test_call_dispatches_through_echo() {
    let file = table_file();
    let out = run(&[
        "routemux",
        "call",
        "--file",
        file.path().to_str().unwrap(),
        "--method",
        "delete",
        "--url",
        "http://api.example.com/files/a.txt?v=1",
    ]);
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("200 OK"));
    let body: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
    assert_eq!(body["handler"], "files");
    assert_eq!(body["method"], "DELETE");
    assert_eq!(body["query"]["name"][0], "a.txt");
    assert_eq!(body["query"]["v"][0], "1");
}

#[test]
fn test_missing_file_is_an_error() {
    let cli = Cli::try_parse_from(["routemux", "routes", "--file", "/nonexistent/routes.yaml"])
        .unwrap();
    let mut out = Vec::new();
    let err = run_cli_to(cli, &mut out).unwrap_err();
    assert!(err.to_string().contains("failed to read route table"));
}
