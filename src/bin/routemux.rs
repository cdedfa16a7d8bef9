use clap::Parser;
use routemux::cli::{run_cli, Cli};
use routemux::logging::{init_logging, LogConfig};

fn main() -> anyhow::Result<()> {
    init_logging(&LogConfig::from_env())?;
    run_cli(Cli::parse())
}
