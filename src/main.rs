//! CLI entrypoint for tempproj.

use clap::{CommandFactory, Parser};
use tempproj::cli::{run, Args};
use tracing_subscriber::EnvFilter;

fn main() {
    // No args at all: show help
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        let _ = cmd.print_help();
        std::process::exit(0);
    }

    let args = Args::parse();

    let default = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();

    std::process::exit(run(args));
}
