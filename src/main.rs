//! labkit: command-line toolkit for ML experiment repositories.
//!
//! Thin binary entry: logging, configuration, dispatch, exit codes.

use clap::Parser;
use labkit::cli::Cli;
use labkit::{app, ToolConfig};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging with RUST_LOG environment variable support
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    // The wrapped scripts pin usage failures to exit status 1, so clap's
    // default status 2 is overridden here. Help and version keep status 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let requested = matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            );
            let _ = err.print();
            std::process::exit(if requested { 0 } else { 1 });
        }
    };

    init_logging(cli.verbose);

    let config = match ToolConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let code = tokio::select! {
        joined = tokio::task::spawn_blocking(move || app::run(cli, config)) => match joined {
            Ok(Ok(())) => 0,
            Ok(Err(err)) => {
                eprintln!("error: {err}");
                err.exit_code()
            }
            Err(err) => {
                eprintln!("error: {err}");
                1
            }
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, exiting");
            130
        }
    };

    std::process::exit(code);
}
