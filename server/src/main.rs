//! ScanRelay - Vulnerability scanner over HTTP
//!
//! Serves `POST|GET /scan` and `GET /health`, running each scan through
//! the external `VulnerabilityScanner` found in the scanner project root.

mod error;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use scanrelay_core::config::{DEFAULT_HOST, DEFAULT_INTERPRETER, DEFAULT_PORT};
use scanrelay_core::{Error, ProcessScanner, ScanService, ServerConfig};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "scanrelay")]
#[command(author, version, about = "Run vulnerability scans over HTTP")]
struct Cli {
    /// Scanner project root (defaults to the current directory)
    scanner_root: Option<PathBuf>,

    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Listen address
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Python interpreter that can import the scanner
    #[arg(long, env = "SCANNER_PYTHON", default_value = DEFAULT_INTERPRETER)]
    python: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::new(cli.scanner_root.as_deref())?
        .with_port(cli.port)
        .with_host(cli.host)
        .with_interpreter(cli.python);

    let scanner = match open_scanner(&config).await {
        Ok(scanner) => scanner,
        Err(e) if e.is_startup_fatal() => {
            print_remediation(&e);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    let app = routes::router(Arc::new(ScanService::new(scanner)));

    info!(
        "Scanner server at {} (POST with {{ \"target\": \"...\", \"quick\": true }})",
        config.scan_url()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Scanner server error")?;

    info!("Scanner server stopped");
    Ok(())
}

/// Locate the interpreter and check the scanner imports from the root.
async fn open_scanner(config: &ServerConfig) -> scanrelay_core::Result<ProcessScanner> {
    let scanner = ProcessScanner::python(&config.scanner_root, &config.interpreter)?;
    scanner.check_import().await?;
    Ok(scanner)
}

fn print_remediation(err: &Error) {
    eprintln!("{}", err);
    match err {
        Error::ScannerNotFound { .. } => {
            eprintln!("Run from your vulnerability-scanner project root, or pass the path:");
            eprintln!("  cd /path/to/vulnerability-scanner && scanrelay");
            eprintln!("  scanrelay /path/to/vulnerability-scanner");
        }
        Error::InterpreterNotFound(_) => {
            eprintln!("Install Python 3 or point at the interpreter the scanner uses:");
            eprintln!("  scanrelay --python /path/to/venv/bin/python3");
        }
        _ => {}
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
