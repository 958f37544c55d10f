//! `cardvault` service binary entry point.
//!
//! Startup sequence:
//! 1. Load `.env`, then load and validate [`Config`] from environment variables.
//! 2. Initialise the telemetry pipeline (JSON logs, optional OTLP spans).
//! 3. Build the process-wide [`EncryptionKey`]; it is never mutated afterwards.
//! 4. Set up the OCR engine.
//! 5. Build the Axum router and serve until SIGINT/SIGTERM.
//!
//! [`EncryptionKey`]: crypto::EncryptionKey

mod card;
mod config;
mod crypto;
mod ocr;
mod server;
mod telemetry;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{info, warn};

use config::Config;
use ocr::TesseractCli;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    // A missing .env file is fine; the variables may come from the environment.
    dotenv::dotenv().ok();
    let mut cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(cfg.otlp_endpoint(), &cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_port = cfg.listen_port,
        otlp_export = cfg.otlp_endpoint().is_some(),
        "cardvault starting"
    );

    // -----------------------------------------------------------------------
    // 3. Encryption key
    // -----------------------------------------------------------------------
    let key = cfg.take_encryption_key()?;
    info!(key_bits = key.bits(), "encryption key loaded");

    // -----------------------------------------------------------------------
    // 4. OCR engine
    // -----------------------------------------------------------------------
    let recognizer = TesseractCli::new(&cfg.tesseract_path, &cfg.tesseract_lang);
    info!(
        binary = %cfg.tesseract_path,
        lang = %cfg.tesseract_lang,
        "OCR engine configured"
    );

    // -----------------------------------------------------------------------
    // 5. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(key, recognizer);
    let router = server::router::build(state, cfg.limits());

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("cardvault stopped");
    telemetry::shutdown_telemetry();
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl+C received, shutting down"),
        _ = terminate => info!("SIGTERM received, shutting down"),
    }
}
