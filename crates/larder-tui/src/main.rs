//! `larder` — terminal admin dashboard for recipe and inventory management.
//!
//! Built on [ratatui](https://ratatui.rs) over the larder REST service.
//! Two screens, navigable via number keys: Recipes (1) and Inventory (2).
//!
//! Logs are written to a file (default `/tmp/larder.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod event;
mod modals;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use larder_api::{ApiClient, TlsMode, TransportConfig};

use crate::app::App;

/// Terminal dashboard for managing recipes and inventory.
#[derive(Parser, Debug)]
#[command(name = "larder", version, about)]
struct Cli {
    /// Service base URL (e.g., https://kitchen.example.com/api)
    #[arg(short = 's', long, env = "LARDER_SERVER")]
    server: Option<String>,

    /// Config profile to use (defaults to the config's default profile)
    #[arg(short = 'p', long, env = "LARDER_PROFILE")]
    profile: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long)]
    insecure: bool,

    /// Log file path (defaults to /tmp/larder.log)
    #[arg(long, default_value = "/tmp/larder.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("larder_tui={log_level},larder_api={log_level}"))
    });

    let log_dir = cli.log_file.parent().unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("larder.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Resolve the service client and a status-bar label for it.
///
/// Priority: `--server` flag > config profile.
fn build_client(cli: &Cli) -> Result<(ApiClient, String)> {
    if let Some(server) = cli.server.as_deref() {
        let transport = TransportConfig {
            tls: if cli.insecure {
                TlsMode::DangerAcceptInvalid
            } else {
                TlsMode::System
            },
            timeout: Duration::from_secs(30),
        };
        let client = ApiClient::new(server, &transport)?;
        return Ok((client, server.to_owned()));
    }

    let config = larder_config::load_config()?;
    let (name, profile) = larder_config::resolve_profile(&config, cli.profile.as_deref())
        .map_err(|e| {
            eyre!(
                "{e}\n\nNo --server flag given and no usable profile in {}.\n\
                 Run with --server <URL> or add a profile to the config file.",
                larder_config::config_path().display()
            )
        })?;
    let settings = larder_config::profile_to_api_settings(profile, &config.defaults)?;
    let client = ApiClient::new(settings.url.as_str(), &settings.transport)?;
    Ok((client, format!("{name}: {}", settings.url)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let (client, server_label) = build_client(&cli)?;

    info!(server = %server_label, "starting larder");

    let mut app = App::new(client, server_label);
    app.run().await?;

    Ok(())
}
