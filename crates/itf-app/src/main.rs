use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod io;
pub mod profile;
pub mod state;


use self::controller::AppController;
use self::profile::ProfileStore;
use self::state::AppState;

/// Native messaging host that translates text for the page overlay
#[derive(Parser, Debug)]
#[command(name = "itf-host", version)]
struct Args {
    /// Settings profile to load
    #[arg(long, default_value = "main")]
    profile: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Arguments the browser appends when launching the host (caller origin, window handle)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    browser_args: Vec<String>,
}

/// Logs go to stderr; stdout carries the messaging protocol
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(atty::is(atty::Stream::Stderr)).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    dotenvy::dotenv().ok();
    init_tracing(args.json_logs);

    if !args.browser_args.is_empty() {
        tracing::debug!("Launched by browser with {:?}", args.browser_args);
    }

    let store = ProfileStore::from_env()?;
    store.init_main_profile()?;
    let config = store.load_profile(&args.profile)?;

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);
    let mut tasks = controller
        .spawn_tasks(tokio::io::stdin(), tokio::io::stdout())
        .await;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
                controller.shutdown();
                break;
            }
            result = tasks.join_next() => {
                match result {
                    Some(Ok(Ok(()))) => {}
                    Some(Ok(Err(e))) => {
                        tracing::error!("Task failed: {e}");
                        controller.shutdown();
                    }
                    Some(Err(e)) => {
                        tracing::error!("Task panicked: {e}");
                        controller.shutdown();
                    }
                    None => {
                        tracing::info!("Browser disconnected");
                        break;
                    }
                }
            }
        }
    }

    tasks.shutdown().await;
    Ok(())
}
