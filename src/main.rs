mod app;
mod config;
mod console;
mod net;
mod pages;
mod state;
mod util;

use std::io::Write;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::Level;

use crate::app::AppController;
use crate::config::{ConfigError, ConsoleConfig, DEFAULT_API_URL};
use crate::net::api::{ClinicApi, HttpApi};
use crate::net::error::ApiError;
use crate::state::app::Tab;
use crate::util::notice::LineNotifier;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("runtime start failed: {0}")]
    Runtime(std::io::Error),
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON from backend: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "petcare", about = "Veterinaria PetCare: consola de gestión de clientes, mascotas y citas")]
struct Cli {
    /// Base URL of the clinic REST API
    #[arg(long, env = "PETCARE_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Log level for stderr diagnostics
    #[arg(long, env = "PETCARE_LOG_LEVEL", default_value = "warn", value_parser = clap::value_parser!(Level))]
    log_level: Level,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive console (default)
    Console,
    /// Load data, print one tab, and exit
    Show {
        #[arg(value_parser = parse_tab, default_value = "dashboard")]
        tab: Tab,
    },
    /// Print the backend health document
    Health,
}

fn parse_tab(raw: &str) -> Result<Tab, String> {
    Tab::parse(raw).ok_or_else(|| format!("unknown tab `{raw}` (dashboard, clientes, mascotas, citas)"))
}

fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_writer(std::io::stderr).init();

    // Must run before the runtime spawns threads.
    let offset = util::datetime::local_offset();

    let config = ConsoleConfig::new(&cli.api_url)?;
    tracing::debug!(api_url = %config.api_url, "configuration resolved");

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(CliError::Runtime)?;
    runtime.block_on(run(config, cli.command.unwrap_or(Command::Console), offset))
}

async fn run(config: ConsoleConfig, command: Command, offset: time::UtcOffset) -> Result<(), CliError> {
    let api = Arc::new(HttpApi::new(config.api_url)?);
    let mut out = std::io::stdout();

    match command {
        Command::Health => {
            let document = api.health().await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
        }
        Command::Show { tab } => {
            let mut controller = controller(api, offset);
            console::show_once(&mut controller, tab, &mut out).await?;
        }
        Command::Console => {
            let mut controller = controller(api, offset);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            console::run_console(&mut controller, stdin, &mut out).await?;
        }
    }
    Ok(())
}

fn controller(api: Arc<HttpApi>, offset: time::UtcOffset) -> AppController {
    AppController::new(api, Arc::new(LineNotifier::new(std::io::stdout())), offset)
}

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;
