use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use ielts_client::{
    ApiClient, CancelToken, ClientConfig, FileStorage, KeyringStorage, Router, SessionGate,
    SessionStorage,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli_args;
mod cli_command;
mod modules;

use crate::cli_args::*;
use crate::cli_command::handle_command;
use crate::modules::system::{
    handle_config_command, handle_types_command, load_config, resolve_api_url, save_config,
    CommandContext, StorageKind,
};

pub(crate) const KEYRING_SERVICE: &str = "ielts";
pub(crate) const NOT_LOGGED_IN: &str = "not logged in; run `ielts login`";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let mut config = load_config()?;

    match cli.command {
        Command::Config(args) => {
            handle_config_command(args, &mut config)?;
            save_config(&config)?;
        }
        Command::Types => {
            handle_types_command()?;
        }
        command => {
            let api_url = resolve_api_url(cli.api_url, &config);
            let storage_kind = cli.storage.or(config.storage).unwrap_or_default();
            let storage = open_storage(storage_kind)?;
            debug!(api_url = %api_url, storage = ?storage_kind, "starting session");

            let gate = Arc::new(SessionGate::new(storage, Arc::new(Router::default())));
            gate.hydrate();
            let client = ApiClient::new(&ClientConfig::new(api_url), Arc::clone(&gate))?;

            let cancel = CancelToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    on_interrupt.cancel();
                }
            });

            let ctx = CommandContext {
                client,
                gate,
                cancel,
            };
            handle_command(command, &ctx).await?;
        }
    }

    Ok(())
}

fn open_storage(kind: StorageKind) -> anyhow::Result<Arc<dyn SessionStorage>> {
    Ok(match kind {
        StorageKind::File => Arc::new(FileStorage::in_home()?),
        StorageKind::Keyring => Arc::new(KeyringStorage::new(KEYRING_SERVICE)),
    })
}

fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter)?)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

pub(crate) fn prompt_line(prompt: &str) -> anyhow::Result<String> {
    let mut input = String::new();
    print!("{prompt}");
    io::stdout().flush()?;
    io::stdin().read_line(&mut input)?;
    let value = input.trim().to_string();
    if value.is_empty() {
        anyhow::bail!("{} is required", prompt.trim().trim_end_matches(':'));
    }
    Ok(value)
}
