mod actions;
pub(crate) mod args;
pub(crate) mod config;
pub(crate) mod types;

pub(crate) use actions::handle_types_command;
pub(crate) use config::{handle_config_command, load_config, resolve_api_url, save_config};
pub(crate) use types::{CliConfig, CommandContext, StorageKind};
