use std::fs;
use std::path::{Path, PathBuf};

use ielts_client::DEFAULT_BASE_URL;

use super::types::CliConfig;
use crate::cli_args::{ConfigArgs, ConfigCommand};

pub(crate) fn handle_config_command(
    args: ConfigArgs,
    config: &mut CliConfig,
) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::SetApiUrl(args) => {
            let url = args.url.trim().trim_end_matches('/').to_string();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!("api url must start with http:// or https://");
            }
            config.api_url = Some(url);
        }
        ConfigCommand::SetStorage(args) => {
            config.storage = Some(args.storage);
        }
        ConfigCommand::Show => {
            let api_url = config.api_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
            let storage = config.storage.unwrap_or_default();
            println!("api_url  {api_url}");
            println!("storage  {}", storage.as_str());
        }
    }
    Ok(())
}

/// `--api-url` (or `IELTS_API_URL`), then the config file, then the default.
pub(crate) fn resolve_api_url(arg: Option<String>, config: &CliConfig) -> String {
    arg.filter(|value| !value.trim().is_empty())
        .or_else(|| config.api_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

fn config_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("HOME is not set"))?;
    Ok(Path::new(&home).join(".ielts").join("config.json"))
}

pub(crate) fn load_config() -> anyhow::Result<CliConfig> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let contents = fs::read_to_string(&path)?;
    serde_json::from_str(&contents)
        .map_err(|err| anyhow::anyhow!("invalid config {}: {err}", path.display()))
}

pub(crate) fn save_config(config: &CliConfig) -> anyhow::Result<()> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}
