use std::sync::Arc;

use clap::ValueEnum;
use ielts_client::{ApiClient, CancelToken, SessionGate};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Default)]
pub struct CliConfig {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub storage: Option<StorageKind>,
}

#[derive(Serialize, Deserialize, ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// `~/.ielts/session.json`
    #[default]
    File,
    /// OS keychain
    Keyring,
}

impl StorageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Keyring => "keyring",
        }
    }
}

pub struct CommandContext {
    pub client: ApiClient,
    pub gate: Arc<SessionGate>,
    /// Canceled on Ctrl-C; every view request is issued with it.
    pub cancel: CancelToken,
}
