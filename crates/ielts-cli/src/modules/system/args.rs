use clap::{Args, Subcommand};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Set the backend API base URL")]
    SetApiUrl(SetApiUrlArgs),
    #[command(about = "Choose where the session is kept")]
    SetStorage(SetStorageArgs),
    #[command(about = "Print the stored configuration")]
    Show,
}

#[derive(Args)]
pub struct SetApiUrlArgs {
    #[arg(help = "Base URL, e.g. https://ielts.example.com/api")]
    pub url: String,
}

#[derive(Args)]
pub struct SetStorageArgs {
    #[arg(value_enum)]
    pub storage: crate::modules::system::StorageKind,
}
