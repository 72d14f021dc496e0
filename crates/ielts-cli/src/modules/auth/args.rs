use clap::Args;
use ielts_core::Role;

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long, help = "Phone number, e.g. +998901234567")]
    pub phone: Option<String>,
    #[arg(long, help = "Code from an earlier request; skips sending a new one")]
    pub code: Option<String>,
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub fullname: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long, default_value = "student", value_parser = parse_role)]
    pub role: Role,
    #[arg(long, help = "Verification code; prompted for when omitted")]
    pub code: Option<String>,
}

fn parse_role(value: &str) -> Result<Role, String> {
    value.parse().map_err(|err| format!("{err}"))
}
