use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct SpeakingArgs {
    #[command(subcommand)]
    pub command: SpeakingCommand,
}

#[derive(Subcommand)]
pub enum SpeakingCommand {
    #[command(about = "Request a speaking session after paying for it")]
    Request(SpeakingRequestArgs),
    #[command(about = "List your speaking requests")]
    List,
}

#[derive(Args)]
pub struct SpeakingRequestArgs {
    #[arg(long, help = "Contact phone number")]
    pub phone: String,
    #[arg(long, value_parser = parse_payment_date, help = "YYYY-MM-DD or RFC 3339 timestamp")]
    pub payment_date: DateTime<Utc>,
    #[arg(long = "check", help = "Checklist item confirmed before booking (repeatable)")]
    pub checklist: Vec<String>,
}

pub(crate) fn parse_payment_date(value: &str) -> Result<DateTime<Utc>, String> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid payment date: {value}"))
}
