use clap::{Args, Subcommand};
use ielts_core::SubmissionQueue;
use uuid::Uuid;

#[derive(Args)]
pub struct CheckingArgs {
    #[command(subcommand)]
    pub command: CheckingCommand,
}

#[derive(Subcommand)]
pub enum CheckingCommand {
    #[command(about = "List writing submissions")]
    List(CheckingListArgs),
    #[command(about = "Take a submission for review")]
    Claim(ClaimArgs),
    #[command(about = "Grade a claimed submission")]
    Grade(GradeArgs),
}

#[derive(Args)]
pub struct CheckingListArgs {
    #[arg(long, value_parser = parse_queue, help = "all, in-progress or checked; every queue when omitted")]
    pub queue: Option<SubmissionQueue>,
}

#[derive(Args)]
pub struct ClaimArgs {
    #[arg(help = "Submission ID")]
    pub submission_id: Uuid,
}

#[derive(Args)]
pub struct GradeArgs {
    #[arg(help = "Submission ID")]
    pub submission_id: Uuid,
    #[arg(long, help = "Band score from 0 to 9")]
    pub score: f64,
    #[arg(long)]
    pub feedback: String,
}

fn parse_queue(value: &str) -> Result<SubmissionQueue, String> {
    match value.trim() {
        "all" => Ok(SubmissionQueue::All),
        "in-progress" => Ok(SubmissionQueue::InProgress),
        "checked" => Ok(SubmissionQueue::Checked),
        other => Err(format!("unknown queue: {other}")),
    }
}
