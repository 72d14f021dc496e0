use std::path::PathBuf;

use clap::{Args, Subcommand};
use ielts_core::WritingTask;
use uuid::Uuid;

#[derive(Args)]
pub struct TestsArgs {
    #[command(subcommand)]
    pub command: TestsCommand,
}

#[derive(Subcommand)]
pub enum TestsCommand {
    #[command(about = "List the test catalog")]
    List,
    #[command(about = "Buy a test from your balance")]
    Buy(BuyTestArgs),
}

#[derive(Args)]
pub struct BuyTestArgs {
    #[arg(help = "Test ID")]
    pub id: Uuid,
}

#[derive(Args)]
pub struct TestArgs {
    #[arg(help = "Test ID")]
    pub id: Uuid,
}

#[derive(Args)]
pub struct SubmitWritingArgs {
    #[arg(help = "Purchased test ID (see `ielts my-tests`)")]
    pub user_test_id: Uuid,
    #[arg(long, value_parser = parse_task, help = "Writing task: 1 or 2")]
    pub task: WritingTask,
    #[arg(long, help = "File containing the answer text")]
    pub answer_file: PathBuf,
}

fn parse_task(value: &str) -> Result<WritingTask, String> {
    match value.trim() {
        "1" | "task_1" => Ok(WritingTask::TaskOne),
        "2" | "task_2" => Ok(WritingTask::TaskTwo),
        other => Err(format!("unknown writing task: {other}")),
    }
}
