use clap::{ArgAction, Parser, Subcommand};

pub use crate::modules::auth::args::*;
pub use crate::modules::checking::args::*;
pub use crate::modules::learning::args::*;
pub use crate::modules::payments::args::*;
pub use crate::modules::speaking::args::*;
pub use crate::modules::system::args::*;
use crate::modules::system::StorageKind;

#[derive(Parser)]
#[command(name = "ielts")]
#[command(about = "IELTS platform CLI")]
pub struct Cli {
    #[arg(long, env = "IELTS_API_URL", help = "Backend API base URL")]
    pub api_url: Option<String>,
    #[arg(long, value_enum, env = "IELTS_STORAGE", help = "Where the session is kept")]
    pub storage: Option<StorageKind>,
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Sign in with a one-time code sent to your phone")]
    Login(LoginArgs),
    #[command(about = "Create an account")]
    Register(RegisterArgs),
    #[command(about = "Forget the stored session")]
    Logout,
    #[command(about = "Show the current session")]
    Status,
    #[command(about = "Show your dashboard")]
    Dashboard,
    #[command(about = "Browse and buy tests")]
    Tests(TestsArgs),
    #[command(about = "List purchased tests")]
    MyTests,
    #[command(about = "List test results")]
    Results,
    #[command(about = "Show a purchased test")]
    Test(TestArgs),
    #[command(about = "Send a writing answer for review")]
    SubmitWriting(SubmitWritingArgs),
    #[command(about = "Review writing submissions (teachers)")]
    Checking(CheckingArgs),
    #[command(about = "Book and list speaking sessions")]
    Speaking(SpeakingArgs),
    #[command(about = "Top up your balance")]
    Topup(TopupArgs),
    Config(ConfigArgs),
    #[command(about = "Print JSON Schemas of the API types")]
    Types,
}
