use crate::cli_args::*;
use crate::modules::auth::{handle_login, handle_logout, handle_register, handle_status};
use crate::modules::checking::handle_checking;
use crate::modules::learning::{
    handle_dashboard, handle_my_tests, handle_results, handle_submit_writing, handle_test,
    handle_tests,
};
use crate::modules::payments::handle_topup;
use crate::modules::speaking::handle_speaking;
use crate::modules::system::CommandContext;

pub(crate) async fn handle_command(command: Command, ctx: &CommandContext) -> anyhow::Result<()> {
    match command {
        Command::Login(args) => handle_login(args, ctx).await?,
        Command::Register(args) => handle_register(args, ctx).await?,
        Command::Logout => handle_logout(ctx),
        Command::Status => handle_status(ctx).await,
        Command::Dashboard => handle_dashboard(ctx).await?,
        Command::Tests(args) => handle_tests(args, ctx).await?,
        Command::MyTests => handle_my_tests(ctx).await?,
        Command::Results => handle_results(ctx).await?,
        Command::Test(args) => handle_test(args, ctx).await?,
        Command::SubmitWriting(args) => handle_submit_writing(args, ctx).await?,
        Command::Checking(args) => handle_checking(args, ctx).await?,
        Command::Speaking(args) => handle_speaking(args, ctx).await?,
        Command::Topup(args) => handle_topup(args, ctx).await?,
        Command::Config(_) | Command::Types => {
            unreachable!()
        }
    }

    Ok(())
}
