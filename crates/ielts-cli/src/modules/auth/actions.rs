use ielts_client::Route;
use ielts_core::AuthTokens;

use crate::cli_args::{LoginArgs, RegisterArgs};
use crate::modules::shared::open_view;
use crate::modules::system::CommandContext;
use crate::prompt_line;

pub(crate) async fn handle_login(args: LoginArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    let view = open_view(ctx, Route::Login).await?;
    let phone = match args.phone {
        Some(phone) => phone,
        None => prompt_line("Phone number: ")?,
    };
    let code = match args.code {
        Some(code) => code,
        None => {
            if view.settle(ctx.client.send_otp(&phone).await)?.is_none() {
                return Ok(());
            }
            println!("A code was sent to {phone}");
            prompt_line("Code: ")?
        }
    };
    let Some(tokens) = view.settle(ctx.client.verify_login(&phone, &code).await)? else {
        return Ok(());
    };
    finish_login(ctx, &tokens);
    Ok(())
}

pub(crate) async fn handle_register(
    args: RegisterArgs,
    ctx: &CommandContext,
) -> anyhow::Result<()> {
    let view = open_view(ctx, Route::Register).await?;
    let started = ctx
        .client
        .start_registration(&args.fullname, &args.phone, args.role)
        .await;
    let Some(user_id) = view.settle(started)? else {
        return Ok(());
    };
    let code = match args.code {
        Some(code) => code,
        None => {
            println!("A verification code was sent to {}", args.phone);
            prompt_line("Code: ")?
        }
    };
    let verified = ctx.client.verify_registration(user_id, &code).await;
    let Some(tokens) = view.settle(verified)? else {
        return Ok(());
    };
    finish_login(ctx, &tokens);
    Ok(())
}

fn finish_login(ctx: &CommandContext, tokens: &AuthTokens) {
    let landing = ctx.client.complete_login(tokens);
    println!("Logged in as {}", tokens.role);
    println!("Next: {}", landing_command(&landing));
}

fn landing_command(route: &Route) -> &'static str {
    match route {
        Route::TeacherDashboard => "ielts dashboard, ielts checking list",
        _ => "ielts dashboard, ielts tests list",
    }
}

pub(crate) fn handle_logout(ctx: &CommandContext) {
    let was_signed_in = ctx.gate.snapshot().is_authenticated();
    ctx.gate.logout();
    if was_signed_in {
        println!("Logged out");
    } else {
        println!("Not logged in");
    }
}

pub(crate) async fn handle_status(ctx: &CommandContext) {
    let session = ctx.gate.ready().await;
    println!("api      {}", ctx.client.base_url());
    if session.is_authenticated() {
        let role = session
            .role
            .map(|role| role.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!("session  logged in");
        println!("role     {role}");
    } else {
        println!("session  not logged in");
    }
}
