use ielts_client::Route;

use crate::cli_args::TopupArgs;
use crate::modules::shared::open_view;
use crate::modules::system::CommandContext;

pub(crate) async fn handle_topup(args: TopupArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    let view = open_view(ctx, Route::Payment).await?;
    let Some(payment) = view.settle(ctx.client.top_up(args.amount).await)? else {
        return Ok(());
    };
    println!(
        "Payment {} for {} {} is {}",
        payment.id,
        payment.amount,
        payment.currency,
        payment.status.as_str()
    );
    if let Some(url) = payment.redirect_url {
        println!("Complete the payment at {url}");
    }
    Ok(())
}
