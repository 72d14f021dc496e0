use ielts_client::Route;
use ielts_core::SpeakingRequestCreate;

use crate::cli_args::{SpeakingArgs, SpeakingCommand};
use crate::modules::shared::{open_view, print_table};
use crate::modules::system::CommandContext;

pub(crate) async fn handle_speaking(
    args: SpeakingArgs,
    ctx: &CommandContext,
) -> anyhow::Result<()> {
    let view = open_view(ctx, Route::Speaking).await?;
    match args.command {
        SpeakingCommand::Request(args) => {
            let checklist = args
                .checklist
                .into_iter()
                .map(|item| (item, serde_json::Value::Bool(true)))
                .collect();
            let request = SpeakingRequestCreate {
                phone_number: args.phone,
                payment_date: args.payment_date,
                checklist,
            };
            let result = ctx.client.request_speaking(&request).await;
            if let Some(created) = view.settle(result)? {
                println!("Speaking request {} is {}", created.id, created.status);
            }
        }
        SpeakingCommand::List => {
            let result = ctx.client.my_speaking_requests(view.cancel()).await;
            let Some(requests) = view.settle(result)? else {
                return Ok(());
            };
            if requests.is_empty() {
                println!("No speaking requests yet");
                return Ok(());
            }
            let rows: Vec<Vec<String>> = requests
                .iter()
                .map(|request| {
                    vec![
                        request.id.to_string(),
                        request.status.clone(),
                        request
                            .payment_date
                            .map(|date| date.format("%Y-%m-%d").to_string())
                            .unwrap_or_else(|| "-".to_string()),
                        request.note.clone().unwrap_or_default(),
                    ]
                })
                .collect();
            print_table(&["ID", "STATUS", "PAID ON", "NOTE"], &rows);
        }
    }
    Ok(())
}
