use ielts_client::Route;
use ielts_core::{SubmissionQueue, WritingSubmission};

use crate::cli_args::{CheckingArgs, CheckingCommand};
use crate::modules::shared::{open_view, print_table};
use crate::modules::system::CommandContext;

pub(crate) async fn handle_checking(
    args: CheckingArgs,
    ctx: &CommandContext,
) -> anyhow::Result<()> {
    let view = open_view(ctx, Route::TeacherChecking).await?;
    match args.command {
        CheckingCommand::List(args) => match args.queue {
            Some(queue) => {
                let result = ctx.client.submissions(queue, view.cancel()).await;
                if let Some(submissions) = view.settle(result)? {
                    print_queue(queue, &submissions);
                }
            }
            None => {
                let result = ctx.client.submission_queues(view.cancel()).await;
                if let Some(queues) = view.settle(result)? {
                    print_queue(SubmissionQueue::All, &queues.all);
                    println!();
                    print_queue(SubmissionQueue::InProgress, &queues.in_progress);
                    println!();
                    print_queue(SubmissionQueue::Checked, &queues.checked);
                }
            }
        },
        CheckingCommand::Claim(args) => {
            let result = ctx.client.claim_submission(args.submission_id).await;
            if view.settle(result)?.is_some() {
                println!("Claimed submission {}", args.submission_id);
            }
        }
        CheckingCommand::Grade(args) => {
            let result = ctx
                .client
                .grade_submission(args.submission_id, args.score, &args.feedback)
                .await;
            if view.settle(result)?.is_some() {
                println!("Graded submission {} with {:.1}", args.submission_id, args.score);
            }
        }
    }
    Ok(())
}

fn print_queue(queue: SubmissionQueue, submissions: &[WritingSubmission]) {
    println!("[{}]", queue.as_str());
    if submissions.is_empty() {
        println!("(empty)");
        return;
    }
    let rows: Vec<Vec<String>> = submissions
        .iter()
        .map(|submission| {
            vec![
                submission.id.to_string(),
                submission.student_fullname.clone(),
                submission.test_title.clone(),
                submission.task.clone(),
                submission
                    .score
                    .map_or_else(|| "-".to_string(), |score| format!("{score:.1}")),
                submission.submitted_at.format("%Y-%m-%d %H:%M").to_string(),
            ]
        })
        .collect();
    print_table(
        &["ID", "STUDENT", "TEST", "TASK", "SCORE", "SUBMITTED"],
        &rows,
    );
}
