use ielts_client::Route;
use ielts_core::{Role, StudentDashboard, SubmitWritingRequest, TeacherDashboard};

use crate::cli_args::{SubmitWritingArgs, TestArgs, TestsArgs, TestsCommand};
use crate::modules::shared::{open_view, print_table};
use crate::modules::system::CommandContext;

pub(crate) async fn handle_dashboard(ctx: &CommandContext) -> anyhow::Result<()> {
    let session = ctx.gate.ready().await;
    if session.role == Some(Role::Teacher) {
        let view = open_view(ctx, Route::TeacherDashboard).await?;
        if let Some(dashboard) = view.settle(ctx.client.teacher_dashboard(view.cancel()).await)? {
            print_teacher_dashboard(&dashboard);
        }
    } else {
        let view = open_view(ctx, Route::Dashboard).await?;
        if let Some(dashboard) = view.settle(ctx.client.student_dashboard(view.cancel()).await)? {
            print_student_dashboard(&dashboard);
        }
    }
    Ok(())
}

fn print_student_dashboard(dashboard: &StudentDashboard) {
    let profile = &dashboard.profile;
    println!("Name     {}", profile.user.fullname);
    println!("Phone    {}", profile.user.phone_number);
    println!("Balance  {} UZS", profile.balance);
    if !profile.kind.is_empty() {
        println!("Type     {}", profile.kind);
    }
    print_sections(&dashboard.sections);
}

fn print_teacher_dashboard(dashboard: &TeacherDashboard) {
    let profile = &dashboard.profile;
    println!("Name     {}", profile.user.fullname);
    println!("Phone    {}", profile.user.phone_number);
    println!("Role     teacher");
    print_sections(&dashboard.sections);
}

fn print_sections(sections: &serde_json::Map<String, serde_json::Value>) {
    if sections.is_empty() {
        return;
    }
    let names: Vec<&str> = sections.keys().map(String::as_str).collect();
    println!("Sections {}", names.join(", "));
}

pub(crate) async fn handle_tests(args: TestsArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    let view = open_view(ctx, Route::Tests).await?;
    match args.command {
        TestsCommand::List => {
            let Some(tests) = view.settle(ctx.client.all_tests(view.cancel()).await)? else {
                return Ok(());
            };
            if tests.is_empty() {
                println!("No tests available");
                return Ok(());
            }
            let rows: Vec<Vec<String>> = tests
                .iter()
                .map(|test| {
                    vec![
                        test.id.to_string(),
                        test.title.clone(),
                        test.price.to_string(),
                        if test.purchased { "yes" } else { "no" }.to_string(),
                    ]
                })
                .collect();
            print_table(&["ID", "TITLE", "PRICE", "PURCHASED"], &rows);
        }
        TestsCommand::Buy(args) => {
            if view.settle(ctx.client.purchase_test(args.id).await)?.is_some() {
                println!("Purchased test {}", args.id);
            }
        }
    }
    Ok(())
}

pub(crate) async fn handle_my_tests(ctx: &CommandContext) -> anyhow::Result<()> {
    let view = open_view(ctx, Route::MyTests).await?;
    let Some(tests) = view.settle(ctx.client.my_tests(view.cancel()).await)? else {
        return Ok(());
    };
    if tests.is_empty() {
        println!("No purchased tests yet; see `ielts tests list`");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = tests
        .iter()
        .map(|user_test| {
            vec![
                user_test.id.to_string(),
                user_test.test.title.clone(),
                user_test.status.as_str().to_string(),
                user_test.price_paid.to_string(),
                user_test.created_at.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "TEST", "STATUS", "PAID", "BOUGHT"], &rows);
    Ok(())
}

pub(crate) async fn handle_results(ctx: &CommandContext) -> anyhow::Result<()> {
    let view = open_view(ctx, Route::Results).await?;
    let Some(results) = view.settle(ctx.client.results(view.cancel()).await)? else {
        return Ok(());
    };
    if results.is_empty() {
        println!("No results yet");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = results
        .iter()
        .map(|result| {
            vec![
                result.user_test.test.title.clone(),
                band(result.listening_score),
                band(result.reading_score),
                band(result.writing_score),
                band(result.overall_score),
            ]
        })
        .collect();
    print_table(
        &["TEST", "LISTENING", "READING", "WRITING", "OVERALL"],
        &rows,
    );
    Ok(())
}

fn band(score: Option<f64>) -> String {
    score.map_or_else(|| "-".to_string(), |score| format!("{score:.1}"))
}

pub(crate) async fn handle_test(args: TestArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    let view = open_view(ctx, Route::Test(args.id)).await?;
    let Some(test) = view.settle(ctx.client.test_detail(args.id, view.cancel()).await)? else {
        return Ok(());
    };
    println!("{}", test.title);
    println!("Price     {}", test.price);
    let sections = test.sections();
    if sections.is_empty() {
        println!("Sections  none");
    } else {
        println!("Sections  {}", sections.join(", "));
    }
    if let Some(writing) = &test.writing {
        println!("Task 1    {}", writing.task_one.topic);
        println!("Task 2    {}", writing.task_two.topic);
    }
    Ok(())
}

pub(crate) async fn handle_submit_writing(
    args: SubmitWritingArgs,
    ctx: &CommandContext,
) -> anyhow::Result<()> {
    let answer = std::fs::read_to_string(&args.answer_file)?;
    if answer.trim().is_empty() {
        anyhow::bail!("answer file is empty: {}", args.answer_file.display());
    }
    let view = open_view(ctx, Route::MyTests).await?;
    let request = SubmitWritingRequest {
        user_test_id: args.user_test_id,
        task: args.task,
        answer,
    };
    if view.settle(ctx.client.submit_writing(&request).await)?.is_some() {
        println!("Answer submitted for review");
    }
    Ok(())
}
