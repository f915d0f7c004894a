use tokio::task::JoinHandle;

use crate::app::{AppContext, Result};
use crate::domain::{NotificationChannel, ProposalAction};

pub async fn run_check(ctx: &AppContext) -> Result<()> {
    let task = ctx.scheduler.run();
    wait(task).await;

    if ctx.sink.shown().is_empty() {
        if let Some(default) = ctx.sink.default_notification(NotificationChannel::Rss) {
            if default.is_proposal() {
                println!("Automatic announcement checks are off. Use `tidings accept` to turn them on.");
            }
        }
    }
    Ok(())
}

pub async fn respond(ctx: &AppContext, action: ProposalAction) -> Result<()> {
    let task = ctx.scheduler.apply(action)?;
    wait(task).await;
    print_status(ctx)
}

pub fn print_status(ctx: &AppContext) -> Result<()> {
    let group = ctx.scheduler.options()?;
    println!("[{}]", group.id);
    for (name, value) in group.options {
        println!("{} = {}", name, value.as_deref().unwrap_or("(unset)"));
    }
    println!("feed = {}", ctx.config.feed.url);
    Ok(())
}

/// The process would exit before a spawned check finishes otherwise.
async fn wait(task: Option<JoinHandle<()>>) {
    if let Some(task) = task {
        if let Err(e) = task.await {
            tracing::error!("Feed task join error: {}", e);
        }
    }
}
