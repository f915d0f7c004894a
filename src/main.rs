use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tidings::app::AppContext;
use tidings::cli::{commands, Cli, Commands};
use tidings::config::Config;
use tidings::domain::ProposalAction;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(db) = cli.db {
        config.database_path = Some(db);
    }

    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Run => commands::run_check(&ctx).await?,
        Commands::Accept => commands::respond(&ctx, ProposalAction::Accept).await?,
        Commands::Decline => commands::respond(&ctx, ProposalAction::Decline).await?,
        Commands::Respond { link } => {
            commands::respond(&ctx, ProposalAction::from_link(&link)).await?
        }
        Commands::Status => commands::print_status(&ctx)?,
    }

    Ok(())
}
