use clap::Parser;
use mealsearch::{
    cli::{browse, commands, Cli, Commands},
    config::Settings,
    Result,
};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    // Silently ignore if file doesn't exist
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout carries only results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,mealsearch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::from_env()?;
    settings.validate()?;
    debug!("Using TheMealDB at {}", settings.api.base_url);

    // Handle commands
    match cli.command {
        Commands::Search {
            query,
            page,
            per_page,
            fail_fast,
            keep_empty,
        } => {
            commands::search(&settings, &query, page, per_page, fail_fast, keep_empty).await?;
        }
        Commands::Expand { query } => {
            commands::expand(&query);
        }
        Commands::Show { id } => {
            commands::show(&settings, &id).await?;
        }
        Commands::Browse => {
            browse::browse(&settings).await?;
        }
    }

    Ok(())
}
