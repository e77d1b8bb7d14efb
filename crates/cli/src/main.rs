use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

#[derive(Parser)]
#[command(
    name = "chartctl",
    version = "0.1.0",
    about = "Chart query compiler and refresh runner"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Compile {
            query,
            tables,
            main_table,
        } => commands::compile(&query, &tables, &main_table).await,
        Commands::Validate { config } => commands::validate(&config).await,
        Commands::Refresh {
            query,
            tables,
            main_table,
            result_table,
        } => commands::refresh(&query, &tables, &main_table, &result_table).await,
    }
}
