use argh::FromArgs;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

mod backfill;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("repository error: {0}")]
    RepositoryError(#[from] desk_server::repository::RepositoryError),
    #[error("backfill failed: {0}")]
    BackfillError(#[from] backfill::BackfillError),
    #[error("JSON serialization error: {0}")]
    JSONSerializationError(#[from] serde_json::Error),
}

/// Command-line interface for desk admin and operations tasks.
#[derive(FromArgs, PartialEq, Eq, Debug)]
pub struct Arguments {
    #[argh(subcommand)]
    command: RootCommand,
}

#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argh(subcommand)]
pub enum RootCommand {
    Backfill(backfill::BackfillCommand),
}

impl RootCommand {
    pub async fn run(&self) -> Result<(), CliError> {
        match self {
            RootCommand::Backfill(cmd) => cmd.run().await,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "deskcli=info,desk_server=info")
    }

    tracing_subscriber::fmt::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Arguments = argh::from_env();
    if let Err(e) = args.command.run().await {
        tracing::error!("command failed: {}", e);
        std::process::exit(1);
    }
}
