use argh::FromArgs;
use desk_server::{app::default_database_url, database::Database, repository::Repository};

use crate::CliError;

mod support_person;

pub use support_person::BackfillError;

/// One-off data backfills.
#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argh(subcommand, name = "backfill")]
pub struct BackfillCommand {
    #[argh(subcommand)]
    subcommand: BackfillSubCommand,
}

#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argh(subcommand)]
pub enum BackfillSubCommand {
    SupportPerson(support_person::SupportPersonCommand),
}

impl BackfillCommand {
    pub async fn run(&self) -> Result<(), CliError> {
        match &self.subcommand {
            BackfillSubCommand::SupportPerson(cmd) => cmd.run().await,
        }
    }
}

/// Connects to the database named on the command line, or DATABASE_URL.
async fn connect(database_url: Option<&str>) -> Result<Repository, CliError> {
    let url = database_url
        .map(str::to_string)
        .unwrap_or_else(default_database_url);
    let database = Database::new(&url, 1, 1)
        .await
        .map_err(desk_server::repository::RepositoryError::from)?;
    Ok(Repository::new(database))
}
