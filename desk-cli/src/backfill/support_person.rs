//! Sets each job's support person to the user who owns the job.
//!
//! Jobs are processed one at a time, oldest first, with one update per job
//! and no transaction spanning them. A failure stops the run; jobs updated
//! before it stay updated, and re-running picks up where it left off because
//! jobs already supported by their owner are skipped.
//!
//! Whether a support person deliberately set to someone other than the
//! owner should be replaced is an open question, so it is a flag:
//! `overwrite` (the default) replaces it and logs a warning, `only-unset`
//! leaves it alone.

use std::str::FromStr;

use argh::FromArgs;
use desk_core::RecordId;
use desk_server::repository::{JobStore, RepositoryError};
use serde::Serialize;
use thiserror::Error;

use crate::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackfillPolicy {
    /// Every job ends up supported by its owner.
    Overwrite,
    /// Only jobs without a support person are touched.
    OnlyUnset,
}

impl FromStr for BackfillPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(Self::Overwrite),
            "only-unset" => Ok(Self::OnlyUnset),
            _ => Err(format!(
                "unknown policy '{}', expected 'overwrite' or 'only-unset'",
                s
            )),
        }
    }
}

/// Copy each job's owner into its support person.
#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argh(subcommand, name = "support-person")]
pub struct SupportPersonCommand {
    /// the database URL to connect to (default: DATABASE_URL environment variable)
    #[argh(option)]
    database_url: Option<String>,

    /// which jobs to change: overwrite (default) or only-unset
    #[argh(option, default = "BackfillPolicy::Overwrite")]
    policy: BackfillPolicy,

    /// report what would change without writing anything
    #[argh(switch)]
    dry_run: bool,

    /// print the summary as JSON
    #[argh(switch)]
    json: bool,
}

impl SupportPersonCommand {
    pub async fn run(&self) -> Result<(), CliError> {
        let repository = super::connect(self.database_url.as_deref()).await?;

        let report = backfill(repository.job(), self.policy, self.dry_run).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            let prefix = if self.dry_run { "would update" } else { "updated" };
            println!(
                "examined {}, {} {} ({} overwritten), skipped {}",
                report.examined, prefix, report.updated, report.overwritten, report.skipped
            );
        }

        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BackfillReport {
    pub examined: usize,
    /// Jobs whose support person was set, including overwritten ones.
    pub updated: usize,
    /// Jobs whose support person was set to someone other than the owner
    /// before the update.
    pub overwritten: usize,
    pub skipped: usize,
}

#[derive(Debug, Error)]
pub enum BackfillError {
    #[error("failed to read jobs: {0}")]
    ReadFailed(#[source] RepositoryError),
    #[error("failed to update job {job_id} after updating {updated} job(s): {source}")]
    UpdateFailed {
        job_id: RecordId,
        updated: usize,
        #[source]
        source: RepositoryError,
    },
}

pub async fn backfill(
    jobs: &dyn JobStore,
    policy: BackfillPolicy,
    dry_run: bool,
) -> Result<BackfillReport, BackfillError> {
    let all_jobs = jobs.read_all().await.map_err(BackfillError::ReadFailed)?;
    let mut report = BackfillReport::default();

    for job in all_jobs {
        report.examined += 1;
        let job_id = RecordId::from(job.id);

        let overwriting = match job.support_person_id {
            Some(current) if current == job.user_id => {
                report.skipped += 1;
                continue;
            }
            Some(current) => match policy {
                BackfillPolicy::OnlyUnset => {
                    tracing::debug!(
                        job_id = job_id.to_string(),
                        support_person_id = RecordId::from(current).to_string(),
                        "keeping support person set to someone other than the owner"
                    );
                    report.skipped += 1;
                    continue;
                }
                BackfillPolicy::Overwrite => {
                    tracing::warn!(
                        job_id = job_id.to_string(),
                        support_person_id = RecordId::from(current).to_string(),
                        user_id = RecordId::from(job.user_id).to_string(),
                        "overwriting support person set to someone other than the owner"
                    );
                    true
                }
            },
            None => false,
        };

        if !dry_run {
            jobs.set_support_person(&job.id, &job.user_id)
                .await
                .map_err(|source| BackfillError::UpdateFailed {
                    job_id,
                    updated: report.updated,
                    source,
                })?;
        }

        report.updated += 1;
        if overwriting {
            report.overwritten += 1;
        }

        tracing::info!(job_id = job_id.to_string(), dry_run = dry_run, "updated job");
    }

    Ok(report)
}
