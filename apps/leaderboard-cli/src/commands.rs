//! One function per subcommand. Each prints its result to stdout and
//! reports failures through `CliError`.

use std::path::PathBuf;
use std::time::Duration;

use leaderboard_client::{
    parse_submission, ClientError, DeleteOutcome, HealthPoller, LeaderboardSession, RankedRow,
    SaveOutcome, SortDir,
};
use thiserror::Error;
use tracing::debug;

use crate::name_store::NameStore;
use crate::prompt::StdinConfirm;

/// Widest list the API serves; used when looking up a record by id.
const LOOKUP_LIMIT: u16 = 100;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Invalid(String),
    #[error("Could not load scores: {0}")]
    Load(String),
}

/// Display options shared by the list-shaped commands.
#[derive(Debug, Clone, Default)]
pub struct ViewOpts {
    pub filter: Option<String>,
    pub ascending: bool,
}

impl ViewOpts {
    fn apply(&self, session: &mut LeaderboardSession) {
        if let Some(filter) = &self.filter {
            session.set_filter(filter.clone());
        }
        if self.ascending {
            session.set_sort(SortDir::Asc);
        }
    }
}

async fn load(session: &mut LeaderboardSession) -> Result<(), CliError> {
    session.load().await;
    match session.error() {
        Some(error) => Err(CliError::Load(error.to_string())),
        None => Ok(()),
    }
}

fn render_row(row: &RankedRow<'_>) -> String {
    let badge = match row.medal() {
        Some(_) => format!("*{}", row.rank),
        None => format!(" {}", row.rank),
    };
    format!("{badge:>4}  {:<50}  {:>7}", row.record.name, row.record.score)
}

pub async fn list(mut session: LeaderboardSession, opts: ViewOpts) -> Result<(), CliError> {
    load(&mut session).await?;
    opts.apply(&mut session);

    if session.scores().is_empty() {
        println!("No scores yet. Be the first!");
        return Ok(());
    }

    let rows = session.displayed();
    if rows.is_empty() {
        println!("No matches. Try clearing the filter.");
        return Ok(());
    }

    println!("Sort: {}", session.sort().label());
    for row in &rows {
        println!("{}", render_row(row));
    }
    Ok(())
}

pub async fn submit(
    mut session: LeaderboardSession,
    names: Option<NameStore>,
    name: Option<String>,
    score: String,
) -> Result<(), CliError> {
    let name = name
        .or_else(|| names.as_ref().and_then(NameStore::load))
        .ok_or_else(|| CliError::Invalid("A name is required (use --name)".to_string()))?;

    let new = parse_submission(&name, &score).ok_or_else(|| {
        CliError::Invalid(
            "Enter a non-empty name (max 50 characters) and a whole-number score from 0 to 1000000"
                .to_string(),
        )
    })?;

    if let Some(store) = &names {
        if let Err(e) = store.save(&new.name) {
            debug!(error = %e, "could not remember name");
        }
    }

    // Establish the current leader so a new top can be detected.
    session.load().await;
    let outcome = session.submit(new).await?;

    if let Some(notice) = session.take_notice() {
        println!("{notice}");
    }
    if let Some(leader) = session.take_celebration() {
        println!(
            "🎉 Top Score! {} is leading with {} points.",
            leader.name, leader.score
        );
    }
    debug!(id = %outcome.record.id, "submitted");
    Ok(())
}

pub async fn edit(
    session: LeaderboardSession,
    id: String,
    name: Option<String>,
    score: Option<String>,
    confirm: &mut StdinConfirm,
) -> Result<(), CliError> {
    let mut session = session.with_limit(LOOKUP_LIMIT);
    load(&mut session).await?;

    if !session.start_edit(&id) {
        return Err(CliError::Invalid(format!("No score with id {id}")));
    }
    if let Some(draft) = session.editing_mut() {
        if let Some(name) = name {
            draft.name = name;
        }
        if let Some(score) = score {
            draft.score = score;
        }
    }

    match session.save_edit(confirm).await? {
        SaveOutcome::Saved(record) => println!("Updated: {} — {}", record.name, record.score),
        SaveOutcome::Rejected(rejection) => println!("{rejection}"),
        SaveOutcome::Declined => println!("Cancelled"),
        SaveOutcome::NotEditing => {}
    }
    Ok(())
}

pub async fn delete(
    session: LeaderboardSession,
    id: String,
    confirm: &mut StdinConfirm,
) -> Result<(), CliError> {
    let mut session = session.with_limit(LOOKUP_LIMIT);
    // Only used to name the record in the prompt.
    session.load().await;

    match session.delete(&id, confirm).await? {
        DeleteOutcome::Deleted => println!("Deleted"),
        DeleteOutcome::Declined => println!("Cancelled"),
    }
    Ok(())
}

pub async fn export(
    mut session: LeaderboardSession,
    opts: ViewOpts,
    output: PathBuf,
) -> Result<(), CliError> {
    load(&mut session).await?;
    opts.apply(&mut session);
    let csv = session.export_csv()?;

    if output.as_os_str() == "-" {
        println!("{csv}");
    } else {
        std::fs::write(&output, csv)?;
        eprintln!("Exported CSV to {}", output.display());
    }
    Ok(())
}

pub async fn top3(mut session: LeaderboardSession, opts: ViewOpts) -> Result<(), CliError> {
    load(&mut session).await?;
    opts.apply(&mut session);

    match session.copy_top3() {
        Some(summary) => println!("{summary}"),
        None => println!("No data"),
    }
    Ok(())
}

pub async fn health(session: LeaderboardSession, watch: bool, interval: Duration) -> Result<(), CliError> {
    let client = session.client().clone();

    if !watch {
        let health = client.health().await?;
        println!("Database: {}", health.db_mode.label());
        return Ok(());
    }

    let poller = HealthPoller::spawn(client, interval);
    let mut rx = poller.subscribe();
    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let mode = *rx.borrow_and_update();
                if let Some(mode) = mode {
                    println!("Database: {}", mode.label());
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(())
}
