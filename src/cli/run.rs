//! The `run` command: fold the sample journal into a view

use crate::cli::commands::RunArgs;
use crate::cli::sample::sample_records;
use crate::cli::snapshot;
use crate::config::AggregatorConfig;
use crate::error::Result;
use crate::fold::{Aggregator, Apply, FoldOutcome};
use crate::storage::journal::RecordJournal;
use crate::storage::materialized_view::TotalsByCategory;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// What a `run` produced
#[derive(Debug)]
pub struct RunReport {
    /// Final (or partial, if cancelled) view
    pub view: TotalsByCategory,
    /// Records applied during this run
    pub applied: u64,
    /// Records available in the journal
    pub available: u64,
    /// Whether Ctrl-C stopped the fold early
    pub cancelled: bool,
}

/// Build the sample journal, fold it on a worker task and handle snapshots.
///
/// Ctrl-C cancels the fold; the partial view is still returned and saved.
pub async fn run(args: &RunArgs) -> Result<RunReport> {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    let result = run_with(args, cancel).await;
    interrupt.abort();
    result
}

/// [`run`] stopped by `cancel` instead of Ctrl-C
pub async fn run_with(args: &RunArgs, cancel: CancellationToken) -> Result<RunReport> {
    let config = match &args.config {
        Some(path) => AggregatorConfig::from_json_file(path)?,
        None => AggregatorConfig::new("totals-by-category"),
    };
    let aggregator = Aggregator::new(config);

    let journal: RecordJournal<_> =
        sample_records(args.sample.records, args.sample.block, args.sample.amount)
            .into_iter()
            .collect();

    let seed = match &args.seed {
        Some(path) => snapshot::load(path, args.format)?,
        None => TotalsByCategory::new(),
    };
    info!(records = journal.len(), seeded = !seed.is_empty(), "building view");

    let handle = aggregator.spawn_with_token(seed, journal.cursor(), Apply, cancel);
    let (view, applied, cancelled) = match handle.join().await? {
        Ok(FoldOutcome::Completed { accumulator, applied }) => (accumulator, applied, false),
        Ok(FoldOutcome::Cancelled { accumulator, applied }) => (accumulator, applied, true),
        Err(failure) => {
            error!(applied = failure.applied(), error = %failure.error(), "fold failed");
            eprintln!(
                "Failed after applying {} of {} records. Partial view:\n{}",
                failure.applied(),
                journal.len(),
                failure.accumulator()
            );
            return Err(failure.into());
        }
    };

    if let Some(path) = &args.output {
        snapshot::save(path, args.format, &view)?;
        info!(path = %path.display(), "view saved");
    }

    Ok(RunReport {
        view,
        applied,
        available: journal.len() as u64,
        cancelled,
    })
}
