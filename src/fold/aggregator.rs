//! The aggregator: fold a sequence of records into one accumulator.
//!
//! Records are applied strictly in the order the source yields them, one
//! reduction at a time. The aggregator keeps no state between folds; every
//! call starts from the seed it is given and hands the accumulator back when
//! it stops, whether the source ran dry, the caller cancelled, or a record
//! could not be fetched or applied.

use crate::config::AggregatorConfig;
use crate::error::{Error, Result};
use crate::fold::outcome::{FoldError, FoldFailure, FoldOutcome, FoldResult};
use crate::fold::reduce::Reduce;
use crate::storage::source::RecordSource;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// Folds record sequences into accumulators.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: AggregatorConfig,
}

impl Aggregator {
    /// Create an aggregator with the given config
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    /// Get the config
    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Fold an infallible sequence.
    ///
    /// An empty sequence returns the seed unchanged.
    pub fn fold<A, R, I, F>(
        &self,
        seed: A,
        records: I,
        mut reducer: F,
    ) -> std::result::Result<A, FoldFailure<A>>
    where
        I: IntoIterator<Item = R>,
        F: Reduce<A, R>,
    {
        self.drive(seed, records.into_iter().map(Ok), &mut reducer, || false)
            .map(FoldOutcome::into_accumulator)
    }

    /// Fold a sequence whose items may fail to load.
    ///
    /// An `Err` item aborts the fold with [`FoldError::Source`].
    pub fn try_fold<A, R, I, F>(
        &self,
        seed: A,
        records: I,
        mut reducer: F,
    ) -> std::result::Result<A, FoldFailure<A>>
    where
        I: IntoIterator<Item = Result<R>>,
        F: Reduce<A, R>,
    {
        self.drive(seed, records.into_iter(), &mut reducer, || false)
            .map(FoldOutcome::into_accumulator)
    }

    /// Fold a sequence, checking `cancel` before each record.
    pub fn fold_until<A, R, I, F>(
        &self,
        seed: A,
        records: I,
        mut reducer: F,
        cancel: &CancellationToken,
    ) -> FoldResult<A>
    where
        I: IntoIterator<Item = Result<R>>,
        F: Reduce<A, R>,
    {
        self.drive(seed, records.into_iter(), &mut reducer, || cancel.is_cancelled())
    }

    /// Fold an asynchronous source.
    ///
    /// The fold suspends while the source has no record ready. Cancellation is
    /// observed while waiting and between records; a reduction already in
    /// progress is never interrupted.
    pub async fn fold_source<A, R, S, F>(
        &self,
        seed: A,
        mut source: S,
        mut reducer: F,
        cancel: &CancellationToken,
    ) -> FoldResult<A>
    where
        S: RecordSource<R>,
        F: Reduce<A, R>,
    {
        let mut progress = Progress::start(&self.config);
        let mut acc = seed;

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Ok(progress.cancelled(acc)),
                next = source.next_record() => next,
            };

            match next {
                Ok(Some(record)) => {
                    if let Err(e) = reducer.reduce(&mut acc, record) {
                        return Err(progress.reduction_failed(acc, e));
                    }
                    progress.record_applied();
                }
                Ok(None) => break,
                Err(e) => return Err(progress.source_failed(acc, e)),
            }
        }

        Ok(progress.completed(acc))
    }

    fn drive<A, R, I, F, C>(
        &self,
        seed: A,
        mut records: I,
        reducer: &mut F,
        mut is_cancelled: C,
    ) -> FoldResult<A>
    where
        I: Iterator<Item = Result<R>>,
        F: Reduce<A, R>,
        C: FnMut() -> bool,
    {
        let mut progress = Progress::start(&self.config);
        let mut acc = seed;

        loop {
            if is_cancelled() {
                return Ok(progress.cancelled(acc));
            }

            let record = match records.next() {
                Some(Ok(record)) => record,
                Some(Err(e)) => return Err(progress.source_failed(acc, e)),
                None => break,
            };

            if let Err(e) = reducer.reduce(&mut acc, record) {
                return Err(progress.reduction_failed(acc, e));
            }
            progress.record_applied();
        }

        Ok(progress.completed(acc))
    }
}

/// Per-fold bookkeeping: counts applied records and logs transitions.
struct Progress<'a> {
    view: &'a str,
    interval: u64,
    applied: u64,
}

impl<'a> Progress<'a> {
    fn start(config: &'a AggregatorConfig) -> Self {
        debug!(view = %config.name, "fold started");
        Self {
            view: &config.name,
            interval: config.progress_interval,
            applied: 0,
        }
    }

    fn record_applied(&mut self) {
        self.applied += 1;
        if self.interval > 0 && self.applied % self.interval == 0 {
            trace!(view = %self.view, applied = self.applied, "fold progress");
        }
    }

    fn completed<A>(self, accumulator: A) -> FoldOutcome<A> {
        debug!(view = %self.view, applied = self.applied, "fold completed");
        FoldOutcome::Completed {
            accumulator,
            applied: self.applied,
        }
    }

    fn cancelled<A>(self, accumulator: A) -> FoldOutcome<A> {
        info!(view = %self.view, applied = self.applied, "fold cancelled");
        FoldOutcome::Cancelled {
            accumulator,
            applied: self.applied,
        }
    }

    fn source_failed<A>(self, accumulator: A, error: Error) -> FoldFailure<A> {
        warn!(view = %self.view, position = self.applied, %error, "record source failed");
        FoldFailure::new(
            accumulator,
            FoldError::Source {
                position: self.applied,
                source: Box::new(error),
            },
        )
    }

    fn reduction_failed<A>(self, accumulator: A, error: Error) -> FoldFailure<A> {
        warn!(view = %self.view, position = self.applied, %error, "reduction failed");
        FoldFailure::new(
            accumulator,
            FoldError::Reduction {
                position: self.applied,
                source: Box::new(error),
            },
        )
    }
}
