//! Running a fold on its own tokio task

use crate::error::Result;
use crate::fold::aggregator::Aggregator;
use crate::fold::outcome::FoldResult;
use crate::fold::reduce::Reduce;
use crate::storage::source::RecordSource;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handle to a fold running on a worker task.
///
/// Dropping the handle does not stop the fold; call [`FoldHandle::cancel`].
pub struct FoldHandle<A> {
    cancel: CancellationToken,
    task: JoinHandle<FoldResult<A>>,
}

impl<A> FoldHandle<A> {
    /// Ask the fold to stop. It finishes the reduction in progress, if any,
    /// and reports `Cancelled` with the state reached so far.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token that cancels this fold, for wiring to other shutdown signals
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Whether the worker has stopped
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the fold to stop.
    ///
    /// The outer error is set only when the worker itself died (panic or
    /// runtime shutdown); fold outcomes and failures come back in the inner
    /// result.
    pub async fn join(self) -> Result<FoldResult<A>> {
        Ok(self.task.await?)
    }
}

impl Aggregator {
    /// Run [`Aggregator::fold_source`] on a dedicated task.
    pub fn spawn<A, R, S, F>(&self, seed: A, source: S, reducer: F) -> FoldHandle<A>
    where
        A: Send + 'static,
        R: Send + 'static,
        S: RecordSource<R> + 'static,
        F: Reduce<A, R> + Send + 'static,
    {
        self.spawn_with_token(seed, source, reducer, CancellationToken::new())
    }

    /// Like [`Aggregator::spawn`], stopped by a caller-owned token.
    pub fn spawn_with_token<A, R, S, F>(
        &self,
        seed: A,
        source: S,
        reducer: F,
        cancel: CancellationToken,
    ) -> FoldHandle<A>
    where
        A: Send + 'static,
        R: Send + 'static,
        S: RecordSource<R> + 'static,
        F: Reduce<A, R> + Send + 'static,
    {
        let token = cancel.clone();
        let aggregator = self.clone();

        let task = tokio::spawn(async move {
            aggregator.fold_source(seed, source, reducer, &token).await
        });

        FoldHandle { cancel, task }
    }
}
