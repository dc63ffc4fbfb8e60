//! Record sources: where a fold pulls its input from.
//!
//! A source yields records in a defined order and signals the end of the
//! sequence with `Ok(None)`. Anything that behaves like a cursor (an
//! in-memory list, a database cursor, a message feed) can sit behind
//! [`RecordSource`].

use crate::error::Result;
use async_trait::async_trait;
use futures::stream::{Stream, StreamExt};

/// Trait for ordered record producers
#[async_trait]
pub trait RecordSource<R>: Send {
    /// Fetch the next record. `Ok(None)` means the sequence is exhausted.
    async fn next_record(&mut self) -> Result<Option<R>>;
}

/// Source backed by an iterator of fallible items
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    records: I,
}

/// Iterator that wraps every item in `Ok`
pub type OkIter<I> = std::iter::Map<I, fn(<I as Iterator>::Item) -> Result<<I as Iterator>::Item>>;

impl<I> IterSource<I> {
    /// Create a source from an iterator of `Result` items
    pub fn new(records: I) -> Self {
        Self { records }
    }
}

impl<I: Iterator> IterSource<OkIter<I>> {
    /// Create a source from records that cannot fail to load
    pub fn ok<T>(records: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        let wrap: fn(I::Item) -> Result<I::Item> = Ok;
        Self::new(records.into_iter().map(wrap))
    }
}

#[async_trait]
impl<I, R> RecordSource<R> for IterSource<I>
where
    I: Iterator<Item = Result<R>> + Send,
    R: Send,
{
    async fn next_record(&mut self) -> Result<Option<R>> {
        self.records.next().transpose()
    }
}

/// Source backed by an asynchronous stream.
///
/// The stream must be `Unpin`; wrap others with `Box::pin`.
pub struct StreamSource<S> {
    stream: S,
}

impl<S> StreamSource<S> {
    /// Create a source from a stream of `Result` items
    pub fn new(stream: S) -> Self {
        Self { stream }
    }
}

#[async_trait]
impl<S, R> RecordSource<R> for StreamSource<S>
where
    S: Stream<Item = Result<R>> + Unpin + Send,
    R: Send,
{
    async fn next_record(&mut self) -> Result<Option<R>> {
        self.stream.next().await.transpose()
    }
}
