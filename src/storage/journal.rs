//! Record journal: append-only, ordered storage for source records

use crate::storage::source::{IterSource, OkIter};
use tracing::debug;

/// Source returned by [`RecordJournal::cursor`] and [`RecordJournal::replay_from`]
pub type JournalCursor<R> = IterSource<OkIter<std::vec::IntoIter<R>>>;

/// In-memory, append-only sequence of records.
///
/// Records are kept in append order and replayed in that order, so a fold
/// over a cursor sees exactly the sequence that was written.
#[derive(Debug, Clone)]
pub struct RecordJournal<R> {
    records: Vec<R>,
}

impl<R> RecordJournal<R> {
    /// Create an empty journal
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record
    pub fn append(&mut self, record: R) {
        self.records.push(record);
    }

    /// Append multiple records, preserving their order
    pub fn append_batch<I: IntoIterator<Item = R>>(&mut self, records: I) {
        let before = self.records.len();
        self.records.extend(records);
        debug!(
            appended = self.records.len() - before,
            total = self.records.len(),
            "journal batch appended"
        );
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if journal is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in append order
    pub fn records(&self) -> &[R] {
        &self.records
    }
}

impl<R: Clone> RecordJournal<R> {
    /// Source over every record, from the start
    pub fn cursor(&self) -> JournalCursor<R> {
        self.replay_from(0)
    }

    /// Source over the records from `offset` on.
    ///
    /// Pair with an accumulator checkpointed after `offset` records to resume
    /// an interrupted fold. An offset past the end yields nothing.
    pub fn replay_from(&self, offset: usize) -> JournalCursor<R> {
        let tail = self.records.get(offset..).unwrap_or(&[]);
        IterSource::ok(tail.to_vec())
    }
}

impl<R> Default for RecordJournal<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> FromIterator<R> for RecordJournal<R> {
    fn from_iter<T: IntoIterator<Item = R>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::SourceRecord;
    use crate::error::Error;
    use crate::fold::{Aggregator, Apply, FoldError};
    use crate::storage::materialized_view::{MaterializedView, TotalsByCategory};
    use crate::storage::source::RecordSource;
    use tokio_util::sync::CancellationToken;

    fn create_test_record(id: u64, category: &str) -> SourceRecord {
        SourceRecord::new(id, category, id as f64)
    }

    #[test]
    fn test_journal_append() {
        let mut journal = RecordJournal::new();
        assert!(journal.is_empty());

        journal.append(create_test_record(1, "A"));
        journal.append_batch(vec![create_test_record(2, "B"), create_test_record(3, "A")]);

        assert_eq!(journal.len(), 3);
        let ids: Vec<u64> = journal.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_cursor_replays_in_append_order() {
        let journal: RecordJournal<u32> = (0..5).collect();
        let mut cursor = journal.cursor();

        let mut seen = Vec::new();
        while let Some(x) = cursor.next_record().await.unwrap() {
            seen.push(x);
        }
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_replay_past_end_is_empty() {
        let journal: RecordJournal<u32> = (0..3).collect();
        let mut cursor = journal.replay_from(10);
        assert_eq!(cursor.next_record().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_resume_from_checkpoint_matches_full_fold() {
        let journal: RecordJournal<SourceRecord> = (1..=9)
            .map(|i| create_test_record(i, if i % 2 == 0 { "even" } else { "odd" }))
            .collect();
        let aggregator = Aggregator::default();
        let cancel = CancellationToken::new();

        // first pass dies on record 6
        let failure = aggregator
            .fold_source(
                TotalsByCategory::new(),
                journal.cursor(),
                |view: &mut TotalsByCategory, record: SourceRecord| -> crate::error::Result<()> {
                    if record.id == 6 {
                        return Err(Error::Reduction("transient".to_string()));
                    }
                    view.apply(record)
                },
                &cancel,
            )
            .await
            .unwrap_err();
        assert!(matches!(failure.error(), FoldError::Reduction { position: 5, .. }));

        // resume from the checkpoint with a healthy reducer
        let offset = failure.applied() as usize;
        let (checkpoint, _) = failure.into_parts();
        let resumed = aggregator
            .fold_source(checkpoint, journal.replay_from(offset), Apply, &cancel)
            .await
            .unwrap();

        let full = aggregator
            .fold_source(TotalsByCategory::new(), journal.cursor(), Apply, &cancel)
            .await
            .unwrap();

        assert_eq!(resumed.applied(), 4);
        assert_eq!(resumed.into_accumulator(), full.into_accumulator());
    }
}
