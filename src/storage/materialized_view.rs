//! Materialized views built by folding records.
//!
//! A view is an accumulator that knows how to absorb one record at a time.
//! Views never load or save themselves; callers seed them (fresh or from a
//! snapshot they loaded) and persist the result however they like.

use crate::core::record::SourceRecord;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Trait for views that update themselves from records.
///
/// A failed `apply` must leave the view as it was before the call.
pub trait MaterializedView<R> {
    /// Apply a single record to the view.
    fn apply(&mut self, record: R) -> Result<()>;
}

/// Running total of amounts per category.
///
/// Serializes as a plain `{category: total}` object with keys in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TotalsByCategory {
    totals: BTreeMap<String, f64>,
}

impl TotalsByCategory {
    /// Create a new, empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a view holding the given totals
    pub fn from_totals<I: IntoIterator<Item = (String, f64)>>(totals: I) -> Self {
        Self {
            totals: totals.into_iter().collect(),
        }
    }

    /// Total booked against a category, if any record touched it
    pub fn total(&self, category: &str) -> Option<f64> {
        self.totals.get(category).copied()
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Check if the view has no categories
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Categories and totals in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Total for the record's category once it is applied. Nothing is written.
    fn next_total(&self, record: &SourceRecord) -> Result<f64> {
        if !record.amount.is_finite() {
            return Err(Error::Reduction(format!(
                "record {} has non-finite amount {}",
                record.id, record.amount
            )));
        }
        let current = self.totals.get(&record.category).copied().unwrap_or(0.0);
        let next = current + record.amount;
        if !next.is_finite() {
            return Err(Error::Reduction(format!(
                "record {} overflows the total for category {}",
                record.id, record.category
            )));
        }
        Ok(next)
    }
}

impl MaterializedView<SourceRecord> for TotalsByCategory {
    fn apply(&mut self, record: SourceRecord) -> Result<()> {
        let next = self.next_total(&record)?;
        self.totals.insert(record.category, next);
        Ok(())
    }
}

impl<'a> MaterializedView<&'a SourceRecord> for TotalsByCategory {
    fn apply(&mut self, record: &'a SourceRecord) -> Result<()> {
        let next = self.next_total(record)?;
        match self.totals.get_mut(&record.category) {
            Some(total) => *total = next,
            None => {
                self.totals.insert(record.category.clone(), next);
            }
        }
        Ok(())
    }
}

impl fmt::Display for TotalsByCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(&self.totals).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fold::{Aggregator, Apply, FoldError};

    #[test]
    fn test_apply_creates_then_accumulates() {
        let mut view = TotalsByCategory::new();
        view.apply(SourceRecord::new(1, "A", 10.0)).unwrap();
        view.apply(SourceRecord::new(2, "B", 5.0)).unwrap();
        view.apply(&SourceRecord::new(3, "A", 3.0)).unwrap();

        assert_eq!(view.total("A"), Some(13.0));
        assert_eq!(view.total("B"), Some(5.0));
        assert_eq!(view.total("C"), None);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_non_finite_amount_rejected_without_change() {
        let mut view = TotalsByCategory::from_totals([("A".to_string(), 1.0)]);
        let before = view.clone();

        let err = view.apply(SourceRecord::new(9, "A", f64::NAN)).unwrap_err();
        assert!(matches!(err, Error::Reduction(_)));
        assert!(view.apply(&SourceRecord::new(10, "B", f64::INFINITY)).is_err());
        assert_eq!(view, before);
    }

    #[test]
    fn test_fold_by_reference() {
        let records = vec![
            SourceRecord::new(1, "A", 10.0),
            SourceRecord::new(2, "B", 5.0),
            SourceRecord::new(3, "A", 3.0),
        ];

        let view = Aggregator::default()
            .fold(TotalsByCategory::new(), &records, Apply)
            .unwrap();

        assert_eq!(view.total("A"), Some(13.0));
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_bad_amount_aborts_fold() {
        let records = vec![
            SourceRecord::new(1, "A", 10.0),
            SourceRecord::new(2, "A", f64::NEG_INFINITY),
            SourceRecord::new(3, "A", 1.0),
        ];

        let failure = Aggregator::default()
            .fold(TotalsByCategory::new(), records, Apply)
            .unwrap_err();

        assert!(matches!(failure.error(), FoldError::Reduction { position: 1, .. }));
        assert_eq!(failure.accumulator().total("A"), Some(10.0));
    }

    #[test]
    fn test_overflowing_total_aborts_fold() {
        let records = vec![
            SourceRecord::new(1, "A", f64::MAX),
            SourceRecord::new(2, "A", f64::MAX),
            SourceRecord::new(3, "A", -f64::MAX),
        ];

        let failure = Aggregator::default()
            .fold(TotalsByCategory::new(), &records, Apply)
            .unwrap_err();
        assert!(matches!(failure.error(), FoldError::Reduction { position: 1, .. }));
        assert_eq!(failure.accumulator().total("A"), Some(f64::MAX));

        let failure = Aggregator::default()
            .fold(TotalsByCategory::new(), records, Apply)
            .unwrap_err();
        assert!(matches!(failure.error(), FoldError::Reduction { position: 1, .. }));

        let json = serde_json::to_string(failure.accumulator()).unwrap();
        let back: TotalsByCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, failure.accumulator());
    }

    #[test]
    fn test_json_snapshot_shape() {
        let view = TotalsByCategory::from_totals([
            ("b".to_string(), 5.0),
            ("a".to_string(), 13.0),
        ]);

        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value, serde_json::json!({"a": 13.0, "b": 5.0}));

        let back: TotalsByCategory = serde_json::from_value(value).unwrap();
        assert_eq!(back, view);
    }

    #[test]
    fn test_display_is_indented_json() {
        let view = TotalsByCategory::from_totals([("A".to_string(), 13.0)]);
        assert_eq!(view.to_string(), "{\n  \"A\": 13.0\n}");
        assert_eq!(TotalsByCategory::new().to_string(), "{}");
    }

    #[test]
    fn test_iter_in_key_order() {
        let view = TotalsByCategory::from_totals([
            ("z".to_string(), 1.0),
            ("m".to_string(), 2.0),
        ]);
        let keys: Vec<&str> = view.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["m", "z"]);
    }
}
