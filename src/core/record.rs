//! Source records folded into views

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique record identifier
pub type RecordId = u64;

/// One observed amount booked against a category.
///
/// Records are immutable once produced; a fold reads each one exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Record ID
    pub id: RecordId,
    /// Category label the amount belongs to
    pub category: String,
    /// Amount observed
    pub amount: f64,
}

impl SourceRecord {
    /// Create a new record
    pub fn new(id: RecordId, category: impl Into<String>, amount: f64) -> Self {
        Self {
            id,
            category: category.into(),
            amount,
        }
    }

    /// Get record ID
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Get category
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Get amount
    pub fn amount(&self) -> f64 {
        self.amount
    }
}

impl fmt::Display for SourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Source record: {} Cat={} Amount={}",
            self.id, self.category, self.amount
        )
    }
}
