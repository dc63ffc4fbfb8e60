//! Viewfold: materialized views by streaming fold
//!
//! Build a view by folding an ordered sequence of records into an
//! accumulator, one reduction at a time.
//!
//! # Core Concepts
//!
//! - **Records**: Immutable observations, read exactly once per fold
//! - **Accumulators**: The view under construction, owned by the fold while it runs
//! - **Reductions**: Steps that combine one record into the accumulator
//! - **Sources**: Ordered producers of records (lists, journals, streams)
//!
//! # Example
//!
//! ```
//! use viewfold::prelude::*;
//!
//! let records = vec![
//!     SourceRecord::new(1, "A", 10.0),
//!     SourceRecord::new(2, "B", 5.0),
//!     SourceRecord::new(3, "A", 3.0),
//! ];
//!
//! let view = Aggregator::default()
//!     .fold(TotalsByCategory::new(), records, Apply)
//!     .unwrap();
//!
//! assert_eq!(view.total("A"), Some(13.0));
//! assert_eq!(view.total("B"), Some(5.0));
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod fold;
pub mod storage;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::AggregatorConfig;
    pub use crate::core::*;
    pub use crate::error::{Error, Result};
    pub use crate::fold::*;
    pub use crate::storage::*;
}
