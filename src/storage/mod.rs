//! Storage layer: record sources, the record journal and materialized views

pub mod journal;
pub mod materialized_view;
pub mod source;

pub use journal::*;
pub use materialized_view::*;
pub use source::*;
