//! Folding record sequences into materialized views

pub mod aggregator;
pub mod outcome;
pub mod reduce;
pub mod worker;

pub use aggregator::*;
pub use outcome::*;
pub use reduce::*;
pub use worker::*;
