//! Core data types

pub mod record;

pub use record::*;
