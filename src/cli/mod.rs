//! Command-line interface

pub mod commands;
pub mod run;
pub mod sample;
pub mod snapshot;

pub use commands::*;
