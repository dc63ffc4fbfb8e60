//! Terminal states of a fold

use crate::error::Error;
use thiserror::Error;

/// Result of running a fold: it either stopped cleanly or aborted.
pub type FoldResult<A> = std::result::Result<FoldOutcome<A>, FoldFailure<A>>;

/// A fold that stopped without error.
#[derive(Debug, Clone, PartialEq)]
pub enum FoldOutcome<A> {
    /// The source was exhausted and every record was applied
    Completed {
        /// Final accumulator
        accumulator: A,
        /// Number of records applied
        applied: u64,
    },
    /// The caller cancelled the fold before the source was exhausted
    Cancelled {
        /// Accumulator after the last applied record
        accumulator: A,
        /// Number of records applied before cancellation
        applied: u64,
    },
}

impl<A> FoldOutcome<A> {
    /// Borrow the accumulator
    pub fn accumulator(&self) -> &A {
        match self {
            Self::Completed { accumulator, .. } | Self::Cancelled { accumulator, .. } => {
                accumulator
            }
        }
    }

    /// Take the accumulator
    pub fn into_accumulator(self) -> A {
        match self {
            Self::Completed { accumulator, .. } | Self::Cancelled { accumulator, .. } => {
                accumulator
            }
        }
    }

    /// Number of records applied
    pub fn applied(&self) -> u64 {
        match self {
            Self::Completed { applied, .. } | Self::Cancelled { applied, .. } => *applied,
        }
    }

    /// Whether the fold was cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Why a fold aborted.
///
/// `position` is the zero-based index of the record being fetched or
/// applied, which is also the number of records applied before the abort.
#[derive(Error, Debug)]
pub enum FoldError {
    /// The source failed to produce the record at `position`
    #[error("record source failed at position {position}: {source}")]
    Source {
        position: u64,
        #[source]
        source: Box<Error>,
    },

    /// The reduction rejected the record at `position`
    #[error("reduction failed at position {position}: {source}")]
    Reduction {
        position: u64,
        #[source]
        source: Box<Error>,
    },
}

impl FoldError {
    /// Position of the offending record
    pub fn position(&self) -> u64 {
        match self {
            Self::Source { position, .. } | Self::Reduction { position, .. } => *position,
        }
    }

    /// The originating error
    pub fn cause(&self) -> &Error {
        match self {
            Self::Source { source, .. } | Self::Reduction { source, .. } => source,
        }
    }
}

/// An aborted fold: the error plus the accumulator as it stood when the fold
/// stopped, so the caller can checkpoint or restart.
#[derive(Debug)]
pub struct FoldFailure<A> {
    accumulator: A,
    error: FoldError,
}

impl<A> FoldFailure<A> {
    pub(crate) fn new(accumulator: A, error: FoldError) -> Self {
        Self { accumulator, error }
    }

    /// Accumulator after the last successful application
    pub fn accumulator(&self) -> &A {
        &self.accumulator
    }

    /// Number of records applied before the abort
    pub fn applied(&self) -> u64 {
        self.error.position()
    }

    /// The abort reason
    pub fn error(&self) -> &FoldError {
        &self.error
    }

    /// Split into accumulator and error
    pub fn into_parts(self) -> (A, FoldError) {
        (self.accumulator, self.error)
    }
}

impl<A> From<FoldFailure<A>> for Error {
    fn from(failure: FoldFailure<A>) -> Self {
        Error::Fold(failure.error)
    }
}
