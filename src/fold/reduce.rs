//! Reduction steps applied by a fold.
//!
//! The aggregator owns the accumulator for the whole fold and lends it to the
//! reduction one record at a time. Two accumulator styles are supported:
//!
//! - **In place**: any `FnMut(&mut A, R) -> Result<()>` mutates the
//!   accumulator directly. It should validate the record before touching the
//!   accumulator, since a half-applied mutation stays visible after a failure.
//! - **Persistent**: [`persistent`] wraps `FnMut(&A, R) -> Result<A>` and swaps
//!   in the returned value. A failed step leaves the previous value in place.
//!
//! Accumulators that know how to update themselves implement
//! [`MaterializedView`] and are folded with [`Apply`].

use crate::error::Result;
use crate::storage::materialized_view::MaterializedView;

/// A single fold step: combine one record into the accumulator.
pub trait Reduce<A, R> {
    /// Apply `record` to `acc`.
    fn reduce(&mut self, acc: &mut A, record: R) -> Result<()>;
}

impl<A, R, F> Reduce<A, R> for F
where
    F: FnMut(&mut A, R) -> Result<()>,
{
    fn reduce(&mut self, acc: &mut A, record: R) -> Result<()> {
        self(acc, record)
    }
}

/// Reducer built from a function that returns a new accumulator per record.
#[derive(Debug, Clone)]
pub struct Persistent<F> {
    step: F,
}

/// Wrap a persistent-style step `(&A, R) -> A` as a [`Reduce`].
pub fn persistent<A, R, F>(step: F) -> Persistent<F>
where
    F: FnMut(&A, R) -> Result<A>,
{
    Persistent { step }
}

impl<A, R, F> Reduce<A, R> for Persistent<F>
where
    F: FnMut(&A, R) -> Result<A>,
{
    fn reduce(&mut self, acc: &mut A, record: R) -> Result<()> {
        *acc = (self.step)(acc, record)?;
        Ok(())
    }
}

/// Reducer that hands each record to the view's own [`MaterializedView::apply`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Apply;

impl<V, R> Reduce<V, R> for Apply
where
    V: MaterializedView<R>,
{
    fn reduce(&mut self, view: &mut V, record: R) -> Result<()> {
        view.apply(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_closure_mutates_in_place() {
        let mut step = |acc: &mut Vec<u32>, x: u32| -> Result<()> {
            acc.push(x * 2);
            Ok(())
        };
        let mut acc = Vec::new();
        step.reduce(&mut acc, 1).unwrap();
        step.reduce(&mut acc, 2).unwrap();
        assert_eq!(acc, vec![2, 4]);
    }

    #[test]
    fn test_persistent_replaces_value() {
        let mut step = persistent(|acc: &u64, x: u64| Ok(acc + x));
        let mut acc = 5;
        step.reduce(&mut acc, 7).unwrap();
        assert_eq!(acc, 12);
    }

    #[test]
    fn test_persistent_failure_keeps_previous_value() {
        let mut step = persistent(|acc: &u64, x: u64| {
            acc.checked_add(x)
                .ok_or_else(|| Error::Reduction("overflow".to_string()))
        });
        let mut acc = u64::MAX - 1;
        assert!(step.reduce(&mut acc, 5).is_err());
        assert_eq!(acc, u64::MAX - 1);
    }
}
