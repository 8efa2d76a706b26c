//! Storage-agnostic object store contract.
//!
//! # Responsibility
//! - Describe save/query/delete over entities of one type `T`.
//! - Let the registration pipeline run against any backing store.
//!
//! # Invariants
//! - Query results are snapshots: later mutation never shows through them.
//! - Results keep insertion order.
//! - "Nothing found" is an empty result or `None`, never an error.

use std::sync::Arc;

/// Object store for entities of type `T`.
///
/// Predicates must be pure and fast, and must not call back into the same
/// store: implementations may evaluate them while holding internal locks.
pub trait Repository<T> {
    /// Appends `item`. Duplicates are kept.
    fn save(&self, item: T);

    /// Returns a copy of every stored entity in insertion order.
    fn find_all(&self) -> Vec<T>;

    /// Returns every entity matching `predicate`, keeping relative order.
    fn find<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool;

    /// Returns the earliest entity matching `predicate`.
    fn find_first<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool;

    /// Removes one occurrence equal to `item`; does nothing when absent.
    fn delete(&self, item: &T);
}

impl<T, R> Repository<T> for Arc<R>
where
    R: Repository<T> + ?Sized,
{
    fn save(&self, item: T) {
        (**self).save(item)
    }

    fn find_all(&self) -> Vec<T> {
        (**self).find_all()
    }

    fn find<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        (**self).find(predicate)
    }

    fn find_first<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        (**self).find_first(predicate)
    }

    fn delete(&self, item: &T) {
        (**self).delete(item)
    }
}
