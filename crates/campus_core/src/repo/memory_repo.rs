//! Thread-safe in-memory implementation of [`Repository`].
//!
//! # Responsibility
//! - Hold entities in insertion order behind one coarse lock.
//! - Answer predicate queries with snapshot copies.
//!
//! # Invariants
//! - Contents are exactly the saved entities minus the deleted ones, in
//!   insertion order, with no deduplication.
//! - Every operation holds the lock for its full duration, including
//!   predicate evaluation. A predicate that calls back into the same store
//!   deadlocks.
//! - A poisoned lock is recovered: no operation leaves the sequence
//!   half-mutated, so a panicking predicate cannot corrupt it.

use crate::repo::repository::Repository;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Ordered, lock-guarded object store.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    items: Mutex<Vec<T>>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `items`, in iteration order.
    pub fn with_items(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: Mutex::new(items.into_iter().collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Clone + PartialEq,
{
    fn save(&self, item: T) {
        self.lock().push(item);
    }

    fn find_all(&self) -> Vec<T> {
        self.lock().clone()
    }

    fn find<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.lock()
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    fn find_first<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.lock().iter().find(|item| predicate(item)).cloned()
    }

    fn delete(&self, item: &T) {
        let mut items = self.lock();
        if let Some(position) = items.iter().position(|stored| stored == item) {
            items.remove(position);
        }
    }
}
