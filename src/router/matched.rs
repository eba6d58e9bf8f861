use super::Params;
use crate::HandlerId;

use std::fmt;
use std::iter::FusedIterator;
use std::slice;

/// A successful lookup: the handler chain and the captured parameters.
#[derive(Debug, Clone)]
pub struct Match<'a, T> {
    pub handlers: Handlers<'a, T>,
    pub params: Params<'a>,
}

/// Handlers of a matched route, in registration order.
///
/// Wildcard handlers registered before the route come first.
pub struct Handlers<'a, T> {
    store: &'a [T],
    ids: slice::Iter<'a, HandlerId>,
}

impl<'a, T> Handlers<'a, T> {
    /// Every id must index into `store`.
    pub(crate) fn new(store: &'a [T], ids: &'a [HandlerId]) -> Self {
        debug_assert!(ids.iter().all(|&id| id < store.len()));
        Self {
            store,
            ids: ids.iter(),
        }
    }
}

impl<'a, T> Iterator for Handlers<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let &id = self.ids.next()?;
        Some(&self.store[id])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<T> DoubleEndedIterator for Handlers<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let &id = self.ids.next_back()?;
        Some(&self.store[id])
    }
}

impl<T> ExactSizeIterator for Handlers<'_, T> {}

impl<T> FusedIterator for Handlers<'_, T> {}

impl<T> Clone for Handlers<'_, T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store,
            ids: self.ids.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Handlers<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
