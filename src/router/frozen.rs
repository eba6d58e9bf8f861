use super::{FrozenRouter, Handlers, Match};

use crate::matcher::Matcher;

use std::collections::HashMap;
use std::sync::Arc;

impl<T> FrozenRouter<T> {
    pub(super) fn new(
        handlers: Vec<T>,
        matchers: HashMap<Box<str>, Arc<Matcher>>,
        fallback: Arc<Matcher>,
    ) -> Self {
        Self {
            handlers: handlers.into_boxed_slice(),
            matchers,
            fallback,
        }
    }

    /// Looks up the handler chain and parameters for `method` and `path`.
    ///
    /// Methods without routes of their own, including verbs never seen at
    /// registration, use the catch-all routes. `None` means no route matched.
    pub fn find<'a>(&'a self, method: &str, path: &'a str) -> Option<Match<'a, T>> {
        let matcher = self.matchers.get(method).unwrap_or(&self.fallback);
        if matcher.is_empty() {
            return None;
        }
        let (ids, params) = matcher.lookup(path)?;
        Some(Match {
            handlers: Handlers::new(&self.handlers, ids),
            params,
        })
    }

    /// Method names known at freeze time.
    pub fn methods(&self) -> impl Iterator<Item = &str> + '_ {
        self.matchers.keys().map(|m| &**m)
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}
