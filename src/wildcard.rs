use crate::table::RouteTable;
use crate::{HandlerId, RouterError};

use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;

const TAIL_WILDCARD: &str = "(?:|/.*)";

/// The set of path keys a wildcard key like `/api/*` covers.
#[derive(Debug)]
pub(crate) enum WildcardPattern {
    Everything,
    Regex(Regex),
}

impl WildcardPattern {
    pub fn new(path: &str) -> Result<Self, RouterError> {
        if path == "*" {
            return Ok(Self::Everything);
        }

        let mut re = String::with_capacity(path.len() + 16);
        re.push('^');
        let (head, tail) = match path.find("/*") {
            Some(pos) => (&path[..pos], Some(&path[pos + 2..])),
            None => (path, None),
        };
        push_glob(&mut re, head);
        if let Some(tail) = tail {
            re.push_str(TAIL_WILDCARD);
            push_glob(&mut re, tail);
        }
        re.push('$');

        Ok(Self::Regex(Regex::new(&re)?))
    }

    pub fn is_match(&self, key: &str) -> bool {
        match self {
            Self::Everything => true,
            Self::Regex(re) => re.is_match(key),
        }
    }
}

fn push_glob(re: &mut String, s: &str) {
    for (i, part) in s.split('*').enumerate() {
        if i > 0 {
            re.push_str(".*");
        }
        re.push_str(&regex::escape(part));
    }
}

/// Memoized wildcard patterns, owned by one builder and dropped with it.
#[derive(Debug, Default)]
pub(crate) struct WildcardCache {
    patterns: HashMap<Box<str>, Arc<WildcardPattern>>,
}

impl WildcardCache {
    pub fn get(&mut self, path: &str) -> Result<Arc<WildcardPattern>, RouterError> {
        if let Some(p) = self.patterns.get(path) {
            return Ok(Arc::clone(p));
        }
        let p = Arc::new(WildcardPattern::new(path)?);
        self.patterns.insert(path.into(), Arc::clone(&p));
        Ok(p)
    }

    /// Returns a copy of the chain of the longest middleware key covering `path`.
    ///
    /// Keys of equal length keep their registration order.
    pub fn find_middleware(
        &mut self,
        middleware: &RouteTable,
        path: &str,
    ) -> Result<Option<Vec<HandlerId>>, RouterError> {
        let mut keys: Vec<&str> = middleware.keys().collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()));

        for key in keys {
            if self.get(key)?.is_match(path) {
                return Ok(middleware.get(key).map(<[HandlerId]>::to_vec));
            }
        }
        Ok(None)
    }
}
