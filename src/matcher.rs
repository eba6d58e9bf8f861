use crate::router::Params;
use crate::trie::Trie;
use crate::{Config, HandlerId, RouterError};

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use tracing::debug;

#[derive(Debug)]
struct HandlerData {
    handlers: Box<[HandlerId]>,
    /// `(name, group ordinal)`; `None` when the route has no parameters.
    params: Option<Box<[(Box<str>, usize)]>>,
}

/// Compiled lookup structure of one method. Immutable once built.
#[derive(Debug, Default)]
pub(crate) struct Matcher {
    regex: Option<Regex>,
    /// Indexed by the ordinal of the `$()` group closing each route. Sparse.
    routes: Vec<Option<HandlerData>>,
    statics: HashMap<Box<str>, Box<[HandlerId]>>,
}

impl Matcher {
    pub fn build(
        mut entries: Vec<(&str, &[HandlerId])>,
        config: &Config,
    ) -> Result<Self, RouterError> {
        if entries.is_empty() {
            return Ok(Self::default());
        }

        entries.sort_by_key(|&(path, _)| path.len());

        let mut trie = Trie::new();
        let mut statics: HashMap<Box<str>, Box<[HandlerId]>> = HashMap::new();
        let mut pending: Vec<(&str, HandlerData)> = Vec::new();

        for &(path, handlers) in &entries {
            let check_only = !path.contains('*') && !path.contains("/:");
            if check_only {
                statics.insert(path.into(), handlers.into());
            }

            let params = trie
                .insert(path, pending.len(), check_only)
                .map_err(|_| RouterError::unsupported(path))?;

            if check_only {
                continue;
            }

            let params = if params.is_empty() {
                None
            } else {
                Some(params.into_boxed_slice())
            };
            pending.push((
                path,
                HandlerData {
                    handlers: handlers.into(),
                    params,
                },
            ));
        }

        let compiled = trie.compile();

        for &mut (path, ref mut data) in pending.iter_mut() {
            if let Some(params) = data.params.as_mut() {
                for (_, slot) in params.iter_mut() {
                    *slot = compiled
                        .param_map
                        .get(*slot)
                        .copied()
                        .flatten()
                        .ok_or_else(|| RouterError::unsupported(path))?;
                }
            }
        }

        let mut pending: Vec<Option<HandlerData>> =
            pending.into_iter().map(|(_, data)| Some(data)).collect();
        let routes: Vec<Option<HandlerData>> = compiled
            .index_map
            .iter()
            .map(|slot| slot.and_then(|i| pending.get_mut(i)?.take()))
            .collect();

        let regex = match compiled.pattern {
            Some(ref pattern) => Some(
                RegexBuilder::new(pattern)
                    .size_limit(config.size_limit)
                    .nest_limit(config.nest_limit)
                    .build()?,
            ),
            None => None,
        };

        debug!(
            entries = entries.len(),
            statics = statics.len(),
            dynamic = routes.iter().filter(|r| r.is_some()).count(),
            groups = routes.len().saturating_sub(1),
            "compiled matcher"
        );

        Ok(Self {
            regex,
            routes,
            statics,
        })
    }

    pub fn lookup<'a>(&'a self, path: &'a str) -> Option<(&'a [HandlerId], Params<'a>)> {
        if let Some(handlers) = self.statics.get(path) {
            return Some((&**handlers, Params::new()));
        }

        let caps = self.regex.as_ref()?.captures(path)?;

        // exactly one route group participates: the one right after the `$`
        let data = (1..caps.len()).find_map(|i| {
            caps.get(i)?;
            self.routes.get(i)?.as_ref()
        })?;

        let mut params = Params::new();
        if let Some(ref bindings) = data.params {
            for (name, group) in bindings.iter() {
                if let Some(m) = caps.get(*group) {
                    params.push(name, m.as_str());
                }
            }
        }
        Some((&*data.handlers, params))
    }

    pub fn is_empty(&self) -> bool {
        self.regex.is_none() && self.statics.is_empty()
    }
}
