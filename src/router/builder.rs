use super::{FrozenRouter, MethodTables, RouterBuilder};

use crate::expand::{ExpandPath, NoExpansion};
use crate::matcher::Matcher;
use crate::table::RouteTable;
use crate::wildcard::{WildcardCache, WildcardPattern};
use crate::{Config, HandlerId, RouterError, METHODS, METHOD_ALL};

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, trace};

impl<T> RouterBuilder<T> {
    pub fn new() -> Self {
        let mut methods: Vec<Box<str>> = Vec::with_capacity(METHODS.len() + 1);
        methods.push(METHOD_ALL.into());
        methods.extend(METHODS.iter().map(|&m| Box::from(m)));

        let mut tables = HashMap::new();
        tables.insert(METHOD_ALL.into(), MethodTables::default());

        Self {
            handlers: Vec::new(),
            methods,
            tables,
            wildcards: WildcardCache::default(),
            expander: Box::new(NoExpansion),
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets the expansion applied to every non-wildcard path before it is registered.
    pub fn expander(mut self, expander: impl ExpandPath + Send + Sync + 'static) -> Self {
        self.expander = Box::new(expander);
        self
    }

    /// Registers `handler` for `method` and `path`.
    ///
    /// `method` is an HTTP verb or [`METHOD_ALL`]; unknown verbs are accepted.
    /// A path ending in `*` registers wildcard middleware: the handler is
    /// appended to every route and middleware chain the wildcard covers, and
    /// routes added later inherit it. `"/*"` is shorthand for `"*"`.
    pub fn add(
        &mut self,
        method: impl AsRef<str>,
        path: &str,
        handler: T,
    ) -> Result<&mut Self, RouterError> {
        let method = method.as_ref();
        let path = if path == "/*" { "*" } else { path };

        let wildcard = if path.ends_with('*') {
            Some(self.wildcards.get(path)?)
        } else {
            None
        };

        let id = self.handlers.len();
        self.handlers.push(handler);

        if !self.methods.iter().any(|m| &**m == method) {
            self.methods.push(method.into());
        }
        self.specialize(method);

        match wildcard {
            Some(pattern) => self.add_middleware(method, path, &pattern, id)?,
            None => self.add_route(method, path, id)?,
        }
        Ok(self)
    }

    /// Compiles one matcher per known method.
    ///
    /// Methods that never received a registration of their own share the
    /// catch-all matcher.
    pub fn freeze(self) -> Result<FrozenRouter<T>, RouterError> {
        let (matchers, fallback) = self.compile()?;
        Ok(FrozenRouter::new(self.handlers, matchers, fallback))
    }
}

impl<T> RouterBuilder<T> {
    pub(super) fn compile(
        &self,
    ) -> Result<(HashMap<Box<str>, Arc<Matcher>>, Arc<Matcher>), RouterError> {
        let fallback = Arc::new(self.build_matcher(METHOD_ALL)?.unwrap_or_default());

        let mut matchers = HashMap::with_capacity(self.methods.len());
        let mut own = 0;
        for method in &self.methods {
            let matcher = if &**method == METHOD_ALL {
                Arc::clone(&fallback)
            } else {
                match self.build_matcher(method)? {
                    Some(m) => {
                        own += 1;
                        Arc::new(m)
                    }
                    None => Arc::clone(&fallback),
                }
            };
            matchers.insert(method.clone(), matcher);
        }

        info!(
            methods = self.methods.len(),
            specialized = own,
            handlers = self.handlers.len(),
            "router frozen"
        );
        Ok((matchers, fallback))
    }

    pub(super) fn take_handlers(&mut self) -> Vec<T> {
        std::mem::take(&mut self.handlers)
    }

    fn build_matcher(&self, method: &str) -> Result<Option<Matcher>, RouterError> {
        let own = self.tables.get(method);
        let all = self.tables.get(METHOD_ALL);

        let mut entries: Vec<(&str, &[HandlerId])> = Vec::new();
        let mut has_own = method == METHOD_ALL;

        let mut collect = |select: fn(&MethodTables) -> &RouteTable| {
            match own.map(select).filter(|t| !t.is_empty()) {
                Some(table) => {
                    has_own = true;
                    entries.extend(table.iter());
                }
                None if method != METHOD_ALL => {
                    if let Some(table) = all.map(select) {
                        entries.extend(table.iter());
                    }
                }
                None => {}
            }
        };
        collect(|t| &t.middleware);
        collect(|t| &t.routes);

        if !has_own {
            return Ok(None);
        }
        debug!(method, entries = entries.len(), "building matcher");
        Matcher::build(entries, &self.config).map(Some)
    }

    /// Gives `method` its own tables, seeded from the catch-all ones.
    fn specialize(&mut self, method: &str) {
        if self.tables.contains_key(method) {
            return;
        }
        let snapshot = self
            .tables
            .get(METHOD_ALL)
            .cloned()
            .unwrap_or_default();
        trace!(
            method,
            routes = snapshot.routes.len(),
            middleware = snapshot.middleware.len(),
            "specialized method tables"
        );
        self.tables.insert(method.into(), snapshot);
    }

    fn add_middleware(
        &mut self,
        method: &str,
        path: &str,
        pattern: &WildcardPattern,
        id: HandlerId,
    ) -> Result<(), RouterError> {
        let targets = self.target_methods(method);

        // seed every target before appending, so no seed already holds `id`
        for m in &targets {
            let exists = self
                .tables
                .get(&**m)
                .map_or(false, |t| t.middleware.get(path).is_some());
            if !exists {
                let seed = self.inherited_chain(m, path)?;
                if let Some(t) = self.tables.get_mut(&**m) {
                    t.middleware.set(path, seed);
                }
            }
        }

        for m in &targets {
            let tables = match self.tables.get_mut(&**m) {
                Some(t) => t,
                None => continue,
            };
            let mut attached = 0;
            for (key, handlers) in tables
                .middleware
                .iter_mut()
                .chain(tables.routes.iter_mut())
            {
                if pattern.is_match(key) {
                    handlers.push(id);
                    attached += 1;
                }
            }
            trace!(method = &**m, path, attached, "propagated wildcard");
        }
        Ok(())
    }

    fn add_route(&mut self, method: &str, path: &str, id: HandlerId) -> Result<(), RouterError> {
        let paths = match self.expander.expand(path) {
            Some(paths) if !paths.is_empty() => paths,
            _ => vec![path.to_owned()],
        };
        let targets = self.target_methods(method);

        for p in &paths {
            for m in &targets {
                let exists = self
                    .tables
                    .get(&**m)
                    .map_or(false, |t| t.routes.get(p).is_some());
                if !exists {
                    let seed = self.inherited_chain(m, p)?;
                    if let Some(t) = self.tables.get_mut(&**m) {
                        t.routes.set(p, seed);
                    }
                }
                let handlers = self
                    .tables
                    .get_mut(&**m)
                    .and_then(|t| t.routes.get_mut(p));
                if let Some(handlers) = handlers {
                    handlers.push(id);
                }
            }
        }
        Ok(())
    }

    /// Tables touched by a registration under `method`.
    fn target_methods(&self, method: &str) -> Vec<Box<str>> {
        self.tables
            .keys()
            .filter(|&m| method == METHOD_ALL || &**m == method)
            .cloned()
            .collect()
    }

    /// Chain a new key starts from: the closest covering middleware of the
    /// method, else of the catch-all method, else nothing.
    fn inherited_chain(
        &mut self,
        method: &str,
        path: &str,
    ) -> Result<Vec<HandlerId>, RouterError> {
        for m in [method, METHOD_ALL].iter() {
            if let Some(tables) = self.tables.get(*m) {
                if let Some(found) = self.wildcards.find_middleware(&tables.middleware, path)? {
                    return Ok(found);
                }
            }
        }
        Ok(Vec::new())
    }
}

impl<T> Default for RouterBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RouterBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterBuilder")
            .field("methods", &self.methods)
            .field("handlers", &self.handlers.len())
            .field("config", &self.config)
            .finish()
    }
}
