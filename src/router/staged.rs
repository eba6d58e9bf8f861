use super::{FrozenRouter, Match, Router, RouterBuilder, State};

use crate::RouterError;

use tracing::warn;

impl<T> Router<T> {
    pub fn new() -> Self {
        Self::from(RouterBuilder::new())
    }

    /// Registers a route or wildcard middleware, see [`RouterBuilder::add`].
    ///
    /// Fails with [`RouterError::AlreadyFrozen`] once the router is frozen.
    pub fn add(
        &mut self,
        method: impl AsRef<str>,
        path: &str,
        handler: T,
    ) -> Result<&mut Self, RouterError> {
        match self.state {
            State::Building(ref mut builder) => {
                builder.add(method, path, handler)?;
                Ok(self)
            }
            State::Frozen(_) => Err(RouterError::AlreadyFrozen),
        }
    }

    /// Compiles all matchers and releases the registration tables.
    ///
    /// On error the router stays in the building state. Freezing twice fails
    /// with [`RouterError::AlreadyFrozen`].
    pub fn freeze(&mut self) -> Result<(), RouterError> {
        let builder = match self.state {
            State::Building(ref mut builder) => builder,
            State::Frozen(_) => return Err(RouterError::AlreadyFrozen),
        };
        let (matchers, fallback) = builder.compile()?;
        let handlers = builder.take_handlers();
        self.state = State::Frozen(FrozenRouter::new(handlers, matchers, fallback));
        Ok(())
    }

    /// Looks up `method` and `path`; always `None` before [`freeze`](Router::freeze).
    pub fn find<'a>(&'a self, method: &str, path: &'a str) -> Option<Match<'a, T>> {
        match self.state {
            State::Frozen(ref router) => router.find(method, path),
            State::Building(_) => {
                warn!(method, path, "lookup on a router that is not frozen");
                None
            }
        }
    }

    pub fn is_frozen(&self) -> bool {
        matches!(self.state, State::Frozen(_))
    }

    pub fn as_frozen(&self) -> Option<&FrozenRouter<T>> {
        match self.state {
            State::Frozen(ref router) => Some(router),
            State::Building(_) => None,
        }
    }
}

impl<T> From<RouterBuilder<T>> for Router<T> {
    fn from(builder: RouterBuilder<T>) -> Self {
        Self {
            state: State::Building(builder),
        }
    }
}

impl<T> From<FrozenRouter<T>> for Router<T> {
    fn from(router: FrozenRouter<T>) -> Self {
        Self {
            state: State::Frozen(router),
        }
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}
