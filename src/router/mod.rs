mod builder;
mod frozen;
mod matched;
mod params;
mod staged;

pub use self::matched::{Handlers, Match};
pub use self::params::Params;

use crate::expand::ExpandPath;
use crate::matcher::Matcher;
use crate::table::RouteTable;
use crate::wildcard::WildcardCache;
use crate::Config;

use std::collections::HashMap;
use std::sync::Arc;

/// Registration phase of a router.
///
/// Routes and wildcard middleware accumulate in per-method tables.
/// [`freeze`](RouterBuilder::freeze) compiles them and yields a
/// [`FrozenRouter`]; the tables do not outlive that call.
pub struct RouterBuilder<T> {
    handlers: Vec<T>,
    methods: Vec<Box<str>>,
    tables: HashMap<Box<str>, MethodTables>,
    wildcards: WildcardCache,
    expander: Box<dyn ExpandPath + Send + Sync>,
    config: Config,
}

#[derive(Debug, Default, Clone)]
struct MethodTables {
    middleware: RouteTable,
    routes: RouteTable,
}

/// Lookup phase of a router. Immutable, safe to share across threads.
#[derive(Debug)]
pub struct FrozenRouter<T> {
    handlers: Box<[T]>,
    matchers: HashMap<Box<str>, Arc<Matcher>>,
    fallback: Arc<Matcher>,
}

/// A router that moves from building to frozen at runtime.
///
/// Prefer [`RouterBuilder`] when the two phases can be separate values; this
/// type exists for callers that keep one router slot for both phases.
#[derive(Debug)]
pub struct Router<T> {
    state: State<T>,
}

#[derive(Debug)]
enum State<T> {
    Building(RouterBuilder<T>),
    Frozen(FrozenRouter<T>),
}
