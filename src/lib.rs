//! A path router that compiles all routes of a method into one regex.
//!
//! Routes are registered on a [`RouterBuilder`], then [`freeze`](RouterBuilder::freeze)
//! merges every path pattern of each method into a prefix tree and flattens it
//! into a single composite pattern. A lookup is one hash probe for literal
//! paths, otherwise one regex match, whatever the number of routes.
//!
//! Patterns support `:name` segment parameters and wildcard suffixes
//! (`/api/*`, `*`). A wildcard registration acts as middleware: its handler is
//! attached, in registration order, to every route it covers.
//!
//! ```
//! use composite_router::{RouterBuilder, METHOD_ALL};
//!
//! let mut builder = RouterBuilder::new();
//! builder
//!     .add(METHOD_ALL, "*", "log")?
//!     .add("GET", "/users/:id", "show_user")?
//!     .add("GET", "/health", "health")?;
//! let router = builder.freeze()?;
//!
//! let found = router.find("GET", "/users/42").unwrap();
//! assert_eq!(found.handlers.collect::<Vec<_>>(), [&"log", &"show_user"]);
//! assert_eq!(found.params.get("id"), Some("42"));
//!
//! // POST has no routes of its own and falls back to the catch-all ones
//! let found = router.find("POST", "/health").unwrap();
//! assert_eq!(found.handlers.collect::<Vec<_>>(), [&"log"]);
//! # Ok::<(), composite_router::RouterError>(())
//! ```

#![deny(unsafe_code)]

mod config;
mod error;
mod expand;
mod matcher;
mod router;
mod routes_macro;
mod table;
mod trie;
mod wildcard;

#[cfg(feature = "http-request")]
mod http_request;

pub use self::config::Config;
pub use self::error::RouterError;
pub use self::expand::{ExpandPath, NoExpansion};
pub use self::router::{FrozenRouter, Handlers, Match, Params, Router, RouterBuilder};

#[cfg(feature = "http-request")]
pub use self::http_request::Method;

/// Method name that registers a route or middleware for every method.
pub const METHOD_ALL: &str = "ALL";

/// Methods known before any registration.
pub const METHODS: [&str; 6] = ["GET", "POST", "PUT", "DELETE", "OPTIONS", "PATCH"];

/// Index of a handler in the router's handler store.
pub(crate) type HandlerId = usize;
