use crate::router::{FrozenRouter, Match, Router};

pub use http::Method;

use http::Request;

impl<T> FrozenRouter<T> {
    /// Looks up the method and URI path of `req`.
    pub fn find_request<'a, B>(&'a self, req: &'a Request<B>) -> Option<Match<'a, T>> {
        self.find(req.method().as_str(), req.uri().path())
    }
}

impl<T> Router<T> {
    /// Looks up the method and URI path of `req`; `None` before freezing.
    pub fn find_request<'a, B>(&'a self, req: &'a Request<B>) -> Option<Match<'a, T>> {
        self.find(req.method().as_str(), req.uri().path())
    }
}
