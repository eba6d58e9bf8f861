use std::collections::HashMap;
use std::ops::Deref;
use std::str::FromStr;

use smallvec::SmallVec;

/// Path parameters captured by a match, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params<'a> {
    buf: SmallVec<[(&'a str, &'a str); 8]>,
}

impl<'a> Params<'a> {
    /// Returns the value bound to `name`.
    ///
    /// A pattern may repeat a name (`/org/:id/user/:id`); the last one wins.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.buf
            .iter()
            .rev()
            .find_map(|&(k, v)| if name == k { Some(v) } else { None })
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        self.get(name).map(T::from_str)
    }

    pub fn to_map(&self) -> HashMap<String, String> {
        self.buf
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }
}

impl<'a> Deref for Params<'a> {
    type Target = [(&'a str, &'a str)];
    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl<'a> Params<'a> {
    pub(crate) fn new() -> Self {
        Self {
            buf: SmallVec::new(),
        }
    }

    pub(crate) fn push(&mut self, name: &'a str, value: &'a str) {
        self.buf.push((name, value));
    }
}
