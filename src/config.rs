/// Compile limits applied to every composite pattern.
///
/// Each method's routes become one regex, so large route sets can exceed the
/// default limits of the regex engine; raise them here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Approximate upper bound, in bytes, of one compiled pattern.
    pub size_limit: usize,
    /// Maximum nesting depth of groups inside one pattern.
    ///
    /// Every prefix where routes branch opens one group, and a group inside
    /// it for each further branch along the same prefix. Route sets such as
    /// `/a/:x`, `/aa/:x`, `/aaa/:x`, ... nest one level per route and fail to
    /// freeze with [`RouterError::Regex`](crate::RouterError::Regex) past this
    /// limit. Raising it far above the default deepens the regex compiler's
    /// recursion, so keep it within what the freezing thread's stack allows.
    pub nest_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size_limit: 10 * (1 << 20),
            nest_limit: 250,
        }
    }
}

impl Config {
    pub fn size_limit(mut self, bytes: usize) -> Self {
        self.size_limit = bytes;
        self
    }

    pub fn nest_limit(mut self, depth: u32) -> Self {
        self.nest_limit = depth;
        self
    }
}
