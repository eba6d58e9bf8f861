#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("unsupported path: {0:?}")]
    UnsupportedPath(Box<str>),

    #[error("can not add a route since the matcher is already built")]
    AlreadyFrozen,

    #[error("failed to compile route pattern: {0}")]
    Regex(#[from] regex::Error),
}

impl RouterError {
    pub(crate) fn unsupported(path: &str) -> Self {
        Self::UnsupportedPath(path.into())
    }
}
