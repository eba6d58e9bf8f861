/// Turns one registration path into the concrete paths it stands for.
///
/// Used for optional segments such as `/animals/:kind?`. Returning `None`
/// or an empty list registers the path unchanged.
pub trait ExpandPath {
    fn expand(&self, path: &str) -> Option<Vec<String>>;
}

/// Registers every path as written.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoExpansion;

impl ExpandPath for NoExpansion {
    fn expand(&self, _: &str) -> Option<Vec<String>> {
        None
    }
}

impl<F> ExpandPath for F
where
    F: Fn(&str) -> Option<Vec<String>>,
{
    fn expand(&self, path: &str) -> Option<Vec<String>> {
        (self)(path)
    }
}
