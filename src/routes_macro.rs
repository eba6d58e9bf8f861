/// Builds a [`RouterBuilder`](crate::RouterBuilder) from `METHOD "path" => handler` entries.
///
/// Evaluates to `Result<RouterBuilder<_>, RouterError>`.
///
/// ```
/// use composite_router::routes;
///
/// let router = routes! {
///     ALL "/api/*" => "auth",
///     GET "/api/users/:id" => "show",
/// }
/// .and_then(|b| b.freeze())
/// .unwrap();
///
/// let found = router.find("GET", "/api/users/7").unwrap();
/// assert_eq!(found.handlers.copied().collect::<Vec<_>>(), ["auth", "show"]);
/// assert_eq!(found.params.get("id"), Some("7"));
/// ```
#[macro_export]
macro_rules! routes {
    {$($method:ident $path:expr => $handler:expr),+ $(,)?} => {{
        (|| -> ::std::result::Result<_, $crate::RouterError> {
            let mut __builder = $crate::RouterBuilder::new();
            $(__builder.add(stringify!($method), $path, $handler)?;)+
            ::std::result::Result::Ok(__builder)
        })()
    }};
}
