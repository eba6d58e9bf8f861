use composite_router::{
    routes, Config, FrozenRouter, Router, RouterBuilder, RouterError, METHOD_ALL,
};

use std::collections::HashMap;

type Found = Option<(Vec<i32>, HashMap<String, String>)>;

fn handlers<T: Copy>(router: &FrozenRouter<T>, method: &str, path: &str) -> Option<Vec<T>> {
    router
        .find(method, path)
        .map(|m| m.handlers.copied().collect())
}

fn found(router: &FrozenRouter<i32>, method: &str, path: &str) -> Found {
    router
        .find(method, path)
        .map(|m| (m.handlers.copied().collect(), m.params.to_map()))
}

#[test]
fn router_common() {
    let mut builder: RouterBuilder<usize> = RouterBuilder::new();
    builder
        .add("GET", "/user/:user_id/post/:post_id", 1)
        .unwrap()
        .add("GET", "/user/:user_id/profile", 2)
        .unwrap()
        .add("GET", "/explore", 3)
        .unwrap()
        .add("POST", "/user/:user_id/post", 4)
        .unwrap();
    let router = builder.freeze().unwrap();

    let cases: &[(&str, &str, usize, &[(&str, &str)])] = &[
        (
            "GET",
            "/user/asd/post/123",
            1,
            &[("user_id", "asd"), ("post_id", "123")],
        ),
        ("GET", "/user/asd/profile", 2, &[("user_id", "asd")]),
        ("GET", "/explore", 3, &[]),
        ("POST", "/user/asd/post", 4, &[("user_id", "asd")]),
    ];

    for &(method, url, data, captures) in cases {
        let found = router.find(method, url).unwrap();
        assert_eq!(found.handlers.copied().collect::<Vec<_>>(), [data]);
        assert_eq!(&*found.params, captures);
    }

    assert!(router.find("GET", "/user/asd/post").is_none());
    assert!(router.find("POST", "/explore").is_none());
    assert!(router.find("GET", "/user/asd/profile/").is_none());
    assert!(router.find("GET", "").is_none());
}

#[test]
fn repeated_lookups_are_identical() {
    let router = routes! {
        ALL "*" => 0,
        GET "/a/:x" => 1,
        GET "/b" => 2,
        ALL "/c/*" => 3,
    }
    .and_then(|b| b.freeze())
    .unwrap();

    for &path in &["/a/1", "/b", "/c", "/c/d/e", "/zzz", ""] {
        let first = found(&router, "GET", path);
        for _ in 0..3 {
            assert_eq!(found(&router, "GET", path), first);
        }
    }
}

#[test]
fn static_paths_have_no_params() {
    let router = routes! {
        GET "/users/me" => "me",
        GET "/users/:id" => "user",
    }
    .and_then(|b| b.freeze())
    .unwrap();

    let found = router.find("GET", "/users/me").unwrap();
    assert_eq!(found.handlers.copied().collect::<Vec<_>>(), ["me"]);
    assert!(found.params.is_empty());

    let found = router.find("GET", "/users/42").unwrap();
    assert_eq!(found.handlers.copied().collect::<Vec<_>>(), ["user"]);
    assert_eq!(found.params.get("id"), Some("42"));
}

#[test]
fn longest_wildcard_seeds_new_routes() {
    let router = routes! {
        ALL "*" => "root",
        ALL "/api/*" => "api",
        ALL "/api/users" => "users",
    }
    .and_then(|b| b.freeze())
    .unwrap();

    assert_eq!(handlers(&router, "GET", "/api/users"), Some(vec!["root", "api", "users"]));
    assert_eq!(handlers(&router, "GET", "/api/other"), Some(vec!["root", "api"]));
    assert_eq!(handlers(&router, "GET", "/api"), Some(vec!["root", "api"]));
    assert_eq!(handlers(&router, "GET", "/elsewhere"), Some(vec!["root"]));
}

#[test]
fn wildcard_attaches_to_earlier_routes() {
    let router = routes! {
        GET "/api/users" => "users",
        GET "/api/users/:id" => "user",
        GET "/health" => "health",
        ALL "/api/*" => "auth",
    }
    .and_then(|b| b.freeze())
    .unwrap();

    assert_eq!(handlers(&router, "GET", "/api/users"), Some(vec!["users", "auth"]));
    assert_eq!(handlers(&router, "GET", "/api/users/1"), Some(vec!["user", "auth"]));
    assert_eq!(handlers(&router, "GET", "/health"), Some(vec!["health"]));
}

#[test]
fn params_are_extracted() {
    let router = routes! {
        ALL "*" => "log",
        GET "/users/:id" => "show",
        GET "/users/:id" => "audit",
    }
    .and_then(|b| b.freeze())
    .unwrap();

    let found = router.find("GET", "/users/42").unwrap();
    assert_eq!(found.handlers.len(), 3);
    assert_eq!(
        found.handlers.rev().copied().collect::<Vec<_>>(),
        ["audit", "show", "log"]
    );
    assert_eq!(&*found.params, [("id", "42")]);
    assert_eq!(found.params.parse::<u32>("id"), Some(Ok(42)));
    assert!(found.params.parse::<u32>("missing").is_none());

    let map = found.params.to_map();
    assert_eq!(map.len(), 1);
    assert_eq!(map["id"], "42");
}

#[test]
fn repeated_param_names_last_wins() {
    let router = routes! {
        GET "/org/:id/user/:id" => 1,
    }
    .and_then(|b| b.freeze())
    .unwrap();

    let found = router.find("GET", "/org/o1/user/u2").unwrap();
    assert_eq!(&*found.params, [("id", "o1"), ("id", "u2")]);
    assert_eq!(found.params.get("id"), Some("u2"));
    assert_eq!(found.params.to_map()["id"], "u2");
}

#[test]
fn unregistered_method_uses_catch_all() {
    let router = routes! {
        ALL "*" => 0,
        ALL "/files/:name" => 1,
        GET "/only-get" => 2,
    }
    .and_then(|b| b.freeze())
    .unwrap();

    for &path in &["/files/a.txt", "/only-get", "/", "/x/y"] {
        let all = found(&router, METHOD_ALL, path);
        assert!(all.is_some());
        assert_eq!(found(&router, "PATCH", path), all, "{}", path);
        assert_eq!(found(&router, "PROPFIND", path), all, "{}", path);
    }

    assert_eq!(handlers(&router, "GET", "/only-get"), Some(vec![0, 2]));
    assert_eq!(handlers(&router, "POST", "/only-get"), Some(vec![0]));
}

#[test]
fn unknown_methods_are_registered() {
    let mut builder = RouterBuilder::new();
    builder.add("PROPFIND", "/dav/:file", 7).unwrap();
    let router = builder.freeze().unwrap();

    assert!(router.methods().any(|m| m == "PROPFIND"));
    assert!(router.methods().any(|m| m == METHOD_ALL));
    assert_eq!(handlers(&router, "PROPFIND", "/dav/x"), Some(vec![7]));
    assert!(router.find("GET", "/dav/x").is_none());
    assert_eq!(router.handler_count(), 1);
}

#[test]
fn conflicting_params_are_rejected() {
    let mut builder = RouterBuilder::new();
    builder
        .add("GET", "/foo/:id", 1)
        .unwrap()
        .add("GET", "/foo/:name", 2)
        .unwrap();

    match builder.freeze() {
        Err(RouterError::UnsupportedPath(path)) => assert_eq!(&*path, "/foo/:name"),
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }

    let mut builder = RouterBuilder::new();
    builder
        .add("GET", "/a/:id", 1)
        .unwrap()
        .add("GET", "/a/:id/*", 2)
        .unwrap()
        .add("GET", "/:x/b", 3)
        .unwrap();
    assert!(builder.freeze().is_err());
}

#[test]
fn overlapping_params_share_groups() {
    let mut builder = RouterBuilder::new();
    builder
        .add("GET", "/u/:id/p/:id", 1)
        .unwrap()
        .add("GET", "/u/:uid/p", 2)
        .unwrap()
        .add("GET", "/u/:id/*", 3)
        .unwrap()
        .add("GET", "/application/c/:a", 4)
        .unwrap()
        .add("GET", "/application/b/:id", 5)
        .unwrap();
    let router = builder.freeze().unwrap();

    // wildcard keys cover registered keys textually, `/u/:id/*` skips `/u/:uid/p`
    assert_eq!(handlers(&router, "GET", "/u/1/p"), Some(vec![2]));
    assert_eq!(handlers(&router, "GET", "/u/1/p/2"), Some(vec![1, 3]));
    assert_eq!(handlers(&router, "GET", "/u/1/anything/else"), Some(vec![3]));
    assert_eq!(handlers(&router, "GET", "/application/b/9"), Some(vec![5]));
}

#[test]
fn method_middleware_is_isolated() {
    let router = routes! {
        ALL "*" => "all-mw",
        GET "/r" => "get-r",
        GET "/admin/*" => "get-admin",
        POST "/admin/panel" => "post-panel",
        ALL "/late" => "late",
        ALL "/x/*" => "late-mw",
        GET "/x/y" => "get-xy",
    }
    .and_then(|b| b.freeze())
    .unwrap();

    // method middleware stays in its method
    assert_eq!(handlers(&router, "POST", "/admin/panel"), Some(vec!["all-mw", "post-panel"]));
    assert_eq!(handlers(&router, "GET", "/admin/panel"), Some(vec!["all-mw", "get-admin"]));

    // catch-all registrations reach specialized methods
    assert_eq!(handlers(&router, "GET", "/late"), Some(vec!["all-mw", "late"]));
    assert_eq!(handlers(&router, "POST", "/late"), Some(vec!["all-mw", "late"]));
    assert_eq!(handlers(&router, "GET", "/x/y"), Some(vec!["all-mw", "late-mw", "get-xy"]));

    // and method routes never leak into the catch-all
    assert_eq!(handlers(&router, METHOD_ALL, "/r"), Some(vec!["all-mw"]));
    assert_eq!(handlers(&router, "PUT", "/r"), Some(vec!["all-mw"]));
}

#[test]
fn root_wildcard_shorthand() {
    let router = routes! {
        GET "/*" => 1,
        GET "/a" => 2,
    }
    .and_then(|b| b.freeze())
    .unwrap();

    assert_eq!(handlers(&router, "GET", "/a"), Some(vec![1, 2]));
    assert_eq!(handlers(&router, "GET", "/b/c"), Some(vec![1]));
    assert_eq!(handlers(&router, "GET", ""), Some(vec![1]));
}

#[test]
fn empty_router_finds_nothing() {
    let router = RouterBuilder::<()>::new().freeze().unwrap();
    assert!(router.find("GET", "/").is_none());
    assert!(router.find(METHOD_ALL, "").is_none());
    assert_eq!(router.handler_count(), 0);
}

#[test]
fn expander_registers_every_variant() {
    let mut builder = RouterBuilder::new().expander(|path: &str| {
        let stripped = path.strip_suffix('?')?;
        let base = &stripped[..stripped.rfind('/')?];
        Some(vec![
            if base.is_empty() { "/".to_owned() } else { base.to_owned() },
            stripped.to_owned(),
        ])
    });
    builder
        .add("GET", "/animals/:kind?", "animals")
        .unwrap()
        .add("GET", "/zoo", "zoo")
        .unwrap();
    let router = builder.freeze().unwrap();

    assert_eq!(handlers(&router, "GET", "/animals"), Some(vec!["animals"]));
    let found = router.find("GET", "/animals/cat").unwrap();
    assert_eq!(found.params.get("kind"), Some("cat"));
    assert_eq!(handlers(&router, "GET", "/zoo"), Some(vec!["zoo"]));
    assert!(router.find("GET", "/animals/cat/tail").is_none());
}

#[test]
fn staged_router_lifecycle() {
    let mut router: Router<u8> = Router::new();
    router.add("GET", "/a/:b", 1).unwrap();
    assert!(!router.is_frozen());
    assert!(router.find("GET", "/a/x").is_none());
    assert!(router.as_frozen().is_none());

    router.freeze().unwrap();
    assert!(router.is_frozen());
    assert_eq!(
        router.find("GET", "/a/x").map(|m| m.params.to_map()["b"].clone()),
        Some("x".to_owned())
    );

    assert!(matches!(router.add("GET", "/c", 2), Err(RouterError::AlreadyFrozen)));
    assert!(matches!(router.freeze(), Err(RouterError::AlreadyFrozen)));
    assert!(router.find("GET", "/c").is_none());
    assert_eq!(router.as_frozen().map(|r| r.handler_count()), Some(1));
}

#[test]
fn failed_freeze_keeps_building() {
    let mut router: Router<u8> = Router::new();
    router
        .add("GET", "/foo/:id", 1)
        .unwrap()
        .add("GET", "/foo/:name", 2)
        .unwrap();

    assert!(matches!(router.freeze(), Err(RouterError::UnsupportedPath(_))));
    assert!(!router.is_frozen());
    assert!(router.add("GET", "/bar", 3).is_ok());
}

#[test]
fn long_routes_freeze_on_small_stacks() {
    let worker = std::thread::Builder::new()
        .stack_size(2 << 20)
        .spawn(|| {
            let prefix = "a".repeat(10_000);
            let mut builder = RouterBuilder::new();
            builder
                .add("GET", &format!("/{}/:id", prefix), 1)
                .unwrap()
                .add("GET", &format!("/{}b/:id", prefix), 2)
                .unwrap();
            let router = builder.freeze().unwrap();

            let path = format!("/{}/42", prefix);
            let found = router.find("GET", &path).unwrap();
            let handlers = found.handlers.copied().collect::<Vec<_>>();
            (handlers, found.params.get("id").map(str::to_owned))
        })
        .unwrap();

    assert_eq!(worker.join().unwrap(), (vec![1], Some("42".to_owned())));
}

#[test]
fn nest_limit_bounds_branching_prefixes() {
    let build = |config: Config| {
        let mut builder = RouterBuilder::new().with_config(config);
        for i in 1..=300 {
            builder
                .add("GET", &format!("/{}/:x", "a".repeat(i)), i)
                .unwrap();
        }
        builder.freeze()
    };

    assert!(matches!(build(Config::default()), Err(RouterError::Regex(_))));

    let worker = std::thread::Builder::new()
        .stack_size(32 << 20)
        .spawn(move || {
            let router = build(Config::default().nest_limit(1_000)).unwrap();
            let path = format!("/{}/v", "a".repeat(123));
            router
                .find("GET", &path)
                .map(|m| m.handlers.copied().collect::<Vec<_>>())
        })
        .unwrap();
    assert_eq!(worker.join().unwrap(), Some(vec![123]));
}

#[test]
fn size_limit_is_applied() {
    let mut builder = RouterBuilder::new().with_config(Config::default().size_limit(16));
    for i in 0..64 {
        builder.add("GET", &format!("/r{}/:id", i), i).unwrap();
    }
    assert!(matches!(builder.freeze(), Err(RouterError::Regex(_))));
}

#[test]
fn macro_reports_errors() {
    let built = routes! {
        GET "/a" => 1,
    };
    assert!(built.is_ok());

    let frozen = routes! {
        GET "/a/:x" => 1,
        GET "/a/:y" => 2,
    }
    .and_then(|b| b.freeze());
    assert!(frozen.is_err());
}

#[test]
fn frozen_router_is_shareable() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}

    let router = routes! {
        GET "/t/:n" => 1_u32,
    }
    .and_then(|b| b.freeze())
    .unwrap();
    assert_send_sync(&router);

    let router = std::sync::Arc::new(router);
    let threads: Vec<_> = (0..4)
        .map(|i| {
            let router = std::sync::Arc::clone(&router);
            std::thread::spawn(move || {
                let path = format!("/t/{}", i);
                let found = router.find("GET", &path).unwrap();
                found.params.parse::<u32>("n").unwrap().unwrap()
            })
        })
        .collect();

    let mut seen: Vec<u32> = threads.into_iter().map(|t| t.join().unwrap()).collect();
    seen.sort_unstable();
    assert_eq!(seen, [0, 1, 2, 3]);
}
