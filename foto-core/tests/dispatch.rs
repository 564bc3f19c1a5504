//! Dispatch without HTTP: match, resolve, invoke, negative outcomes.

use std::sync::{Arc, Mutex};

use foto_core::controller::ControllerDef;
use foto_core::dispatch::NOT_FOUND_BODY;
use foto_core::{Container, ControllerRegistry, Dispatcher, HandlerId, Outcome, ResolutionError, Response, Router};

/// Records every call as (handler, params).
#[derive(Clone, Default)]
struct Calls(Arc<Mutex<Vec<(String, Vec<String>)>>>);

impl Calls {
    fn take(&self) -> Vec<(String, Vec<String>)> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

struct Home {
    calls: Arc<Calls>,
}

impl Home {
    fn index(&self, params: &[String], response: &mut Response) {
        self.calls.0.lock().unwrap().push(("Home@index".into(), params.to_vec()));
        response.write("home");
    }
}

struct Photo {
    calls: Arc<Calls>,
}

impl Photo {
    fn index(&self, params: &[String], response: &mut Response) {
        self.calls.0.lock().unwrap().push(("Photo@index".into(), params.to_vec()));
        response.write("photos");
    }

    fn show(&self, params: &[String], response: &mut Response) {
        self.calls.0.lock().unwrap().push(("Photo@show".into(), params.to_vec()));
        response.write(format!("photo {}", params.join(",")));
    }

    fn create(&self, params: &[String], response: &mut Response) {
        self.calls.0.lock().unwrap().push(("Photo@create".into(), params.to_vec()));
        response.set_status(201).write("created");
    }
}

fn registry() -> ControllerRegistry {
    let mut registry = ControllerRegistry::new();
    registry
        .register(
            ControllerDef::new("Home", |c: &Container| Home {
                calls: c.resolve::<Calls>().unwrap(),
            })
            .action("index", Home::index),
        )
        .register(
            ControllerDef::new("Photo", |c: &Container| Photo {
                calls: c.resolve::<Calls>().unwrap(),
            })
            .action("index", Photo::index)
            .action("show", Photo::show)
            .action("create", Photo::create),
        );
    registry
}

fn dispatcher(router: Router) -> (Dispatcher, Calls) {
    let calls = Calls::default();
    let mut container = Container::new();
    container.register_instance(calls.clone());
    (Dispatcher::new(router, registry(), container), calls)
}

fn photo_site() -> (Dispatcher, Calls) {
    let mut router = Router::new();
    router.get("/", "Home@index").unwrap();
    router.get("/photos", "Photo@index").unwrap();
    router.get("/photos/{id}", "Photo@show").unwrap();
    dispatcher(router)
}

#[test]
fn scenario_root_and_photos() {
    let (d, calls) = photo_site();

    let out = d.dispatch("/", "GET");
    assert_eq!(out.status_code, 200);
    assert_eq!(out.body, b"home");
    assert_eq!(calls.take(), vec![("Home@index".to_string(), vec![])]);

    let out = d.dispatch("/photos/42", "GET");
    assert_eq!(out.status_code, 200);
    assert_eq!(out.body, b"photo 42");
    assert_eq!(calls.take(), vec![("Photo@show".to_string(), vec!["42".to_string()])]);
}

#[test]
fn scenario_not_found() {
    let (d, calls) = photo_site();

    for uri in ["/photos/42/extra", "/nope"] {
        let out = d.dispatch(uri, "GET");
        assert_eq!(out.status_code, 404, "{uri}");
        assert_eq!(out.body_str(), Some(NOT_FOUND_BODY));
        assert_eq!(out.body_str(), Some("404 - Page not found"));
    }
    assert!(calls.take().is_empty());
}

#[test]
fn trailing_slash_equivalence() {
    let (d, calls) = photo_site();
    let a = d.dispatch("/photos/", "GET");
    let b = d.dispatch("/photos", "GET");
    assert_eq!(a, b);
    assert_eq!(d.resolve("/photos/", "GET"), d.resolve("/photos", "GET"));
    assert_eq!(calls.take().len(), 2);
}

#[test]
fn query_and_fragment_are_ignored() {
    let (d, calls) = photo_site();
    let out = d.dispatch("/photos/7?size=large#top", "GET");
    assert_eq!(out.body, b"photo 7");
    assert_eq!(calls.take(), vec![("Photo@show".to_string(), vec!["7".to_string()])]);
}

#[test]
fn unmatched_method_is_not_found() {
    let (d, _calls) = photo_site();
    assert_eq!(d.resolve("/photos", "POST"), Outcome::NotFound);
    assert_eq!(d.dispatch("/photos", "POST").status_code, 404);
    // Unknown and lower-case methods never match.
    assert_eq!(d.resolve("/photos", "PATCH"), Outcome::NotFound);
    assert_eq!(d.resolve("/photos", "get"), Outcome::NotFound);
}

#[test]
fn handler_sets_its_own_status() {
    let mut router = Router::new();
    router.post("/photos", "Photo@create").unwrap();
    let (d, _calls) = dispatcher(router);
    let out = d.dispatch("/photos", "POST");
    assert_eq!(out.status_code, 201);
    assert_eq!(out.body, b"created");
    assert_eq!(out.content_type, None);
}

#[test]
fn params_are_positional_in_pattern_order() {
    let mut router = Router::new();
    router.get("/a/{y}/b/{x}", "Photo@show").unwrap();
    let (d, calls) = dispatcher(router);
    d.dispatch("/a/1/b/2", "GET");
    assert_eq!(
        calls.take(),
        vec![("Photo@show".to_string(), vec!["1".to_string(), "2".to_string()])]
    );
    assert_eq!(
        d.resolve("/a/1/b/2", "GET"),
        Outcome::Matched {
            handler: "Photo@show".parse::<HandlerId>().unwrap(),
            params: vec!["1".into(), "2".into()],
        }
    );
}

#[test]
fn first_registered_route_wins() {
    let mut router = Router::new();
    router.get("/photos/{id}", "Photo@show").unwrap();
    router.get("/photos/new", "Photo@create").unwrap();
    router.get("/photos/{id}", "Home@index").unwrap();
    let (d, calls) = dispatcher(router);

    let out = d.dispatch("/photos/new", "GET");
    assert_eq!(out.body, b"photo new");
    assert_eq!(calls.take(), vec![("Photo@show".to_string(), vec!["new".to_string()])]);
}

#[test]
fn same_path_different_methods() {
    let mut router = Router::new();
    router.get("/photos", "Photo@index").unwrap();
    router.post("/photos", "Photo@create").unwrap();
    let (d, _calls) = dispatcher(router);
    assert_eq!(d.dispatch("/photos", "GET").body, b"photos");
    assert_eq!(d.dispatch("/photos", "POST").status_code, 201);
}

#[test]
fn generated_paths_match_their_pattern() {
    let mut router = Router::new();
    router.put("/albums/{album}/photos/{photo}", "Photo@show").unwrap();
    let (d, calls) = dispatcher(router);
    for (album, photo) in [("1", "2"), ("summer-2024", "IMG_0001.jpg"), ("a b", "%20"), ("ü", "+")] {
        let uri = format!("/albums/{album}/photos/{photo}");
        assert_eq!(d.dispatch(&uri, "PUT").status_code, 200, "{uri}");
        assert_eq!(
            calls.take(),
            vec![("Photo@show".to_string(), vec![album.to_string(), photo.to_string()])]
        );
    }
}

#[test]
fn regex_metacharacters_in_literals() {
    let mut router = Router::new();
    router.get("/feed.xml", "Photo@index").unwrap();
    let (d, _calls) = dispatcher(router);
    assert_eq!(d.dispatch("/feed.xml", "GET").status_code, 200);
    assert_eq!(d.dispatch("/feedXxml", "GET").status_code, 404);
}

#[test]
fn controller_not_found() {
    let mut router = Router::new();
    router.get("/albums", "Album@index").unwrap();
    let (d, _calls) = dispatcher(router);

    let out = d.dispatch("/albums", "GET");
    assert_eq!(out.status_code, 500);
    assert_eq!(out.body_str(), Some("Controller not found: Album"));
    assert_eq!(
        d.resolve("/albums", "GET"),
        Outcome::HandlerResolutionError(ResolutionError::ControllerNotFound("Album".into()))
    );
}

#[test]
fn method_not_found() {
    let mut router = Router::new();
    router.delete("/photos/{id}", "Photo@destroy").unwrap();
    let (d, calls) = dispatcher(router);

    let out = d.dispatch("/photos/3", "DELETE");
    assert_eq!(out.status_code, 500);
    assert_eq!(out.body_str(), Some("Method not found: destroy"));
    assert_eq!(
        d.resolve("/photos/3", "DELETE"),
        Outcome::HandlerResolutionError(ResolutionError::MethodNotFound("destroy".into()))
    );
    assert!(calls.take().is_empty());
}

#[test]
fn dispatcher_is_shareable_across_threads() {
    let (d, calls) = photo_site();
    let d = Arc::new(d);
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let d = Arc::clone(&d);
            std::thread::spawn(move || d.dispatch(&format!("/photos/{i}"), "GET"))
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap().status_code, 200);
    }
    assert_eq!(calls.take().len(), 8);
}

#[test]
fn scheme_like_text_in_path_is_not_rewritten() {
    let mut router = Router::new();
    router.get("/", "Home@index").unwrap();
    router.get("/photos/{id}", "Photo@show").unwrap();
    let (d, calls) = dispatcher(router);

    for uri in ["/go/http://x", "/a/b://c/photos/42"] {
        let out = d.dispatch(uri, "GET");
        assert_eq!(out.status_code, 404, "{uri}");
        assert_eq!(out.body_str(), Some(NOT_FOUND_BODY));
        assert_eq!(d.resolve(uri, "GET"), Outcome::NotFound, "{uri}");
    }
    assert!(calls.take().is_empty());

    // Absolute-form targets still reduce to their path.
    assert_eq!(d.dispatch("http://example.com/photos/42", "GET").body, b"photo 42");
}

#[test]
fn resolve_and_dispatch_agree() {
    let mut router = Router::new();
    router.get("/photos/{id}", "Photo@show").unwrap();
    router.get("/albums", "Album@index").unwrap();
    router.get("/photos/{id}/edit", "Photo@edit").unwrap();
    let (d, calls) = dispatcher(router);

    for (uri, method) in [
        ("/photos/5", "GET"),
        ("/albums", "GET"),
        ("/photos/5/edit", "GET"),
        ("/photos/5", "POST"),
        ("/missing", "GET"),
    ] {
        let status = d.dispatch(uri, method).status_code;
        let expected = match d.resolve(uri, method) {
            Outcome::Matched { .. } => 200,
            Outcome::NotFound => 404,
            Outcome::HandlerResolutionError(_) => 500,
        };
        assert_eq!(status, expected, "{method} {uri}");
    }
    assert_eq!(calls.take(), vec![("Photo@show".to_string(), vec!["5".to_string()])]);
}
