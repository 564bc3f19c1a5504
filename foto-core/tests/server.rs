//! HTTP front-end over a real socket.

use std::sync::Arc;

use foto_core::controller::ControllerDef;
use foto_core::http::{serve, to_hyper_response};
use foto_core::{Container, ControllerRegistry, Dispatcher, Response, Router};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

struct Photo;

impl Photo {
    fn show(&self, params: &[String], response: &mut Response) {
        response.write(format!("<p>photo {}</p>", params[0]));
    }
}

fn dispatcher() -> Arc<Dispatcher> {
    let mut router = Router::new();
    router.get("/photos/{id}", "Photo@show").unwrap();
    router.get("/broken", "Photo@missing").unwrap();
    let mut registry = ControllerRegistry::new();
    registry.register(ControllerDef::new("Photo", |_: &Container| Photo).action("show", Photo::show));
    Arc::new(Dispatcher::new(router, registry, Container::new()))
}

async fn request(addr: std::net::SocketAddr, method: &str, target: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let req = format!("{method} {target} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(req.as_bytes()).await.unwrap();
    let mut out = String::new();
    stream.read_to_string(&mut out).await.unwrap();
    out
}

#[tokio::test]
async fn serves_dispatcher_responses() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(serve(listener, dispatcher(), async {
        let _ = stop_rx.await;
    }));

    let ok = request(addr, "GET", "/photos/42?x=1").await;
    assert!(ok.starts_with("HTTP/1.1 200 OK"), "{ok}");
    assert!(ok.to_ascii_lowercase().contains("content-type: text/html; charset=utf-8"), "{ok}");
    assert!(ok.ends_with("<p>photo 42</p>"), "{ok}");

    let missing = request(addr, "GET", "/nope").await;
    assert!(missing.starts_with("HTTP/1.1 404 Not Found"), "{missing}");
    assert!(missing.ends_with("404 - Page not found"), "{missing}");

    let broken = request(addr, "GET", "/broken").await;
    assert!(broken.starts_with("HTTP/1.1 500 Internal Server Error"), "{broken}");
    assert!(broken.ends_with("Method not found: missing"), "{broken}");

    stop_tx.send(()).unwrap();
    let () = server.await.unwrap();
}

#[test]
fn hyper_response_keeps_status_and_content_type() {
    let resp = to_hyper_response(Response::text(404, "404 - Page not found"));
    assert_eq!(resp.status(), 404);
    assert_eq!(resp.headers()["content-type"], "text/plain; charset=utf-8");

    let mut custom = Response::new();
    custom.set_status(418).set_content_type("application/json").write("{}");
    let resp = to_hyper_response(custom);
    assert_eq!(resp.status(), 418);
    assert_eq!(resp.headers()["content-type"], "application/json");
}
