//! Async HTTP server: tokio + hyper. Every request goes through one shared `Dispatcher`.
//! Host/port: env HOST/PORT, overridable by the caller (e.g. CLI flags).

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response as HyperResponse};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::dispatch::Dispatcher;
use crate::response::{Response, TEXT_HTML};

/// Where to listen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Read HOST and PORT from the environment, falling back to the given defaults.
    /// An unparsable PORT falls back to the default.
    pub fn from_env(default_host: &str, default_port: u16) -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| default_host.to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(default_port);
        Self { host, port }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Convert a dispatcher response into a hyper response. Handlers that set no content type get HTML.
pub fn to_hyper_response(response: Response) -> HyperResponse<Full<Bytes>> {
    let content_type = response
        .content_type
        .unwrap_or_else(|| TEXT_HTML.to_owned());
    let built = HyperResponse::builder()
        .status(response.status_code)
        .header(hyper::header::CONTENT_TYPE, content_type)
        .body(Full::new(Bytes::from(response.body)));
    match built {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!(error = %e, "invalid response from handler");
            let mut resp = HyperResponse::new(Full::new(Bytes::from_static(b"Internal Server Error")));
            *resp.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
            resp
        }
    }
}

fn handle<B>(dispatcher: &Dispatcher, req: &Request<B>) -> HyperResponse<Full<Bytes>> {
    let uri = req.uri().to_string();
    let response = dispatcher.dispatch(&uri, req.method().as_str());
    tracing::debug!(method = %req.method(), %uri, status = response.status_code, "request handled");
    to_hyper_response(response)
}

/// Accept connections on `listener` until `shutdown` resolves. In-flight connections
/// are told to finish gracefully. Accept errors are logged and the loop keeps going.
pub async fn serve(listener: TcpListener, dispatcher: Arc<Dispatcher>, shutdown: impl Future<Output = ()>) {
    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("shutting down");
                let _ = stop_tx.send(true);
                break;
            }
            accept_result = listener.accept() => {
                let (stream, peer) = match accept_result {
                    Ok(x) => x,
                    Err(e) => {
                        tracing::error!(error = %e, "accept error");
                        continue;
                    }
                };
                let io = TokioIo::new(stream);
                let dispatcher = Arc::clone(&dispatcher);
                let mut stop_rx = stop_rx.clone();
                tokio::task::spawn(async move {
                    let service = service_fn(move |req: Request<hyper::body::Incoming>| {
                        let response = handle(&dispatcher, &req);
                        async move { Ok::<_, std::convert::Infallible>(response) }
                    });
                    let conn = http1::Builder::new().serve_connection(io, service);
                    tokio::pin!(conn);
                    tokio::select! {
                        res = conn.as_mut() => {
                            if let Err(e) = res {
                                tracing::error!(%peer, error = %e, "serve_connection error");
                            }
                        }
                        _ = stop_rx.changed() => {
                            conn.as_mut().graceful_shutdown();
                            if let Err(e) = conn.await {
                                tracing::error!(%peer, error = %e, "serve_connection error");
                            }
                        }
                    }
                });
            }
        }
    }
}

/// Run the server (blocks) on a multi-thread runtime until Ctrl-C.
pub fn run(dispatcher: Arc<Dispatcher>, config: &ServerConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = config.addr();
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    rt.block_on(async move {
        let listener = TcpListener::bind(&addr).await?;
        tracing::info!(%addr, routes = dispatcher.router().len(), "listening");
        serve(listener, dispatcher, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        })
        .await;
        Ok::<(), Box<dyn std::error::Error + Send + Sync>>(())
    })
}
