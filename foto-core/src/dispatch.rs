//! Dispatcher: resolves (uri, method) against the route table and controller registry,
//! then runs the action or renders the negative outcome.
//!
//! Built once from the setup-time `Router`, `ControllerRegistry` and `Container`; after that
//! it is read-only and can be shared behind an `Arc` by concurrent requests.

use std::fmt;

use crate::container::Container;
use crate::controller::{BoundAction, ControllerRegistry, HandlerId, Params};
use crate::pattern::normalize_path;
use crate::response::Response;
use crate::router::{Method, RouteMatch, Router};

pub const NOT_FOUND_BODY: &str = "404 - Page not found";

/// Handler identifier that did not resolve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolutionError {
    ControllerNotFound(String),
    MethodNotFound(String),
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionError::ControllerNotFound(name) => write!(f, "Controller not found: {}", name),
            ResolutionError::MethodNotFound(name) => write!(f, "Method not found: {}", name),
        }
    }
}

impl std::error::Error for ResolutionError {}

/// Result of matching a request, before anything runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    NotFound,
    HandlerResolutionError(ResolutionError),
    Matched { handler: HandlerId, params: Params },
}

pub struct Dispatcher {
    router: Router,
    controllers: ControllerRegistry,
    container: Container,
}

impl Dispatcher {
    pub fn new(router: Router, controllers: ControllerRegistry, container: Container) -> Self {
        Self {
            router,
            controllers,
            container,
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Match and resolve without invoking. The controller is instantiated to look up the action.
    pub fn resolve(&self, uri: &str, method: &str) -> Outcome {
        let resolved = self.with_action(uri, method, |found, _action| Outcome::Matched {
            handler: found.route.handler.clone(),
            params: found.params.clone(),
        });
        match resolved {
            Ok(outcome) => outcome,
            Err(Miss::NotFound) => Outcome::NotFound,
            Err(Miss::Unresolved(err)) => Outcome::HandlerResolutionError(err),
        }
    }

    /// Match, resolve and invoke. Always produces a response.
    pub fn dispatch(&self, uri: &str, method: &str) -> Response {
        let invoked = self.with_action(uri, method, |found, action| {
            tracing::debug!(
                method,
                route = found.route.pattern.as_str(),
                handler = %found.route.handler,
                params = ?found.params,
                "route matched"
            );
            let mut response = Response::new();
            action(found.params.as_slice(), &mut response);
            response
        });
        match invoked {
            Ok(response) => response,
            Err(Miss::NotFound) => {
                tracing::info!(method, path = normalize_path(uri), "no route matched");
                Response::text(404, NOT_FOUND_BODY)
            }
            Err(Miss::Unresolved(err)) => {
                tracing::warn!(method, path = normalize_path(uri), error = %err, "handler resolution failed");
                Response::text(500, err.to_string())
            }
        }
    }

    /// The single resolution path: first matching route, its controller instance, then the
    /// action on that instance. `run` receives the match and the bound action.
    fn with_action<R>(
        &self,
        uri: &str,
        method: &str,
        run: impl FnOnce(&RouteMatch<'_>, BoundAction<'_>) -> R,
    ) -> Result<R, Miss> {
        let path = normalize_path(uri);
        let found = method
            .parse::<Method>()
            .ok()
            .and_then(|m| self.router.match_route(m, path))
            .ok_or(Miss::NotFound)?;
        let handler = &found.route.handler;
        let controller = self
            .controllers
            .instantiate(&handler.controller, &self.container)
            .ok_or_else(|| Miss::Unresolved(ResolutionError::ControllerNotFound(handler.controller.clone())))?;
        let action = controller
            .action(&handler.action)
            .ok_or_else(|| Miss::Unresolved(ResolutionError::MethodNotFound(handler.action.clone())))?;
        let out = run(&found, action);
        Ok(out)
    }
}

enum Miss {
    NotFound,
    Unresolved(ResolutionError),
}
