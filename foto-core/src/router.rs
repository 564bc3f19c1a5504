//! Route table: ordered (method, pattern, handler) registrations. First match wins.

use std::fmt;
use std::str::FromStr;

use crate::controller::HandlerId;
use crate::pattern::PathPattern;
use crate::CoreError;

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct RouteId(pub u32);

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl FromStr for Method {
    type Err = CoreError;

    /// Exact, case-sensitive: HTTP method tokens are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            other => Err(CoreError::UnsupportedMethod(other.to_owned())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registered route. Immutable once in the table.
#[derive(Clone, Debug)]
pub struct Route {
    pub id: RouteId,
    pub method: Method,
    pub pattern: PathPattern,
    pub handler: HandlerId,
}

/// A route selected for a request, with its parameter values in pattern order.
#[derive(Clone, Debug)]
pub struct RouteMatch<'r> {
    pub route: &'r Route,
    pub params: Vec<String>,
}

/// Ordered route table. Append-only; duplicates are kept and the earlier one wins.
#[derive(Clone, Debug, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Append a route. Fails on a malformed pattern or handler string; whether the
    /// controller and action exist is only known at dispatch.
    pub fn register(&mut self, method: Method, path: &str, handler: &str) -> Result<RouteId, CoreError> {
        let pattern = PathPattern::parse(path)?;
        let handler: HandlerId = handler.parse()?;
        let id = RouteId(self.routes.len() as u32);
        tracing::debug!(%method, pattern = pattern.as_str(), %handler, "route registered");
        self.routes.push(Route {
            id,
            method,
            pattern,
            handler,
        });
        Ok(id)
    }

    pub fn get(&mut self, path: &str, handler: &str) -> Result<RouteId, CoreError> {
        self.register(Method::Get, path, handler)
    }

    pub fn post(&mut self, path: &str, handler: &str) -> Result<RouteId, CoreError> {
        self.register(Method::Post, path, handler)
    }

    pub fn put(&mut self, path: &str, handler: &str) -> Result<RouteId, CoreError> {
        self.register(Method::Put, path, handler)
    }

    pub fn delete(&mut self, path: &str, handler: &str) -> Result<RouteId, CoreError> {
        self.register(Method::Delete, path, handler)
    }

    /// All routes in registration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// First route whose method equals `method` and whose pattern matches the already
    /// normalized `path`.
    pub fn match_route(&self, method: Method, path: &str) -> Option<RouteMatch<'_>> {
        self.routes
            .iter()
            .filter(|route| route.method == method)
            .find_map(|route| {
                route
                    .pattern
                    .captures(path)
                    .map(|params| RouteMatch { route, params })
            })
    }
}
