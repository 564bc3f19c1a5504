//! Foto core: route table, path patterns, controller dispatch, HTTP server.

pub mod container;
pub mod controller;
pub mod dispatch;
pub mod http;
pub mod pattern;
pub mod response;
pub mod router;

pub use container::{Container, ContainerError};
pub use controller::{ControllerDef, ControllerRegistry, HandlerId, Params};
pub use dispatch::{Dispatcher, Outcome, ResolutionError};
pub use pattern::{normalize_path, PathPattern};
pub use response::Response;
pub use router::{Method, Route, RouteId, RouteMatch, Router};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid path pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("invalid handler {0:?}: expected \"Controller@method\"")]
    InvalidHandler(String),
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),
}
