//! Route definitions and controller registrations for the photo service.

use foto_core::{ControllerRegistry, CoreError, Router};
use serde::Serialize;

use crate::controllers::{HomeController, PhotoController};

pub fn register_routes(router: &mut Router) -> Result<(), CoreError> {
    router.get("/", "HomeController@index")?;
    router.get("/photos", "PhotoController@index")?;
    router.get("/photos/{id}", "PhotoController@show")?;
    Ok(())
}

pub fn register_controllers(registry: &mut ControllerRegistry) {
    registry
        .register(HomeController::definition())
        .register(PhotoController::definition());
}

/// One row of `foto routes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub method: String,
    pub path: String,
    pub handler: String,
    pub params: Vec<String>,
}

/// The route table in registration order.
pub fn describe(router: &Router) -> Vec<RouteSummary> {
    router
        .routes()
        .iter()
        .map(|route| RouteSummary {
            method: route.method.to_string(),
            path: route.pattern.as_str().to_string(),
            handler: route.handler.to_string(),
            params: route.pattern.param_names().to_vec(),
        })
        .collect()
}
