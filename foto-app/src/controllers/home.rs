use foto_core::controller::ControllerDef;
use foto_core::{Container, Response};

use super::html;

pub struct HomeController;

impl HomeController {
    pub const NAME: &'static str = "HomeController";

    pub fn new(_container: &Container) -> Self {
        HomeController
    }

    pub fn definition() -> ControllerDef<Self> {
        ControllerDef::new(Self::NAME, Self::new).action("index", Self::index)
    }

    pub fn index(&self, _params: &[String], response: &mut Response) {
        html(response)
            .write("<h1>Welcome to Servicio Fotografía</h1>")
            .write("<p>Photography service application is running!</p>");
    }
}
