//! Photo gallery pages.

use std::sync::Arc;

use foto_core::controller::ControllerDef;
use foto_core::{Container, Response};

use super::{escape_html, html};
use crate::db::Database;

pub struct PhotoController {
    db: Option<Arc<Database>>,
}

impl PhotoController {
    pub const NAME: &'static str = "PhotoController";

    /// Takes the shared `Database` from the container when one is registered.
    pub fn new(container: &Container) -> Self {
        Self {
            db: container.resolve::<Database>().ok(),
        }
    }

    pub fn definition() -> ControllerDef<Self> {
        ControllerDef::new(Self::NAME, Self::new)
            .action("index", Self::index)
            .action("show", Self::show)
    }

    pub fn database(&self) -> Option<&Database> {
        self.db.as_deref()
    }

    /// Gallery page. Names the catalogue database when one is configured.
    pub fn index(&self, _params: &[String], response: &mut Response) {
        html(response)
            .write("<h1>Photos Gallery</h1>")
            .write("<p>List of all photos</p>");
        if let Some(db) = self.database() {
            response.write(format!("<p>Catalogue: {}</p>", escape_html(db.name())));
        }
    }

    /// `show(id)`: first positional parameter is the photo id.
    pub fn show(&self, params: &[String], response: &mut Response) {
        let Some(id) = params.first() else {
            html(response).set_status(400).write("<p>Missing photo id</p>");
            return;
        };
        html(response)
            .write("<h1>Photo Details</h1>")
            .write(format!("<p>Showing photo with ID: {}</p>", escape_html(id)));
    }
}
