//! Servicio Fotografía: photo service application on foto-core.

pub mod config;
pub mod controllers;
pub mod db;
pub mod routes;

use std::sync::Arc;

use foto_core::{Container, ControllerRegistry, CoreError, Dispatcher, Router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use config::{ConfigError, DatabaseConfig};
pub use db::Database;

/// Register routes, controllers and the database, then freeze everything into a dispatcher.
/// Nothing can be registered after this returns.
pub fn build_dispatcher(database: Arc<Database>) -> Result<Dispatcher, CoreError> {
    let mut router = Router::new();
    routes::register_routes(&mut router)?;

    let mut controllers = ControllerRegistry::new();
    routes::register_controllers(&mut controllers);

    let mut container = Container::new();
    container.register_arc(database);

    tracing::info!(routes = router.len(), "dispatcher ready");
    Ok(Dispatcher::new(router, controllers, container))
}

/// Install the fmt subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
