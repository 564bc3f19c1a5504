//! CLI for the photo service: serve, list routes, dispatch a single request.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use foto_app::{build_dispatcher, config, init_tracing, routes, Database, DatabaseConfig};
use foto_core::http::{self, ServerConfig};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

#[derive(Parser)]
#[command(name = "foto")]
#[command(about = "Servicio Fotografía photo service")]
struct Cli {
    /// Env file to load before reading configuration (default: ./.env if present)
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server. HOST/PORT env vars apply unless overridden here.
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the route table in registration order.
    Routes {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Dispatch one request in-process and print the response.
    Dispatch {
        /// Request method, e.g. GET
        method: String,
        /// Request URI, e.g. /photos/42
        uri: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    init_tracing();
    config::load_env_file(cli.env_file.as_deref())?;

    let database = Arc::new(Database::new(DatabaseConfig::from_env()?));
    tracing::debug!(config = ?database.config(), dsn = database.dsn(), "database config loaded");
    let dispatcher = build_dispatcher(database)?;

    match cli.command {
        Commands::Serve { host, port } => {
            let mut server = ServerConfig::from_env(DEFAULT_HOST, DEFAULT_PORT);
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }
            println!("Listening on http://{}", server.addr());
            for route in routes::describe(dispatcher.router()) {
                println!("  {:<6} {}", route.method, route.path);
            }
            http::run(Arc::new(dispatcher), &server)
        }
        Commands::Routes { json } => {
            let table = routes::describe(dispatcher.router());
            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                for route in table {
                    println!("{:<6} {:<20} {}", route.method, route.path, route.handler);
                }
            }
            Ok(())
        }
        Commands::Dispatch { method, uri } => {
            let response = dispatcher.dispatch(&uri, &method);
            println!("Status: {}", response.status_code);
            if let Some(content_type) = &response.content_type {
                println!("Content-Type: {}", content_type);
            }
            println!();
            println!("{}", String::from_utf8_lossy(&response.body));
            Ok(())
        }
    }
}
