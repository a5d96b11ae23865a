use std::net::SocketAddr;

use argh::FromArgs;
use dotenv::dotenv;
use miette::{Diagnostic, Result};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::{
    api,
    database::Database,
    notifier::Notifier,
    repository::{memory::MemoryStore, Repository},
};

pub struct App {
    args: Args,
}

#[derive(Error, Diagnostic, Debug)]
pub enum AppError {
    #[error("failed to connect to database: {0}")]
    #[diagnostic(code(desk::error::database))]
    DatabaseConnection(#[source] sqlx::Error),
    #[error("failed to apply database migrations: {0}")]
    #[diagnostic(code(desk::error::migration))]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("failed to listen on {address}: {source}")]
    #[diagnostic(code(desk::error::listen))]
    Listen {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    #[diagnostic(code(desk::error::server))]
    Server(#[source] std::io::Error),
}

impl App {
    pub fn new() -> Self {
        Self::with_args(argh::from_env())
    }

    pub fn with_args(args: Args) -> Self {
        Self { args }
    }

    pub async fn run(&self) -> Result<()> {
        dotenv().ok();

        miette::set_panic_hook();

        if std::env::var_os("RUST_LOG").is_none() {
            std::env::set_var(
                "RUST_LOG",
                "desk_server=debug,tower_http=debug,sqlx=warn",
            )
        }

        if self.args.json {
            tracing_subscriber::fmt::fmt()
                .json()
                .with_env_filter(EnvFilter::from_default_env())
                .try_init()
                .ok();
        } else {
            tracing_subscriber::fmt::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .try_init()
                .ok();
        }

        let repository = self.repository().await?;
        let notifier = Notifier::new();
        let router = api::build(repository, notifier);

        let listener = tokio::net::TcpListener::bind(self.args.listen_address)
            .await
            .map_err(|source| AppError::Listen {
                address: self.args.listen_address,
                source,
            })?;

        tracing::debug!(
            ip = self.args.listen_address.ip().to_string().as_str(),
            port = self.args.listen_address.port(),
            url = format!(
                "http://{}:{}",
                self.args.listen_address.ip(),
                self.args.listen_address.port()
            ),
            "server started"
        );

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

        tracing::debug!("server terminated");

        Ok(())
    }

    async fn repository(&self) -> Result<Repository, AppError> {
        if self.args.in_memory {
            let store = MemoryStore::new();
            if let Some(token) = &self.args.dev_session {
                let user_id = Uuid::new_v4();
                store.insert_session(token, user_id);
                tracing::info!(
                    user_id = user_id.to_string(),
                    "in-memory store seeded with development session"
                );
            }
            tracing::warn!("using in-memory store, data will not survive a restart");
            return Ok(Repository::in_memory(store));
        }

        let database = Database::new(
            &self.args.database_url,
            1,
            self.args.database_max_connections,
        )
        .await
        .map_err(AppError::DatabaseConnection)?;

        database.migrate().await?;

        Ok(Repository::new(database))
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl-C signal: {}", e);
        return;
    }
    tracing::info!("ctrl-c received");
}

#[derive(FromArgs)]
/// The desk server.
pub struct Args {
    /// server address:port to listen on (default: 0.0.0.0:8080, PORT environment variable can override default port 8080)
    #[argh(
        option,
        default = "SocketAddr::from(([0, 0, 0, 0], default_listen_port()))"
    )]
    pub listen_address: SocketAddr,
    /// the database URL to connect to (default: postgres://127.0.0.1:5432/desk, or DATABASE_URL environment variable)
    #[argh(option, default = "default_database_url()")]
    pub database_url: String,
    /// the maximum number of connections in the PostgreSQL connection pool (default: 4, or DATABASE_MAX_CONNECTIONS environment variable)
    #[argh(option, default = "default_database_max_connections()")]
    pub database_max_connections: u32,
    /// use JSON for log messages
    #[argh(switch)]
    pub json: bool,
    /// keep all data in memory instead of PostgreSQL
    #[argh(switch)]
    pub in_memory: bool,
    /// with --in-memory, seed a session with this token for a fresh user
    #[argh(option)]
    pub dev_session: Option<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            listen_address: SocketAddr::from(([127, 0, 0, 1], default_listen_port())),
            database_url: default_database_url(),
            database_max_connections: default_database_max_connections(),
            json: false,
            in_memory: false,
            dev_session: None,
        }
    }
}

const DEFAULT_LISTEN_PORT: u16 = 8080;

fn default_listen_port() -> u16 {
    if let Ok(port_str) = std::env::var("PORT") {
        if let Ok(port) = port_str.parse() {
            tracing::debug!("using port from PORT environment variable");
            port
        } else {
            DEFAULT_LISTEN_PORT
        }
    } else {
        DEFAULT_LISTEN_PORT
    }
}

pub const DEFAULT_DATABASE_URL: &str = "postgres://127.0.0.1:5432/desk";

pub fn default_database_url() -> String {
    if let Ok(value) = std::env::var("DATABASE_URL") {
        value
    } else {
        DEFAULT_DATABASE_URL.to_string()
    }
}

const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 4;

fn default_database_max_connections() -> u32 {
    if let Ok(value) = std::env::var("DATABASE_MAX_CONNECTIONS") {
        value
            .parse()
            .ok()
            .unwrap_or(DEFAULT_DATABASE_MAX_CONNECTIONS)
    } else {
        DEFAULT_DATABASE_MAX_CONNECTIONS
    }
}
