//! Server assembly and boot sequence.
//!
//! `run` loads the configuration, connects to the database and migrates it,
//! wires the shared [`AppState`], starts the cron scheduler and finally
//! serves the router. It returns a process exit code instead of panicking so
//! the operator can tell a configuration fault from a runtime fault.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use migration::{Migrator, MigratorTrait};

use crate::server::{
    config::Config,
    error::Error,
    model::app::AppState,
    router,
    scheduler::Scheduler,
    service::{mailer::Mailer, notify::Notifier, payment::PaymentGateway, render::TicketRenderer},
};

pub const EXIT_SUCCESS: i32 = 0;
/// The environment is unusable (bad variables, unreachable database).
pub const EXIT_BAD_CONFIG: i32 = 1;
/// The environment was fine but serving failed.
pub const EXIT_FAIL_SERVE: i32 = 2;

/// Boots the server and blocks until it stops. Returns the process exit
/// code.
pub async fn run() -> i32 {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("invalid configuration: {}", err);
            return EXIT_BAD_CONFIG;
        }
    };

    let db = match connect_to_database(&config).await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!("failed to prepare database: {}", err);
            return EXIT_BAD_CONFIG;
        }
    };

    let state = match build_state(&config, db.clone()) {
        Ok(state) => state,
        Err(err) => {
            tracing::error!("failed to assemble server state: {}", err);
            return EXIT_BAD_CONFIG;
        }
    };

    if let Err(err) = start_scheduler(db, state.notifier.clone()).await {
        tracing::error!("failed to start scheduler: {}", err);
        return EXIT_FAIL_SERVE;
    }

    let app = router::routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let address = format!("{}:{}", config.listen_address, config.listen_port);
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind {}: {}", address, err);
            return EXIT_FAIL_SERVE;
        }
    };

    tracing::info!("listening on {}", address);

    match axum::serve(listener, app).await {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            tracing::error!("server stopped: {}", err);
            EXIT_FAIL_SERVE
        }
    }
}

/// Connect to the database and run migrations
async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    let mut opt = ConnectOptions::new(config.db.url());
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the shared application state from the configuration.
fn build_state(config: &Config, db: DatabaseConnection) -> Result<AppState, Error> {
    let gateway = PaymentGateway::new(
        config.gateway.base_url().to_string(),
        config.gateway.server_key.clone(),
    )?;

    let mailer = Mailer::new(&config.smtp)?;
    let notifier = Notifier::new(
        mailer,
        config.admin_email.clone(),
        config.event_name.clone(),
        config.event_date.clone(),
    );

    let renderer = TicketRenderer::new(
        config.storage_path.clone(),
        config.qr_url_template.clone(),
        config.event_name.clone(),
        config.event_date.clone(),
    );

    Ok(AppState {
        db,
        gateway,
        notifier,
        renderer,
    })
}

async fn start_scheduler(db: DatabaseConnection, notifier: Notifier) -> Result<(), Error> {
    Scheduler::new(db, notifier).await?.start().await
}
