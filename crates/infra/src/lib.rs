mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, DispatchSettings};
pub use repos::{
    IAttendanceRepo, IMatchRepo, ITeamMemberRepo, InMemoryAttendanceRepo, InMemoryMatchRepo,
    InMemoryTeamMemberRepo, Repos,
};
pub use services::{AlimtalkMessage, DeliveryOutcome, IDispatchGateway, SolapiClient};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct PlaygroundContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    /// Outbound reminder gateway. `None` when the Solapi credentials are
    /// not configured, in which case reminder runs degrade to mark-only.
    pub dispatcher: Option<Arc<dyn IDispatchGateway>>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl PlaygroundContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let dispatcher = config
            .dispatch
            .clone()
            .map(|settings| Arc::new(SolapiClient::new(settings)) as Arc<dyn IDispatchGateway>);
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            dispatcher,
        }
    }

    /// Context over in-memory repositories and without a dispatcher.
    /// Used by tests, which swap `sys` and `dispatcher` as needed.
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            dispatcher: None,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> PlaygroundContext {
    PlaygroundContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
