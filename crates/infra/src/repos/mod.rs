mod attendance;
mod matches;
mod team_member;

pub use attendance::{IAttendanceRepo, InMemoryAttendanceRepo, PostgresAttendanceRepo};
pub use matches::{IMatchRepo, InMemoryMatchRepo, PostgresMatchRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use team_member::{ITeamMemberRepo, InMemoryTeamMemberRepo, PostgresTeamMemberRepo};
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub matches: Arc<dyn IMatchRepo>,
    pub team_members: Arc<dyn ITeamMemberRepo>,
    pub attendance: Arc<dyn IAttendanceRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            matches: Arc::new(PostgresMatchRepo::new(pool.clone())),
            team_members: Arc::new(PostgresTeamMemberRepo::new(pool.clone())),
            attendance: Arc::new(PostgresAttendanceRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            matches: Arc::new(InMemoryMatchRepo::new()),
            team_members: Arc::new(InMemoryTeamMemberRepo::new()),
            attendance: Arc::new(InMemoryAttendanceRepo::new()),
        }
    }
}
