mod inmemory;
mod postgres;

pub use inmemory::InMemoryTeamMemberRepo;
use playground_scheduler_domain::{TeamMember, ID};
pub use postgres::PostgresTeamMemberRepo;

#[async_trait::async_trait]
pub trait ITeamMemberRepo: Send + Sync {
    async fn insert(&self, member: &TeamMember) -> anyhow::Result<()>;
    /// The full roster of a team. Ordering is stable within one run; the
    /// non-responder output follows it.
    async fn find_by_team(&self, team_id: &ID) -> anyhow::Result<Vec<TeamMember>>;
}
