mod inmemory;
mod postgres;

pub use inmemory::InMemoryMatchRepo;
use playground_scheduler_domain::{Match, MatchStatus, WindowLabel, ID};
pub use postgres::PostgresMatchRepo;

#[async_trait::async_trait]
pub trait IMatchRepo: Send + Sync {
    async fn insert(&self, m: &Match) -> anyhow::Result<()>;
    async fn find(&self, match_id: &ID) -> Option<Match>;
    /// One page of matches eligible for reminder evaluation. Ordering is
    /// stable across pages within a run so that paging does not skip or
    /// repeat matches.
    async fn find_candidates(
        &self,
        statuses: &[MatchStatus],
        skip: i64,
        limit: i64,
    ) -> anyhow::Result<Vec<Match>>;
    /// Records that `label` has been processed for this match. This is a
    /// plain write, not a compare-and-swap: two overlapping invocations
    /// may both observe the mark as absent and both dispatch.
    async fn mark_window(&self, match_id: &ID, label: WindowLabel, at: i64) -> anyhow::Result<()>;
}
