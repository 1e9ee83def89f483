mod inmemory;
mod postgres;

pub use inmemory::InMemoryAttendanceRepo;
use playground_scheduler_domain::{AttendanceResponse, ID};
pub use postgres::PostgresAttendanceRepo;

#[async_trait::async_trait]
pub trait IAttendanceRepo: Send + Sync {
    async fn insert(&self, response: &AttendanceResponse) -> anyhow::Result<()>;
    async fn find_by_match(&self, match_id: &ID) -> anyhow::Result<Vec<AttendanceResponse>>;
}
