use crate::shared::entity::ID;

/// One row per (team, user) pairing. The roster lifecycle is owned by the
/// membership API; this worker only reads it.
#[derive(Debug, Clone)]
pub struct TeamMember {
    pub team_id: ID,
    pub user_id: ID,
    /// Contact address for outbound reminders. Not every member has one.
    pub phone: Option<String>,
}

impl TeamMember {
    pub fn new(team_id: ID, user_id: ID, phone: Option<String>) -> Self {
        Self {
            team_id,
            user_id,
            phone,
        }
    }
}
