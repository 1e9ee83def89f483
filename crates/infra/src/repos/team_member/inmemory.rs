use super::ITeamMemberRepo;
use playground_scheduler_domain::{TeamMember, ID};
use std::sync::Mutex;

pub struct InMemoryTeamMemberRepo {
    members: Mutex<Vec<TeamMember>>,
}

impl InMemoryTeamMemberRepo {
    pub fn new() -> Self {
        Self {
            members: Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ITeamMemberRepo for InMemoryTeamMemberRepo {
    async fn insert(&self, member: &TeamMember) -> anyhow::Result<()> {
        self.members.lock().unwrap().push(member.clone());
        Ok(())
    }

    async fn find_by_team(&self, team_id: &ID) -> anyhow::Result<Vec<TeamMember>> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.team_id == *team_id)
            .cloned()
            .collect())
    }
}
