use super::IMatchRepo;
use playground_scheduler_domain::{Match, MatchStatus, WindowLabel, ID};
use std::sync::Mutex;

pub struct InMemoryMatchRepo {
    matches: Mutex<Vec<Match>>,
}

impl InMemoryMatchRepo {
    pub fn new() -> Self {
        Self {
            matches: Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IMatchRepo for InMemoryMatchRepo {
    async fn insert(&self, m: &Match) -> anyhow::Result<()> {
        self.matches.lock().unwrap().push(m.clone());
        Ok(())
    }

    async fn find(&self, match_id: &ID) -> Option<Match> {
        self.matches
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == *match_id)
            .cloned()
    }

    /// Pages in insertion order, which is stable for the lifetime of the repo
    async fn find_candidates(
        &self,
        statuses: &[MatchStatus],
        skip: i64,
        limit: i64,
    ) -> anyhow::Result<Vec<Match>> {
        Ok(self
            .matches
            .lock()
            .unwrap()
            .iter()
            .filter(|m| statuses.contains(&m.status))
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn mark_window(&self, match_id: &ID, label: WindowLabel, at: i64) -> anyhow::Result<()> {
        let mut matches = self.matches.lock().unwrap();
        if let Some(m) = matches.iter_mut().find(|m| m.id == *match_id) {
            m.mark_window(label, at);
        }
        Ok(())
    }
}
