use super::IAttendanceRepo;
use playground_scheduler_domain::{AttendanceResponse, ID};
use std::sync::Mutex;

pub struct InMemoryAttendanceRepo {
    responses: Mutex<Vec<AttendanceResponse>>,
}

impl InMemoryAttendanceRepo {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IAttendanceRepo for InMemoryAttendanceRepo {
    async fn insert(&self, response: &AttendanceResponse) -> anyhow::Result<()> {
        self.responses.lock().unwrap().push(response.clone());
        Ok(())
    }

    async fn find_by_match(&self, match_id: &ID) -> anyhow::Result<Vec<AttendanceResponse>> {
        Ok(self
            .responses
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.match_id == *match_id)
            .cloned()
            .collect())
    }
}
