use crate::member::TeamMember;
use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One row per (match, user), created when the user answers the
/// attendance prompt. Written by the schedule API, read-only here.
#[derive(Debug, Clone)]
pub struct AttendanceResponse {
    pub match_id: ID,
    pub user_id: ID,
    pub status: AttendanceStatus,
    pub updated: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Attending,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attending => "attending",
            Self::Absent => "absent",
        }
    }
}

/// The members that have not yet answered the attendance prompt for a
/// match. A response of either status counts as answered. Output preserves
/// the roster order, so the result is stable within one run.
pub fn pending_responders(
    members: Vec<TeamMember>,
    responses: &[AttendanceResponse],
) -> Vec<TeamMember> {
    let responded: HashSet<&ID> = responses.iter().map(|r| &r.user_id).collect();
    members
        .into_iter()
        .filter(|m| !responded.contains(&m.user_id))
        .collect()
}
