use crate::reminder_window::WindowLabel;
use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

const MILLIS_PER_HOUR: f64 = 1000.0 * 60.0 * 60.0;

/// A scheduled fixture owned by the home team.
///
/// The match lifecycle (status, score) is driven by the schedule API; this
/// worker reads matches and writes back only `window_marks`. The two
/// writers touch disjoint fields, so they need no coordination.
#[derive(Debug, Clone)]
pub struct Match {
    pub id: ID,
    /// Team whose roster is asked for attendance
    pub home_team_id: ID,
    /// Kickoff timestamp in millis
    pub scheduled_at: i64,
    pub status: MatchStatus,
    pub venue: Option<String>,
    /// One entry per reminder window that has already been processed for
    /// this match. Present means "do not process again".
    pub window_marks: HashMap<WindowLabel, i64>,
    pub created: i64,
}

impl Match {
    pub fn new(home_team_id: ID, scheduled_at: i64, venue: Option<String>, created: i64) -> Self {
        Self {
            id: Default::default(),
            home_team_id,
            scheduled_at,
            status: MatchStatus::Pending,
            venue,
            window_marks: Default::default(),
            created,
        }
    }

    pub fn hours_until(&self, now_millis: i64) -> f64 {
        (self.scheduled_at - now_millis) as f64 / MILLIS_PER_HOUR
    }

    pub fn is_window_marked(&self, label: &WindowLabel) -> bool {
        self.window_marks.contains_key(label)
    }

    /// Records that `label` has been processed. Marks are monotonic: a
    /// second mark for the same window keeps the original timestamp.
    pub fn mark_window(&mut self, label: WindowLabel, at: i64) {
        self.window_marks.entry(label).or_insert(at);
    }
}

impl Entity for Match {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

impl MatchStatus {
    /// The statuses eligible for reminder evaluation
    pub fn candidates() -> Vec<MatchStatus> {
        vec![MatchStatus::Pending, MatchStatus::Accepted]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }
}

impl Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidMatchStatusError {
    #[error("Match status: {0} is not recognized")]
    Unrecognized(String),
}

impl FromStr for MatchStatus {
    type Err = InvalidMatchStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            _ => Err(InvalidMatchStatusError::Unrecognized(s.to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn match_factory(scheduled_at: i64) -> Match {
        Match::new(Default::default(), scheduled_at, None, 0)
    }

    #[test]
    fn it_computes_hours_until_kickoff() {
        let m = match_factory(1000 * 60 * 60 * 24);
        assert!((m.hours_until(0) - 24.0).abs() < f64::EPSILON);
        assert!((m.hours_until(1000 * 60 * 60 * 25) + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn it_marks_windows_monotonically() {
        let mut m = match_factory(0);
        assert!(!m.is_window_marked(&WindowLabel::DayMinus1));

        m.mark_window(WindowLabel::DayMinus1, 100);
        assert!(m.is_window_marked(&WindowLabel::DayMinus1));
        assert!(!m.is_window_marked(&WindowLabel::SameDay));

        // Re-marking keeps the first timestamp
        m.mark_window(WindowLabel::DayMinus1, 200);
        assert_eq!(m.window_marks[&WindowLabel::DayMinus1], 100);
    }

    #[test]
    fn it_parses_status_round_trip() {
        for status in [
            MatchStatus::Pending,
            MatchStatus::Accepted,
            MatchStatus::Rejected,
            MatchStatus::Completed,
        ]
        .iter()
        {
            assert_eq!(status.as_str().parse::<MatchStatus>().unwrap(), *status);
        }
        assert!("cancelled".parse::<MatchStatus>().is_err());
    }
}
