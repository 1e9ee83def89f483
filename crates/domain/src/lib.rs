mod attendance;
mod matches;
mod member;
mod reminder_window;
mod shared;

pub use attendance::{pending_responders, AttendanceResponse, AttendanceStatus};
pub use matches::{InvalidMatchStatusError, Match, MatchStatus};
pub use member::TeamMember;
pub use reminder_window::{ReminderWindow, WindowLabel, WindowPolicy};
pub use shared::entity::{Entity, InvalidIDError, ID};
