pub mod resolve_non_responders;
pub mod send_match_reminders;
