mod reminder;
mod shared;

pub mod job_schedulers;

pub use reminder::resolve_non_responders::ResolveNonRespondersUseCase;
pub use reminder::send_match_reminders::{RunSummary, SendMatchRemindersUseCase};
pub use shared::usecase::{execute, UseCase};
