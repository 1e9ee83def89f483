use crate::reminder::send_match_reminders::SendMatchRemindersUseCase;
use crate::shared::usecase::execute;
use playground_scheduler_infra::PlaygroundContext;
use std::time::Duration;
use tokio::time::{interval_at, Instant};
use tracing::info;

const RUN_INTERVAL_SECS: u64 = 60 * 60;

/// Seconds until the next full hour, which is when the first reminder run
/// should happen. At an exact hour boundary the first run is one full
/// interval away.
pub fn get_start_delay(now_ts_millis: i64) -> u64 {
    let secs_into_hour = (now_ts_millis / 1000) % 3600;
    (3600 - secs_into_hour) as u64
}

/// Spawns the hourly reminder job. Each tick performs one full scan of the
/// candidate matches; a failed run is retried by the next tick.
pub fn start_reminder_job(ctx: PlaygroundContext) {
    tokio::spawn(async move {
        let secs_to_next_run = get_start_delay(ctx.sys.get_timestamp_millis());
        info!("First reminder run in {} seconds", secs_to_next_run);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run);

        let mut hourly_interval = interval_at(start, Duration::from_secs(RUN_INTERVAL_SECS));
        loop {
            hourly_interval.tick().await;

            let usecase = SendMatchRemindersUseCase::default();
            let _ = execute(usecase, &ctx).await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(0), 3600);
        assert_eq!(get_start_delay(30 * 60 * 1000), 1800);
        assert_eq!(get_start_delay(3599 * 1000), 1);
        assert_eq!(get_start_delay(3600 * 1000), 3600);
        assert_eq!(get_start_delay((3600 + 90) * 1000), 3510);
    }
}
