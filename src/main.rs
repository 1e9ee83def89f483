mod telemetry;

use playground_scheduler_core::job_schedulers::start_reminder_job;
use playground_scheduler_infra::{run_migration, setup_context};
use telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("playground_scheduler".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context().await;
    run_migration()
        .await
        .expect("Database migrations to succeed");

    start_reminder_job(context);

    // Trigger-driven worker with no request surface: park the main task
    // until the process is asked to shut down.
    tokio::signal::ctrl_c().await
}
