use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use domain::services::PushSender;
use tracing::{info, warn};

use timeclock_api::app;
use timeclock_api::config::Config;
use timeclock_api::jobs::{JobScheduler, ReminderJob};
use timeclock_api::middleware::logging;
use timeclock_api::services::{ReminderSettings, WebPushSender};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    logging::init_logging(&config.logging);

    info!("Starting Timeclock API v{}", env!("CARGO_PKG_VERSION"));

    let pool = persistence::db::create_pool(&config.database).await?;

    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Migrations completed");

    let push: Arc<dyn PushSender> = if config.push.enabled {
        Arc::new(WebPushSender::new(&config.push)?)
    } else {
        warn!("Push delivery is disabled, reminders will not be sent");
        Arc::new(domain::services::MockPushSender::new())
    };

    // In-process per-minute engine runs; deployments driven by an
    // external cron leave this disabled and hit the HTTP trigger.
    let mut scheduler = JobScheduler::new();
    if config.notifications.scheduler_enabled && config.push.enabled {
        scheduler.register(ReminderJob::new(
            pool.clone(),
            push.clone(),
            ReminderSettings::from_config(&config.notifications),
        ));
        scheduler.start();
    }

    let app = app::create_app(config.clone(), pool, push);

    let addr = config.socket_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.shutdown();
    scheduler.wait_for_shutdown(Duration::from_secs(10)).await;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}
