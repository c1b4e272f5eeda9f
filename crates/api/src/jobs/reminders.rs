//! Per-minute reminder dispatch job.

use std::sync::Arc;

use chrono::Utc;
use domain::services::PushSender;
use sqlx::PgPool;
use tracing::info;

use crate::jobs::scheduler::{Job, JobFrequency};
use crate::services::{ReminderEngine, ReminderSettings};

/// Runs the notification decision engine once a minute.
///
/// Overlap with an external cron hitting the HTTP trigger is harmless:
/// the engine claims every reminder in the notification log before
/// sending it.
pub struct ReminderJob {
    engine: ReminderEngine,
}

impl ReminderJob {
    pub fn new(pool: PgPool, push: Arc<dyn PushSender>, settings: ReminderSettings) -> Self {
        Self {
            engine: ReminderEngine::new(pool, push, settings),
        }
    }
}

#[async_trait::async_trait]
impl Job for ReminderJob {
    fn name(&self) -> &'static str {
        "reminder_dispatch"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Minutes(1)
    }

    async fn execute(&self) -> Result<(), String> {
        let summary = self.engine.check_and_send(Utc::now()).await;
        if summary.entry_sent > 0 || summary.exit_sent > 0 || summary.delivery_failures > 0 {
            info!(
                entry_sent = summary.entry_sent,
                exit_sent = summary.exit_sent,
                deduplicated = summary.deduplicated,
                delivery_failures = summary.delivery_failures,
                "Reminder run finished"
            );
        }
        Ok(())
    }
}
