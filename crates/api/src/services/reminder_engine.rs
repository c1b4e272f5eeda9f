//! Notification decision engine.
//!
//! One run inspects the current instant, decides which entry and exit
//! reminders are due, and pushes them. Every logical reminder is claimed
//! in the notification log before delivery, so overlapping runs (the
//! in-process job racing an external cron) send each reminder at most
//! once. A run never fails as a whole: storage errors skip the affected
//! step with a warning and per-subscription failures are isolated.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use domain::models::{
    ClockEntry, PushSubscription, ReminderKey, ScheduleSlot, Weekday, EXIT_REMINDER_SLOT,
};
use domain::services::{PushOutcome, PushSender, ReminderPayload};
use persistence::repositories::{
    NotificationLogRepository, PushSubscriptionRepository, ScheduleRepository,
    TimeclockRepository,
};
use serde::Serialize;
use shared::time::{
    format_minute_of_day, local_date, local_day_bounds_utc, local_parts, parse_entry_minutes,
};
use sqlx::PgPool;
use tracing::{debug, warn};

use crate::config::NotificationsConfig;
use crate::services::reminder_slots::{
    entry_candidates, expand_exit_waves, slot_matches, ExitSlot, ExitWave,
};

/// Engine settings, resolved from configuration once at startup.
#[derive(Debug, Clone)]
pub struct ReminderSettings {
    pub time_zone: Tz,
    pub lead_minutes: u32,
    pub lookback_minutes: u32,
    pub exit_waves: Vec<ExitWave>,
}

impl ReminderSettings {
    /// Resolve settings, dropping unparsable waves with a warning.
    pub fn from_config(config: &NotificationsConfig) -> Self {
        let time_zone = config.time_zone.parse().unwrap_or_else(|_| {
            warn!(time_zone = %config.time_zone, "Unknown timezone, falling back to UTC");
            chrono_tz::UTC
        });

        let exit_waves = config
            .exit_waves
            .iter()
            .filter_map(|wave| {
                let parsed = ExitWave::from_config(wave);
                if parsed.is_none() {
                    warn!(start = %wave.start, "Ignoring exit wave with invalid start time");
                }
                parsed
            })
            .collect();

        Self {
            time_zone,
            lead_minutes: config.lead_minutes,
            lookback_minutes: config.lookback_minutes,
            exit_waves,
        }
    }
}

/// Counters from one engine run, logged by the caller.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunSummary {
    /// Due entry reminder instants considered.
    pub entry_candidates: usize,
    /// Entry reminders claimed and pushed.
    pub entry_sent: usize,
    /// Clocked-in employees considered for an exit reminder.
    pub exit_candidates: usize,
    /// Exit reminders claimed and pushed.
    pub exit_sent: usize,
    /// Reminders skipped because the log already had them.
    pub deduplicated: usize,
    /// Reminders skipped for another reason (already clocked in, no
    /// subscriptions).
    pub skipped: usize,
    /// Individual push attempts that failed transiently.
    pub delivery_failures: usize,
    /// Subscriptions dropped after a permanent endpoint rejection.
    pub subscriptions_removed: usize,
}

/// Storage the engine reads and claims against during one run.
///
/// The Postgres implementation wraps the repositories; tests drive the
/// decision loop with an in-memory store, the same seam the push side
/// gets from [`PushSender`].
#[async_trait::async_trait]
pub trait ReminderStore: Send + Sync {
    async fn active_slots_for_day(&self, day: Weekday) -> Result<Vec<ScheduleSlot>, sqlx::Error>;

    async fn entries_created_between(
        &self,
        employee_ids: &[i32],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ClockEntry>, sqlx::Error>;

    async fn open_entries(&self) -> Result<Vec<ClockEntry>, sqlx::Error>;

    async fn subscriptions_for(
        &self,
        employee_ids: &[i32],
    ) -> Result<Vec<PushSubscription>, sqlx::Error>;

    async fn remove_subscription(&self, endpoint: &str) -> Result<bool, sqlx::Error>;

    /// Claim a reminder in the log. True means this caller owns delivery.
    async fn claim_reminder(&self, key: &ReminderKey) -> Result<bool, sqlx::Error>;

    async fn reminder_exists(&self, key: &ReminderKey) -> Result<bool, sqlx::Error>;

    async fn notified_employees(
        &self,
        employee_ids: &[i32],
        entry_time: &str,
        schedule_date: NaiveDate,
        entry_slot: i16,
    ) -> Result<HashSet<i32>, sqlx::Error>;
}

/// Production store backed by the Postgres repositories.
pub struct PgReminderStore {
    schedules: ScheduleRepository,
    timeclocks: TimeclockRepository,
    subscriptions: PushSubscriptionRepository,
    log: NotificationLogRepository,
}

impl PgReminderStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            schedules: ScheduleRepository::new(pool.clone()),
            timeclocks: TimeclockRepository::new(pool.clone()),
            subscriptions: PushSubscriptionRepository::new(pool.clone()),
            log: NotificationLogRepository::new(pool),
        }
    }
}

#[async_trait::async_trait]
impl ReminderStore for PgReminderStore {
    async fn active_slots_for_day(&self, day: Weekday) -> Result<Vec<ScheduleSlot>, sqlx::Error> {
        self.schedules.list_active_for_day(day).await
    }

    async fn entries_created_between(
        &self,
        employee_ids: &[i32],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ClockEntry>, sqlx::Error> {
        self.timeclocks
            .list_created_between_for_employees(employee_ids, from, to)
            .await
    }

    async fn open_entries(&self) -> Result<Vec<ClockEntry>, sqlx::Error> {
        self.timeclocks.list_open().await
    }

    async fn subscriptions_for(
        &self,
        employee_ids: &[i32],
    ) -> Result<Vec<PushSubscription>, sqlx::Error> {
        self.subscriptions.list_for_employees(employee_ids).await
    }

    async fn remove_subscription(&self, endpoint: &str) -> Result<bool, sqlx::Error> {
        self.subscriptions.delete_by_endpoint(endpoint).await
    }

    async fn claim_reminder(&self, key: &ReminderKey) -> Result<bool, sqlx::Error> {
        self.log.record(key).await
    }

    async fn reminder_exists(&self, key: &ReminderKey) -> Result<bool, sqlx::Error> {
        self.log.exists(key).await
    }

    async fn notified_employees(
        &self,
        employee_ids: &[i32],
        entry_time: &str,
        schedule_date: NaiveDate,
        entry_slot: i16,
    ) -> Result<HashSet<i32>, sqlx::Error> {
        self.log
            .notified_employees(employee_ids, entry_time, schedule_date, entry_slot)
            .await
    }
}

pub struct ReminderEngine {
    store: Arc<dyn ReminderStore>,
    push: Arc<dyn PushSender>,
    settings: ReminderSettings,
}

impl ReminderEngine {
    pub fn new(pool: PgPool, push: Arc<dyn PushSender>, settings: ReminderSettings) -> Self {
        Self::with_store(Arc::new(PgReminderStore::new(pool)), push, settings)
    }

    pub fn with_store(
        store: Arc<dyn ReminderStore>,
        push: Arc<dyn PushSender>,
        settings: ReminderSettings,
    ) -> Self {
        Self {
            store,
            push,
            settings,
        }
    }

    /// Run the engine for the given instant.
    pub async fn check_and_send(&self, now: DateTime<Utc>) -> RunSummary {
        let mut summary = RunSummary::default();
        self.entry_reminders(now, &mut summary).await;
        self.exit_reminders(now, &mut summary).await;
        summary
    }

    async fn entry_reminders(&self, now: DateTime<Utc>, summary: &mut RunSummary) {
        let tz = self.settings.time_zone;
        let parts = local_parts(now, tz);
        let today = local_date(now, tz);
        let now_minute = parts.minute_of_day();

        let Some(weekday) = Weekday::from_index(parts.day_of_week) else {
            return;
        };

        let slots = match self.store.active_slots_for_day(weekday).await {
            Ok(slots) => slots,
            Err(e) => {
                warn!(error = %e, "Schedule lookup failed, skipping entry reminders");
                return;
            }
        };
        if slots.is_empty() {
            return;
        }

        let employee_ids = unique_ids(slots.iter().map(|s| s.employee_id));

        // Employees already clocked in today need no entry reminder.
        let (day_start, day_end) = local_day_bounds_utc(now, tz);
        let clocked_in: HashSet<i32> = match self
            .store
            .entries_created_between(&employee_ids, day_start, day_end)
            .await
        {
            Ok(entries) => entries
                .iter()
                .filter(|e| e.is_open())
                .map(|e| e.employee_id)
                .collect(),
            Err(e) => {
                warn!(error = %e, "Open entry lookup failed, skipping entry reminders");
                return;
            }
        };

        let subs_by_employee = match self.store.subscriptions_for(&employee_ids).await {
            Ok(subs) => group_subscriptions(subs),
            Err(e) => {
                warn!(error = %e, "Subscription lookup failed, skipping entry reminders");
                return;
            }
        };

        for slot in &slots {
            let Some(entry_minute) = parse_entry_minutes(&slot.entry_time) else {
                warn!(
                    employee_id = slot.employee_id,
                    entry_time = %slot.entry_time,
                    "Unparsable schedule time, no reminder for this slot"
                );
                continue;
            };
            let scheduled_label = format_minute_of_day(entry_minute);

            for candidate in entry_candidates(entry_minute, self.settings.lead_minutes) {
                if !slot_matches(
                    now_minute,
                    candidate.minute_of_day,
                    self.settings.lookback_minutes,
                ) {
                    continue;
                }
                summary.entry_candidates += 1;

                if clocked_in.contains(&slot.employee_id) {
                    summary.skipped += 1;
                    continue;
                }

                let key = ReminderKey {
                    employee_id: slot.employee_id,
                    entry_time: candidate.label(),
                    schedule_date: today,
                    entry_slot: slot.entry_slot.as_i16(),
                };

                // Cheap pre-check; the claim below is the authoritative
                // one under concurrent runs.
                match self.store.reminder_exists(&key).await {
                    Ok(true) => {
                        summary.deduplicated += 1;
                        continue;
                    }
                    Ok(false) => {}
                    Err(e) => {
                        warn!(error = %e, employee_id = slot.employee_id, "Log lookup failed");
                        continue;
                    }
                }

                // No subscriptions: skip without a log row, so the reminder
                // can still fire if the employee subscribes inside the
                // lookback window.
                let Some(subs) = subs_by_employee.get(&slot.employee_id) else {
                    debug!(employee_id = slot.employee_id, "No push subscriptions");
                    summary.skipped += 1;
                    continue;
                };

                match self.store.claim_reminder(&key).await {
                    Ok(true) => {}
                    Ok(false) => {
                        summary.deduplicated += 1;
                        continue;
                    }
                    Err(e) => {
                        warn!(error = %e, employee_id = slot.employee_id, "Log claim failed");
                        continue;
                    }
                }

                let payload = if candidate.is_lead {
                    ReminderPayload::entry_lead(
                        &scheduled_label,
                        slot.entry_slot.as_i16(),
                        self.settings.lead_minutes,
                    )
                } else {
                    ReminderPayload::entry_now(&scheduled_label, slot.entry_slot.as_i16())
                };

                self.deliver(subs, &payload, summary).await;
                summary.entry_sent += 1;
            }
        }
    }

    async fn exit_reminders(&self, now: DateTime<Utc>, summary: &mut RunSummary) {
        let tz = self.settings.time_zone;
        let parts = local_parts(now, tz);
        let today = local_date(now, tz);
        let now_minute = parts.minute_of_day();

        let matched: Vec<ExitSlot> = expand_exit_waves(&self.settings.exit_waves)
            .into_iter()
            .filter(|slot| {
                slot_matches(now_minute, slot.minute_of_day, self.settings.lookback_minutes)
            })
            .collect();
        if matched.is_empty() {
            return;
        }

        let open_entries = match self.store.open_entries().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "Open entry scan failed, skipping exit reminders");
                return;
            }
        };
        if open_entries.is_empty() {
            return;
        }

        // Local entry date per clocked-in employee. The open-entry
        // invariant gives at most one open entry per employee.
        let entry_dates: HashMap<i32, NaiveDate> = open_entries
            .iter()
            .filter_map(|e| e.entry_time.map(|t| (e.employee_id, local_date(t, tz))))
            .collect();

        let all_ids = unique_ids(entry_dates.keys().copied());
        let subs_by_employee = match self.store.subscriptions_for(&all_ids).await {
            Ok(subs) => group_subscriptions(subs),
            Err(e) => {
                warn!(error = %e, "Subscription lookup failed, skipping exit reminders");
                return;
            }
        };

        for slot in &matched {
            let reminder_date = exit_reminder_date(today, now_minute, slot);

            // Only employees whose shift started on the slot's day.
            let candidate_ids: Vec<i32> = entry_dates
                .iter()
                .filter(|(_, date)| **date == reminder_date)
                .map(|(id, _)| *id)
                .collect();
            if candidate_ids.is_empty() {
                continue;
            }
            summary.exit_candidates += candidate_ids.len();

            let label = slot.label();
            let already = match self
                .store
                .notified_employees(&candidate_ids, &label, reminder_date, EXIT_REMINDER_SLOT)
                .await
            {
                Ok(already) => already,
                Err(e) => {
                    warn!(error = %e, "Log lookup failed, skipping exit slot");
                    continue;
                }
            };

            for employee_id in candidate_ids {
                if already.contains(&employee_id) {
                    summary.deduplicated += 1;
                    continue;
                }
                let Some(subs) = subs_by_employee.get(&employee_id) else {
                    debug!(employee_id, "No push subscriptions");
                    summary.skipped += 1;
                    continue;
                };

                let key = ReminderKey {
                    employee_id,
                    entry_time: label.clone(),
                    schedule_date: reminder_date,
                    entry_slot: EXIT_REMINDER_SLOT,
                };
                match self.store.claim_reminder(&key).await {
                    Ok(true) => {}
                    Ok(false) => {
                        summary.deduplicated += 1;
                        continue;
                    }
                    Err(e) => {
                        warn!(error = %e, employee_id, "Log claim failed");
                        continue;
                    }
                }

                self.deliver(subs, &ReminderPayload::exit_reminder(), summary)
                    .await;
                summary.exit_sent += 1;
            }
        }
    }

    /// Push a payload to every subscription of one employee. Permanently
    /// rejected endpoints are dropped; transient failures only counted.
    async fn deliver(
        &self,
        subs: &[PushSubscription],
        payload: &ReminderPayload,
        summary: &mut RunSummary,
    ) {
        for sub in subs {
            match self.push.send(sub, payload).await {
                PushOutcome::Delivered => {}
                PushOutcome::Gone => {
                    summary.subscriptions_removed += 1;
                    match self.store.remove_subscription(&sub.endpoint).await {
                        Ok(_) => {
                            debug!(endpoint = %sub.endpoint, "Removed dead subscription")
                        }
                        Err(e) => {
                            warn!(error = %e, endpoint = %sub.endpoint, "Failed to remove dead subscription")
                        }
                    }
                }
                PushOutcome::Failed(reason) => {
                    summary.delivery_failures += 1;
                    warn!(
                        employee_id = sub.employee_id,
                        endpoint = %sub.endpoint,
                        reason = %reason,
                        "Push delivery failed"
                    );
                }
            }
        }
    }
}

/// Civil date an exit slot's reminders are logged under.
///
/// The invocation date is pulled back a day when the run itself wrapped
/// past the slot's minute, then shifted by the slot's own wave offset.
fn exit_reminder_date(today: NaiveDate, now_minute: u32, slot: &ExitSlot) -> NaiveDate {
    let wrapped = if now_minute < slot.minute_of_day { -1 } else { 0 };
    today + chrono::Duration::days(wrapped + slot.date_offset)
}

fn unique_ids(ids: impl Iterator<Item = i32>) -> Vec<i32> {
    let set: HashSet<i32> = ids.collect();
    set.into_iter().collect()
}

fn group_subscriptions(subs: Vec<PushSubscription>) -> HashMap<i32, Vec<PushSubscription>> {
    let mut grouped: HashMap<i32, Vec<PushSubscription>> = HashMap::new();
    for sub in subs {
        grouped.entry(sub.employee_id).or_default().push(sub);
    }
    grouped
}
