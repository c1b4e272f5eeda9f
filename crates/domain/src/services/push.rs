//! Push-delivery abstractions.
//!
//! The reminder engine talks to a [`PushSender`]; the real Web Push adapter
//! lives in the api crate, and [`MockPushSender`] backs tests.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::models::PushSubscription;

/// Where notification clicks navigate to in the client.
pub const DASHBOARD_URL: &str = "/employee/dashboard";

const ICON_PATH: &str = "/icon.svg";
const NOTIFICATION_TAG: &str = "timeclock-notification";

/// Kind of reminder, carried in the payload for client-side handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderType {
    EntryLead,
    Entry,
    Exit,
}

/// Structured data the service worker receives with the notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderData {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_slot: Option<i16>,
    pub reminder_type: ReminderType,
}

/// JSON payload pushed to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPayload {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub tag: String,
    pub data: ReminderData,
}

impl ReminderPayload {
    /// Entry reminder sent `lead_minutes` before the scheduled time.
    pub fn entry_lead(scheduled_time: &str, entry_slot: i16, lead_minutes: u32) -> Self {
        Self {
            title: "⏰ Hora de entrada".to_string(),
            body: format!(
                "Tu entrada es en {} minutos ({})",
                lead_minutes, scheduled_time
            ),
            icon: ICON_PATH.to_string(),
            badge: ICON_PATH.to_string(),
            tag: NOTIFICATION_TAG.to_string(),
            data: ReminderData {
                url: DASHBOARD_URL.to_string(),
                entry_time: Some(scheduled_time.to_string()),
                entry_slot: Some(entry_slot),
                reminder_type: ReminderType::EntryLead,
            },
        }
    }

    /// Entry reminder sent at the scheduled time itself.
    pub fn entry_now(scheduled_time: &str, entry_slot: i16) -> Self {
        Self {
            title: "⏰ Hora de entrada".to_string(),
            body: format!("Es hora de registrar tu entrada ({})", scheduled_time),
            icon: ICON_PATH.to_string(),
            badge: ICON_PATH.to_string(),
            tag: NOTIFICATION_TAG.to_string(),
            data: ReminderData {
                url: DASHBOARD_URL.to_string(),
                entry_time: Some(scheduled_time.to_string()),
                entry_slot: Some(entry_slot),
                reminder_type: ReminderType::Entry,
            },
        }
    }

    /// Generic clock-out reminder for employees still clocked in.
    pub fn exit_reminder() -> Self {
        Self {
            title: "🔔 Recuerda fichar la salida".to_string(),
            body: "No olvides registrar tu salida".to_string(),
            icon: ICON_PATH.to_string(),
            badge: ICON_PATH.to_string(),
            tag: NOTIFICATION_TAG.to_string(),
            data: ReminderData {
                url: DASHBOARD_URL.to_string(),
                entry_time: None,
                entry_slot: None,
                reminder_type: ReminderType::Exit,
            },
        }
    }
}

/// Result of a single delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// Accepted by the push service.
    Delivered,
    /// The endpoint is permanently invalid; the subscription must be removed.
    Gone,
    /// Transient failure; left for the next wave's check.
    Failed(String),
}

/// Push-delivery contract consumed by the reminder engine.
#[async_trait::async_trait]
pub trait PushSender: Send + Sync {
    /// Deliver a payload to one subscription.
    async fn send(&self, subscription: &PushSubscription, payload: &ReminderPayload)
        -> PushOutcome;
}

/// Recording mock sender for tests.
///
/// Endpoints listed in `gone_endpoints` report [`PushOutcome::Gone`];
/// endpoints in `failing_endpoints` report a transient failure.
#[derive(Debug, Default)]
pub struct MockPushSender {
    pub sent: Mutex<Vec<(String, ReminderPayload)>>,
    pub gone_endpoints: Vec<String>,
    pub failing_endpoints: Vec<String>,
}

impl MockPushSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded deliveries.
    pub fn sent_count(&self) -> usize {
        self.sent.lock().map(|s| s.len()).unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl PushSender for MockPushSender {
    async fn send(
        &self,
        subscription: &PushSubscription,
        payload: &ReminderPayload,
    ) -> PushOutcome {
        if self.gone_endpoints.contains(&subscription.endpoint) {
            tracing::debug!(endpoint = %subscription.endpoint, "Mock: endpoint gone");
            return PushOutcome::Gone;
        }
        if self.failing_endpoints.contains(&subscription.endpoint) {
            return PushOutcome::Failed("simulated failure".to_string());
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((subscription.endpoint.clone(), payload.clone()));
        }
        PushOutcome::Delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn subscription(endpoint: &str) -> PushSubscription {
        PushSubscription {
            id: 1,
            employee_id: 1,
            endpoint: endpoint.to_string(),
            p256dh: "p".to_string(),
            auth: "a".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_entry_payload_json_shape() {
        let payload = ReminderPayload::entry_now("09:00", 1);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["title"], "⏰ Hora de entrada");
        assert_eq!(json["tag"], "timeclock-notification");
        assert_eq!(json["data"]["url"], "/employee/dashboard");
        assert_eq!(json["data"]["entryTime"], "09:00");
        assert_eq!(json["data"]["entrySlot"], 1);
        assert_eq!(json["data"]["reminderType"], "entry");
    }

    #[test]
    fn test_lead_payload_mentions_lead_minutes() {
        let payload = ReminderPayload::entry_lead("09:00", 2, 5);
        assert!(payload.body.contains("5 minutos"));
        assert!(payload.body.contains("09:00"));
        assert_eq!(payload.data.reminder_type, ReminderType::EntryLead);
    }

    #[test]
    fn test_exit_payload_omits_entry_fields() {
        let json = serde_json::to_value(ReminderPayload::exit_reminder()).unwrap();
        assert!(json["data"].get("entryTime").is_none());
        assert!(json["data"].get("entrySlot").is_none());
        assert_eq!(json["data"]["reminderType"], "exit");
    }

    #[tokio::test]
    async fn test_mock_sender_records_and_simulates() {
        let sender = MockPushSender {
            gone_endpoints: vec!["https://push/gone".to_string()],
            failing_endpoints: vec!["https://push/flaky".to_string()],
            ..Default::default()
        };
        let payload = ReminderPayload::exit_reminder();

        let ok = sender.send(&subscription("https://push/ok"), &payload).await;
        assert_eq!(ok, PushOutcome::Delivered);

        let gone = sender
            .send(&subscription("https://push/gone"), &payload)
            .await;
        assert_eq!(gone, PushOutcome::Gone);

        let flaky = sender
            .send(&subscription("https://push/flaky"), &payload)
            .await;
        assert!(matches!(flaky, PushOutcome::Failed(_)));

        assert_eq!(sender.sent_count(), 1);
    }
}
