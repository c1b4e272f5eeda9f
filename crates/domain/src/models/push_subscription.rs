//! Web Push subscription domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A browser push subscription registered by an employee's client.
///
/// Unique on `endpoint`; re-subscribing the same endpoint re-binds it to the
/// employee and refreshes the keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushSubscription {
    pub id: i32,
    pub employee_id: i32,
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Encryption keys of a browser subscription, as sent by the client.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SubscriptionKeys {
    #[validate(length(min = 1, message = "p256dh key is required"))]
    pub p256dh: String,

    #[validate(length(min = 1, message = "auth key is required"))]
    pub auth: String,
}

/// Request payload for registering a push subscription.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub employee_id: i32,

    #[validate(url(message = "Endpoint must be a valid URL"))]
    pub endpoint: String,

    #[validate(nested)]
    pub keys: SubscriptionKeys,
}

/// Request payload for removing a push subscription.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UnsubscribeRequest {
    #[validate(url(message = "Endpoint must be a valid URL"))]
    pub endpoint: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_request_validation() {
        let req: SubscribeRequest = serde_json::from_str(
            r#"{"employeeId":3,"endpoint":"https://push.example/abc","keys":{"p256dh":"k1","auth":"k2"}}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_subscribe_request_rejects_bad_endpoint() {
        let req: SubscribeRequest = serde_json::from_str(
            r#"{"employeeId":3,"endpoint":"not a url","keys":{"p256dh":"k1","auth":"k2"}}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }
}
