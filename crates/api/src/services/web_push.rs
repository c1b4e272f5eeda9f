//! Web Push delivery via VAPID-authenticated HTTP requests.
//!
//! Implements the [`PushSender`] contract against real browser push
//! services. Each request carries a short-lived ES256 JWT scoped to the
//! endpoint's origin (RFC 8292). Permanent endpoint rejections map to
//! [`PushOutcome::Gone`] so the caller can drop the subscription row;
//! everything else is treated as transient.

use std::time::Duration;

use chrono::Utc;
use domain::models::PushSubscription;
use domain::services::{PushOutcome, PushSender, ReminderPayload};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::{header, StatusCode};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::PushConfig;

/// VAPID token lifetime. Push services reject anything over 24 hours.
const VAPID_TOKEN_TTL_SECS: i64 = 12 * 3600;

/// Notification retention at the push service, in seconds.
const PUSH_TTL_SECS: u32 = 86400;

#[derive(Debug, thiserror::Error)]
pub enum WebPushError {
    #[error("Invalid VAPID private key: {0}")]
    InvalidKey(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

#[derive(Debug, Serialize)]
struct VapidClaims {
    aud: String,
    exp: i64,
    sub: String,
}

/// Web Push sender holding its VAPID keys and HTTP client.
///
/// All state is explicit and passed at construction; there is no global
/// key registry.
pub struct WebPushSender {
    subject: String,
    public_key: String,
    signing_key: EncodingKey,
    client: reqwest::Client,
}

impl WebPushSender {
    pub fn new(config: &PushConfig) -> Result<Self, WebPushError> {
        let signing_key = EncodingKey::from_ec_pem(config.vapid_private_key.as_bytes())
            .map_err(|e| WebPushError::InvalidKey(e.to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| WebPushError::Client(e.to_string()))?;

        Ok(Self {
            subject: config.vapid_subject.clone(),
            public_key: config.vapid_public_key.clone(),
            signing_key,
            client,
        })
    }

    /// Sign a VAPID JWT for the push service at `origin`.
    fn vapid_token(&self, origin: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = VapidClaims {
            aud: origin.to_string(),
            exp: Utc::now().timestamp() + VAPID_TOKEN_TTL_SECS,
            sub: self.subject.clone(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::ES256), &claims, &self.signing_key)
    }
}

/// Scheme and authority of the endpoint URL, the audience VAPID tokens
/// are scoped to.
fn endpoint_origin(endpoint: &str) -> Option<String> {
    let url = reqwest::Url::parse(endpoint).ok()?;
    let host = url.host_str()?;
    match url.port() {
        Some(port) => Some(format!("{}://{}:{}", url.scheme(), host, port)),
        None => Some(format!("{}://{}", url.scheme(), host)),
    }
}

/// Whether a push service status means the subscription is permanently
/// dead and must be removed.
fn is_gone(status: StatusCode) -> bool {
    matches!(
        status.as_u16(),
        400 | 401 | 403 | 404 | 410
    )
}

#[async_trait::async_trait]
impl PushSender for WebPushSender {
    async fn send(
        &self,
        subscription: &PushSubscription,
        payload: &ReminderPayload,
    ) -> PushOutcome {
        let origin = match endpoint_origin(&subscription.endpoint) {
            Some(origin) => origin,
            None => {
                warn!(endpoint = %subscription.endpoint, "Subscription endpoint is not a valid URL");
                return PushOutcome::Gone;
            }
        };

        let token = match self.vapid_token(&origin) {
            Ok(token) => token,
            Err(e) => return PushOutcome::Failed(format!("VAPID signing failed: {}", e)),
        };

        let response = self
            .client
            .post(&subscription.endpoint)
            .header(
                header::AUTHORIZATION,
                format!("vapid t={}, k={}", token, self.public_key),
            )
            .header(header::CONTENT_TYPE, "application/json")
            .header("TTL", PUSH_TTL_SECS)
            .header("Urgency", "high")
            .json(payload)
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {
                debug!(endpoint = %subscription.endpoint, "Push accepted");
                PushOutcome::Delivered
            }
            Ok(response) if is_gone(response.status()) => {
                debug!(
                    endpoint = %subscription.endpoint,
                    status = %response.status(),
                    "Push endpoint permanently rejected"
                );
                PushOutcome::Gone
            }
            Ok(response) => {
                PushOutcome::Failed(format!("Push service returned {}", response.status()))
            }
            Err(e) => PushOutcome::Failed(format!("Push request failed: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_origin() {
        assert_eq!(
            endpoint_origin("https://fcm.googleapis.com/fcm/send/abc123").as_deref(),
            Some("https://fcm.googleapis.com")
        );
        assert_eq!(
            endpoint_origin("https://push.example:8443/v1/sub").as_deref(),
            Some("https://push.example:8443")
        );
        assert_eq!(endpoint_origin("not a url"), None);
    }

    #[test]
    fn test_gone_statuses() {
        for code in [400u16, 401, 403, 404, 410] {
            assert!(is_gone(StatusCode::from_u16(code).unwrap()), "{}", code);
        }
        for code in [429u16, 500, 502, 503] {
            assert!(!is_gone(StatusCode::from_u16(code).unwrap()), "{}", code);
        }
    }

    #[test]
    fn test_new_rejects_garbage_key() {
        let config = PushConfig {
            enabled: true,
            vapid_subject: "mailto:admin@example.com".to_string(),
            vapid_public_key: "BPub".to_string(),
            vapid_private_key: "not a pem".to_string(),
            timeout_ms: 1000,
        };
        assert!(matches!(
            WebPushSender::new(&config),
            Err(WebPushError::InvalidKey(_))
        ));
    }
}
