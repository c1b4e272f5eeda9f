//! HTTP trigger for the reminder engine.
//!
//! Deployments that run the engine from an external cron (instead of the
//! in-process job) call this endpoint once a minute, authenticated with a
//! shared secret.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use chrono::Utc;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::{ReminderEngine, ReminderSettings, RunSummary};

/// Run the notification decision engine once and report its counters.
pub async fn trigger_notifications(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RunSummary>, ApiError> {
    authorize(&state, &headers)?;

    if !state.config.push.enabled {
        info!("Cron trigger received with push disabled, no-op");
        return Ok(Json(RunSummary::default()));
    }

    let engine = ReminderEngine::new(
        state.pool.clone(),
        state.push.clone(),
        ReminderSettings::from_config(&state.config.notifications),
    );
    let summary = engine.check_and_send(Utc::now()).await;

    info!(
        entry_sent = summary.entry_sent,
        exit_sent = summary.exit_sent,
        deduplicated = summary.deduplicated,
        delivery_failures = summary.delivery_failures,
        "Cron-triggered reminder run finished"
    );

    Ok(Json(summary))
}

/// Accepts the shared secret as `Authorization: Bearer <secret>` or in an
/// `X-Cron-Secret` header. An empty configured secret disables the
/// endpoint entirely.
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let secret = &state.config.notifications.cron_secret;
    if secret.is_empty() {
        return Err(ApiError::Unauthorized("Cron trigger is not configured".into()));
    }

    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if bearer == Some(secret.as_str()) {
        return Ok(());
    }

    let header_secret = headers.get("x-cron-secret").and_then(|v| v.to_str().ok());
    if header_secret == Some(secret.as_str()) {
        return Ok(());
    }

    Err(ApiError::Unauthorized("Invalid cron secret".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    fn state_with_secret(secret: &str) -> AppState {
        AppState::for_test(&[("notifications.cron_secret", secret)])
    }

    #[tokio::test]
    async fn test_authorize_bearer() {
        let state = state_with_secret("s3cret");
        assert!(authorize(&state, &headers(&[("authorization", "Bearer s3cret")])).is_ok());
        assert!(authorize(&state, &headers(&[("authorization", "Bearer wrong")])).is_err());
    }

    #[tokio::test]
    async fn test_authorize_custom_header() {
        let state = state_with_secret("s3cret");
        assert!(authorize(&state, &headers(&[("x-cron-secret", "s3cret")])).is_ok());
        assert!(authorize(&state, &headers(&[("x-cron-secret", "nope")])).is_err());
    }

    #[tokio::test]
    async fn test_authorize_rejects_when_unconfigured() {
        let state = state_with_secret("");
        assert!(authorize(&state, &headers(&[("x-cron-secret", "")])).is_err());
    }

    #[tokio::test]
    async fn test_authorize_rejects_missing_credentials() {
        let state = state_with_secret("s3cret");
        assert!(authorize(&state, &headers(&[])).is_err());
    }
}
