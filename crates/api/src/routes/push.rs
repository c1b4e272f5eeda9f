//! Push subscription handlers.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use domain::models::push_subscription::{SubscribeRequest, UnsubscribeRequest};
use domain::models::PushSubscription;
use persistence::repositories::{EmployeeRepository, PushSubscriptionRepository};
use serde::Serialize;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VapidKeyResponse {
    pub public_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsubscribeResponse {
    pub removed: bool,
}

/// The VAPID public key clients subscribe with.
pub async fn vapid_public_key(
    State(state): State<AppState>,
) -> Result<Json<VapidKeyResponse>, ApiError> {
    if !state.config.push.enabled {
        return Err(ApiError::ServiceUnavailable(
            "Push notifications are disabled".into(),
        ));
    }
    Ok(Json(VapidKeyResponse {
        public_key: state.config.push.vapid_public_key.clone(),
    }))
}

/// Register a subscription. Re-subscribing an existing endpoint re-binds
/// it instead of failing.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(req): Json<SubscribeRequest>,
) -> Result<(StatusCode, Json<PushSubscription>), ApiError> {
    req.validate()?;

    let employees = EmployeeRepository::new(state.pool.clone());
    if employees.find_by_id(req.employee_id).await?.is_none() {
        return Err(ApiError::NotFound("Employee not found".into()));
    }

    let repo = PushSubscriptionRepository::new(state.pool.clone());
    let subscription = repo
        .upsert(req.employee_id, &req.endpoint, &req.keys.p256dh, &req.keys.auth)
        .await?;

    Ok((StatusCode::CREATED, Json(subscription)))
}

pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(req): Json<UnsubscribeRequest>,
) -> Result<Json<UnsubscribeResponse>, ApiError> {
    req.validate()?;

    let repo = PushSubscriptionRepository::new(state.pool.clone());
    let removed = repo.delete_by_endpoint(&req.endpoint).await?;

    Ok(Json(UnsubscribeResponse { removed }))
}
