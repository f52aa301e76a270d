//! Alerts API endpoints

use axum::Extension;
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::alerts::Alert;
use crate::alerts::DEMO_ALERT_MESSAGE;
use crate::alerts::NewAlert;
use crate::alerts::RiskLevel;
use crate::state::Action;
use crate::storage::Storage;

use super::Error;
use super::Success;

/// Alert response going to the user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertResponse {
    id: u64,
    message: String,
    risk_level: RiskLevel,
    timestamp: NaiveDateTime,
}

impl AlertResponse {
    fn from_alert(alert: &Alert) -> Self {
        Self {
            id: alert.id,
            message: alert.message.clone(),
            risk_level: alert.risk_level,
            timestamp: alert.timestamp,
        }
    }
}

/// List all alerts, newest first
///
/// Request:
/// ```sh
/// curl -v http://localhost:6000/api/alerts
/// ```
pub async fn list(Extension(storage): Extension<Storage>) -> Success<Vec<AlertResponse>> {
    let alerts = storage
        .read(|dashboard| {
            dashboard
                .alerts
                .iter()
                .rev()
                .map(AlertResponse::from_alert)
                .collect::<Vec<_>>()
        })
        .await;

    Success::ok(alerts)
}

/// Raise the demo alert
///
/// Request:
/// ```sh
/// curl -v -XPOST http://localhost:6000/api/alerts/demo
/// ```
pub async fn demo(Extension(storage): Extension<Storage>) -> Result<Success<AlertResponse>, Error> {
    let alert = NewAlert::now(DEMO_ALERT_MESSAGE, RiskLevel::High);

    storage
        .dispatch_and_read(Action::AlertRaised(alert), |dashboard| {
            dashboard.alerts.last().map(AlertResponse::from_alert)
        })
        .await
        .map(Success::created)
        .ok_or_else(|| Error::internal_server_error("Raised alert went missing"))
}
