//! Alerts raised by the dashboard

use chrono::NaiveDateTime;
use serde::Serialize;

/// Message of the demo alert
pub const DEMO_ALERT_MESSAGE: &str = "DEMO ALERT: This is a high-priority test alert!";

/// How serious an alert is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    High,
}

/// Single alert
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub id: u64,
    pub message: String,
    pub risk_level: RiskLevel,
    pub timestamp: NaiveDateTime,
}

/// Values to raise an alert, the ID is handed out on arrival
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAlert {
    pub message: String,
    pub risk_level: RiskLevel,
    pub timestamp: NaiveDateTime,
}

impl NewAlert {
    /// Alert raised right now
    pub fn now<M>(message: M, risk_level: RiskLevel) -> Self
    where
        M: ToString,
    {
        Self {
            message: message.to_string(),
            risk_level,
            timestamp: chrono::Utc::now().naive_utc(),
        }
    }

    /// Alert for a freshly created alias
    pub fn alias_created(email: &str) -> Self {
        Self::now(format!("New alias created: {email}"), RiskLevel::Low)
    }

    /// Alert for an address found in a leak
    pub fn leak_found(address: &str) -> Self {
        Self::now(
            format!("ALERT: {address} was found in recent data leaks."),
            RiskLevel::High,
        )
    }
}
