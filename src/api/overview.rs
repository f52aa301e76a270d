//! Overview API endpoints
//!
//! Headline figures, the simulation of time and the weekly leak chart

use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use crate::overview::Activity;
use crate::overview::Bar;
use crate::overview::Overview;
use crate::overview::Trend;
use crate::overview::chart_bars;
use crate::overview::weekly_leaks;
use crate::refresh::refresh_overview;
use crate::state::Action;
use crate::state::Dashboard;
use crate::state::Source;
use crate::storage::Storage;
use crate::upstream::Upstream;

use super::Error;
use super::Form;
use super::Success;

/// Longest stretch of time that can be simulated at once
const MAX_SIMULATED_DAYS: u32 = 365;

/// Single figure with its trend
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigureResponse {
    value: u32,
    trend: Trend,
    label: &'static str,
}

impl FigureResponse {
    fn new(value: u32, trend: Trend) -> Self {
        Self {
            value,
            trend,
            label: trend.label(),
        }
    }
}

/// Overview response going to the user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    aliases: FigureResponse,
    protected_accounts: FigureResponse,
    alerts: FigureResponse,
    protection_score: FigureResponse,
    source: Option<Source>,
}

impl OverviewResponse {
    fn from_overview(overview: &Overview, source: Option<Source>) -> Self {
        Self {
            aliases: FigureResponse::new(overview.aliases, overview.trends.aliases),
            protected_accounts: FigureResponse::new(
                overview.protected_accounts,
                overview.trends.protected_accounts,
            ),
            alerts: FigureResponse::new(overview.alerts, overview.trends.alerts),
            protection_score: FigureResponse::new(
                overview.protection_score,
                overview.trends.protection_score,
            ),
            source,
        }
    }

    /// Create a response from the dashboard, `None` while the overview is still loading
    pub fn from_dashboard(dashboard: &Dashboard) -> Option<Self> {
        dashboard
            .overview
            .as_ref()
            .map(|overview| Self::from_overview(overview, dashboard.overview_source))
    }
}

fn not_loaded() -> Error {
    Error::not_found("Overview not loaded")
}

/// Get the headline figures
///
/// Request:
/// ```sh
/// curl -v http://localhost:6000/api/overview
/// ```
///
/// Response:
/// ```json
/// { "data": { "aliases": { "value": 24, "trend": "up", "label": "+5%" } ... "source": "demo" } }
/// ```
pub async fn single(
    Extension(storage): Extension<Storage>,
) -> Result<Success<OverviewResponse>, Error> {
    storage
        .read(OverviewResponse::from_dashboard)
        .await
        .map(Success::ok)
        .ok_or_else(not_loaded)
}

/// Reload the headline figures from the upstream
pub async fn refresh(
    Extension(storage): Extension<Storage>,
    Extension(upstream): Extension<Upstream>,
) -> Result<Success<OverviewResponse>, Error> {
    refresh_overview(&storage, &upstream).await;

    storage
        .read(OverviewResponse::from_dashboard)
        .await
        .map(Success::ok)
        .ok_or_else(not_loaded)
}

/// Simulate form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateForm {
    /// Days to move forward
    days: u32,
}

/// Move the headline figures a number of days forward
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -d '{ "days": 7 }' \
///     http://localhost:6000/api/overview/simulate
/// ```
pub async fn simulate(
    Extension(storage): Extension<Storage>,
    Form(form): Form<SimulateForm>,
) -> Result<Success<OverviewResponse>, Error> {
    if !(1..=MAX_SIMULATED_DAYS).contains(&form.days) {
        return Err(Error::bad_request("Invalid number of days")
            .with_description(format!("Days must be between 1 and {MAX_SIMULATED_DAYS}")));
    }

    let activity = {
        let mut rng = rand::thread_rng();
        Activity::random(&mut rng)
    };

    let response = storage
        .dispatch_and_read(
            Action::ActivitySimulated(form.days, activity),
            OverviewResponse::from_dashboard,
        )
        .await
        .ok_or_else(not_loaded)?;

    tracing::info!("Simulated {} days of activity", form.days);

    Ok(Success::ok(response))
}

/// Get the bars of the weekly leak chart
pub async fn chart() -> Success<Vec<Bar>> {
    Success::ok(chart_bars(&weekly_leaks()))
}
