//! The root!
//!
//! Summary of the whole dashboard, and the answer for everything that is not routed

use axum::Extension;
use serde::Serialize;

use crate::api::Error;
use crate::api::OverviewResponse;
use crate::api::Success;
use crate::state::Source;
use crate::stats::Stats;
use crate::stats::compute_stats;
use crate::storage::Storage;

/// Dashboard summary going to the user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    stats: Stats,
    overview: Option<OverviewResponse>,
    aliases_source: Option<Source>,
    alerts: usize,

    /// Shown when any of the data is demo data
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<&'static str>,
}

/// The root!
///
/// Request:
/// ```sh
/// curl -v http://localhost:6000/
/// ```
///
/// Response:
/// ```json
/// {
///   "data": {
///     "stats": { "total": 8, ... },
///     "overview": { ... },
///     "aliasesSource": "demo",
///     "alerts": 0,
///     "notice": "..."
///   }
/// }
/// ```
pub async fn root(Extension(storage): Extension<Storage>) -> Success<DashboardResponse> {
    let response = storage
        .read(|dashboard| {
            let demo = dashboard.aliases_source == Some(Source::Demo)
                || dashboard.overview_source == Some(Source::Demo);

            DashboardResponse {
                stats: compute_stats(&dashboard.aliases),
                overview: OverviewResponse::from_dashboard(dashboard),
                aliases_source: dashboard.aliases_source,
                alerts: dashboard.alerts.len(),
                notice: demo.then_some("The upstream could not be reached, showing demo data"),
            }
        })
        .await;

    Success::ok(response)
}

/// All unknown routes end up here
pub async fn not_found() -> Error {
    Error::not_found("Not found")
}
