//! Statistics API endpoint

use axum::Extension;

use crate::stats::Stats;
use crate::stats::compute_stats;
use crate::storage::Storage;

use super::Success;

/// Get the counters over all aliases, ignoring the filters
///
/// Request:
/// ```sh
/// curl -v http://localhost:6000/api/stats
/// ```
///
/// Response:
/// ```json
/// { "data": { "total": 8, "active": 5, "leakProtected": 5, "disabled": 3 } }
/// ```
pub async fn single(Extension(storage): Extension<Storage>) -> Success<Stats> {
    let stats = storage
        .read(|dashboard| compute_stats(&dashboard.aliases))
        .await;

    Success::ok(stats)
}
