//! Leak check API endpoint

use axum::Extension;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

use crate::alerts::NewAlert;
use crate::leaks::Verdict;
use crate::leaks::assess;
use crate::state::Action;
use crate::storage::Storage;
use crate::upstream::Upstream;

use super::Error;
use super::Form;
use super::Success;

/// Leak check form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckForm {
    /// Alias or any other address
    alias: String,
}

/// Outcome of a leak check
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    address: String,
    verdict: Verdict,
    message: String,

    /// The alias that got marked as leaked
    #[serde(skip_serializing_if = "Option::is_none")]
    alias_id: Option<i64>,
}

/// Check an address for leaks
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -d '{ "alias": "john.shopping@canary.com" }' \
///     http://localhost:6000/api/leaks/check
/// ```
///
/// Response:
/// ```json
/// {
///   "data": {
///     "address": "john.shopping@canary.com",
///     "verdict": "clean",
///     "message": "Good news! ..."
///   }
/// }
/// ```
pub async fn check(
    Extension(storage): Extension<Storage>,
    Extension(upstream): Extension<Upstream>,
    Form(form): Form<CheckForm>,
) -> Result<Success<CheckResponse>, Error> {
    let address = form.alias.trim();

    if address.is_empty() {
        return Err(Error::bad_request("Please enter an alias or email to check"));
    }

    upstream.search(address).await.map_err(|err| {
        tracing::warn!("Could not check {address}: {err}");

        Error::bad_gateway("Could not check alias at this time.")
    })?;

    let roll = rand::thread_rng().r#gen::<f64>();
    let verdict = assess(address, roll);

    let alias_id = if verdict.is_leaked() {
        let alias_id = storage
            .read(|dashboard| dashboard.alias_by_email(address).map(|alias| alias.id))
            .await;

        let mut actions = vec![
            Action::LeakDetected,
            Action::AlertRaised(NewAlert::leak_found(address)),
        ];
        actions.extend(alias_id.map(Action::AliasLeaked));

        storage.dispatch_all(actions).await;

        tracing::info!("Leak found for {address}");

        alias_id
    } else {
        None
    };

    Ok(Success::ok(CheckResponse {
        address: address.to_string(),
        verdict,
        message: verdict.message(address),
        alias_id,
    }))
}
