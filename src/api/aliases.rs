//! Aliases API endpoints
//!
//! Everything related to the aliases management

use axum::Extension;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::alerts::NewAlert;
use crate::aliases::AliasRecord;
use crate::aliases::AliasStatus;
use crate::api::utils::fetch_alias;
use crate::api::view::ViewParametersResponse;
use crate::config::Config;
use crate::refresh::refresh_aliases;
use crate::state::Action;
use crate::state::Dashboard;
use crate::state::NewAlias;
use crate::state::Source;
use crate::storage::Storage;
use crate::upstream::Upstream;
use crate::view::PageSize;
use crate::view::View;
use crate::view::ViewParameters;
use crate::view::compute_view;

use super::Error;
use super::Form;
use super::PathParameters;
use super::Success;
use super::parse_domain;
use super::parse_optional;
use super::parse_required;

/// Body of the upstream item when an alias is created without a note
const NO_NOTE: &str = "No note provided";

/// Alias response going to the user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasResponse {
    pub id: i64,
    pub email: String,
    pub service: String,
    pub status: AliasStatus,
    pub created: NaiveDate,
    pub note: Option<String>,
    pub forwarded: bool,
    pub leak_protected: bool,
}

impl AliasResponse {
    /// Create a response from an [`AliasRecord`](AliasRecord)
    pub fn from_alias(alias: &AliasRecord) -> Self {
        Self {
            id: alias.id,
            email: alias.email.clone(),
            service: alias.service.clone(),
            status: alias.status,
            created: alias.created,
            note: alias.note.clone(),
            forwarded: alias.forwarded,
            leak_protected: alias.leak_protected,
        }
    }
}

/// Position of a page in the complete table
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResponse {
    /// Page that is shown
    page: usize,

    /// Page that was asked for, differs from `page` when it was out of range
    requested_page: usize,

    last_page: usize,

    /// `None` when everything is on a single page
    page_size: Option<usize>,

    /// Number of aliases matching the filters, over all pages
    total: usize,

    has_previous: bool,
    has_next: bool,
    clamped: bool,

    /// Page numbers to offer as direct links
    pages: Vec<usize>,
}

impl PaginationResponse {
    fn from_view(view: &View<'_>) -> Self {
        Self {
            page: view.page,
            requested_page: view.requested_page,
            last_page: view.last_page,
            page_size: view.page_size.limit(),
            total: view.total,
            has_previous: view.has_previous(),
            has_next: view.has_next(),
            clamped: view.is_clamped(),
            pages: view.visible_pages().collect(),
        }
    }
}

/// A single page of the alias table
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    aliases: Vec<AliasResponse>,
    pagination: PaginationResponse,
    parameters: ViewParametersResponse,

    /// `None` while the aliases are still loading
    source: Option<Source>,
}

impl ViewResponse {
    /// Compute the table of the dashboard with specific parameters
    pub fn from_dashboard(dashboard: &Dashboard, params: &ViewParameters) -> Self {
        let view = compute_view(&dashboard.aliases, params);

        Self {
            aliases: view
                .records
                .iter()
                .map(|alias| AliasResponse::from_alias(alias))
                .collect(),
            pagination: PaginationResponse::from_view(&view),
            parameters: ViewParametersResponse::from_parameters(params),
            source: dashboard.aliases_source,
        }
    }

    /// Compute the table as currently shown
    pub fn current(dashboard: &Dashboard) -> Self {
        Self::from_dashboard(dashboard, &dashboard.view)
    }
}

/// List the current page of aliases
///
/// Request:
/// ```sh
/// curl -v http://localhost:6000/api/aliases
/// ```
///
/// Response:
/// ```json
/// {
///   "data": {
///     "aliases": [ { "id": 1, "email": "john.shopping@canary.com", ... } ],
///     "pagination": { "page": 1, ... },
///     ...
///   }
/// }
/// ```
pub async fn list(Extension(storage): Extension<Storage>) -> Success<ViewResponse> {
    Success::ok(storage.read(ViewResponse::current).await)
}

/// List all aliases matching the current filters, on a single page
pub async fn list_all(Extension(storage): Extension<Storage>) -> Success<ViewResponse> {
    let response = storage
        .read(|dashboard| {
            let params = ViewParameters {
                page: 1,
                page_size: PageSize::Unbounded,
                ..dashboard.view.clone()
            };

            ViewResponse::from_dashboard(dashboard, &params)
        })
        .await;

    Success::ok(response)
}

/// Get single alias
///
/// Request:
/// ```sh
/// curl -v http://localhost:6000/api/aliases/1
/// ```
///
/// Response:
/// ```json
/// { "data": { "id": 1, "email": "john.shopping@canary.com", "status": "active" ... } }
/// ```
pub async fn single(
    Extension(storage): Extension<Storage>,
    PathParameters(alias_id): PathParameters<i64>,
) -> Result<Success<AliasResponse>, Error> {
    fetch_alias(&storage, alias_id)
        .await
        .map(|alias| Success::ok(AliasResponse::from_alias(&alias)))
}

/// Create alias form
///
/// Fields to create an alias
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAliasForm {
    /// Service the alias is used for
    service: String,

    /// Domain of the new address
    domain: String,

    /// Optional note, blank counts as none
    note: Option<String>,
}

/// Create an alias based on the [`CreateAliasForm`](CreateAliasForm) form
///
/// The upstream hands out the ID, a failing upstream fails the creation.
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -d '{ "service": "Video Streaming", "domain": "canary.com" }' \
///     http://localhost:6000/api/aliases
/// ```
///
/// Response
/// ```json
/// { "data": { "id": 101, "email": "alias101@canary.com", "status": "active" ... } }
/// ```
pub async fn create(
    Extension(storage): Extension<Storage>,
    Extension(upstream): Extension<Upstream>,
    Form(form): Form<CreateAliasForm>,
) -> Result<Success<AliasResponse>, Error> {
    let service = parse_required("service", &form.service)?;
    let domain = parse_domain(&form.domain)?;
    let note = parse_optional(form.note);

    let proposed_id = upstream
        .create_item(&service, note.as_deref().unwrap_or(NO_NOTE))
        .await
        .map_err(|err| {
            tracing::error!("Could not create alias upstream: {err}");

            Error::bad_gateway("Failed to create alias, please try again")
        })?;

    let new_alias = NewAlias {
        proposed_id,
        service,
        domain,
        note,
        created: Utc::now().date_naive(),
    };

    let alias = storage
        .dispatch_with(
            |dashboard| {
                if dashboard.free_alias_id(proposed_id).is_none() {
                    tracing::error!("No free alias ID for {proposed_id}");

                    return Err(Error::bad_gateway("Failed to create alias, please try again"));
                }

                Ok(Action::AliasCreated(new_alias))
            },
            |dashboard| dashboard.aliases.first().cloned(),
        )
        .await?
        .ok_or_else(|| Error::internal_server_error("Created alias went missing"))?;

    storage
        .dispatch(Action::AlertRaised(NewAlert::alias_created(&alias.email)))
        .await;

    tracing::info!("Alias created: {}", alias.email);

    Ok(Success::created(AliasResponse::from_alias(&alias)))
}

/// Toggle an alias between active and paused
///
/// Leaked aliases stay leaked.
///
/// Request:
/// ```sh
/// curl -v -XPOST http://localhost:6000/api/aliases/1/toggle
/// ```
pub async fn toggle(
    Extension(storage): Extension<Storage>,
    PathParameters(alias_id): PathParameters<i64>,
) -> Result<Success<AliasResponse>, Error> {
    let alias = storage
        .dispatch_with(
            |dashboard| match dashboard.alias(alias_id) {
                None => Err(Error::not_found("Alias not found")),
                Some(alias) if alias.status == AliasStatus::Leaked => {
                    Err(Error::conflict("Leaked alias can not be toggled")
                        .with_description(format!("{} was found in a leak", alias.email)))
                }
                Some(alias) => Ok(Action::AliasToggled(alias.id)),
            },
            |dashboard| dashboard.alias(alias_id).cloned(),
        )
        .await?
        .ok_or_else(|| Error::not_found("Alias not found"))?;

    tracing::info!(
        "Alias {} {}",
        alias.email,
        if alias.is_active() {
            "enabled"
        } else {
            "disabled"
        }
    );

    Ok(Success::ok(AliasResponse::from_alias(&alias)))
}

/// Delete an alias
///
/// Request:
/// ```sh
/// curl -v -XDELETE http://localhost:6000/api/aliases/1
/// ```
pub async fn delete(
    Extension(storage): Extension<Storage>,
    PathParameters(alias_id): PathParameters<i64>,
) -> Result<Success<&'static str>, Error> {
    let alias = fetch_alias(&storage, alias_id).await?;

    storage.dispatch(Action::AliasDeleted(alias.id)).await;

    tracing::info!("Alias deleted: {}", alias.email);

    Ok(Success::<&'static str>::no_content())
}

/// Outcome of reloading the aliases
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    source: Source,
    total: usize,

    /// Shown when the demo data had to be used
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<&'static str>,
}

/// Reload all aliases from the upstream
///
/// Request:
/// ```sh
/// curl -v -XPOST http://localhost:6000/api/aliases/refresh
/// ```
///
/// Response:
/// ```json
/// { "data": { "source": "upstream", "total": 30 } }
/// ```
pub async fn refresh(
    Extension(storage): Extension<Storage>,
    Extension(upstream): Extension<Upstream>,
    Extension(config): Extension<Config>,
) -> Success<RefreshResponse> {
    let source = refresh_aliases(&storage, &upstream, &config).await;
    let total = storage.read(|dashboard| dashboard.aliases.len()).await;

    Success::ok(RefreshResponse {
        source,
        total,
        notice: (source == Source::Demo).then_some("Failed to load aliases, using demo data"),
    })
}
