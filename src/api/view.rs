//! View API endpoints
//!
//! Filtering, sorting and paging of the alias table

use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use crate::api::aliases::ViewResponse;
use crate::state::Action;
use crate::storage::Storage;
use crate::view::SortDirection;
use crate::view::SortField;
use crate::view::StatusFilter;
use crate::view::ViewParameters;

use super::Error;
use super::Form;
use super::PathParameters;
use super::Success;

/// View parameters going to the user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewParametersResponse {
    status: &'static str,
    search: String,
    sort_field: &'static str,
    sort_direction: &'static str,
    page: usize,
    page_size: Option<usize>,
}

impl ViewParametersResponse {
    pub fn from_parameters(params: &ViewParameters) -> Self {
        Self {
            status: params.status.as_str(),
            search: params.search.clone(),
            sort_field: params.sort_field.as_str(),
            sort_direction: params.sort_direction.as_str(),
            page: params.page,
            page_size: params.page_size.limit(),
        }
    }
}

/// Get the current view parameters
///
/// Request:
/// ```sh
/// curl -v http://localhost:6000/api/view
/// ```
///
/// Response:
/// ```json
/// {
///   "data": {
///     "status": "all",
///     "search": "",
///     "sortField": "created",
///     "sortDirection": "desc",
///     "page": 1,
///     "pageSize": 8
///   }
/// }
/// ```
pub async fn single(Extension(storage): Extension<Storage>) -> Success<ViewParametersResponse> {
    let response = storage
        .read(|dashboard| ViewParametersResponse::from_parameters(&dashboard.view))
        .await;

    Success::ok(response)
}

/// Update view form
///
/// Every field is optional, missing fields keep their current value
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateViewForm {
    search: Option<String>,
    status: Option<String>,
    sort_field: Option<String>,
    sort_direction: Option<String>,
}

/// Update the filters and sorting, going back to the first page
///
/// Request:
/// ```sh
/// curl -v -XPATCH -H 'Content-Type: application/json' \
///     -d '{ "status": "active", "search": "shop" }' \
///     http://localhost:6000/api/view
/// ```
pub async fn update(
    Extension(storage): Extension<Storage>,
    Form(form): Form<UpdateViewForm>,
) -> Result<Success<ViewResponse>, Error> {
    let status = form
        .status
        .as_deref()
        .map(str::parse::<StatusFilter>)
        .transpose()
        .map_err(|err| Error::bad_request("Invalid status filter").with_description(err))?;

    let sort_direction = form
        .sort_direction
        .as_deref()
        .map(str::parse::<SortDirection>)
        .transpose()
        .map_err(|err| Error::bad_request("Invalid sort direction").with_description(err))?;

    let sort_field = form.sort_field.as_deref().map(SortField::from_name);

    let mut actions = Vec::new();

    if let Some(search) = form.search {
        actions.push(Action::SearchChanged(search));
    }

    if let Some(status) = status {
        actions.push(Action::StatusFilterChanged(status));
    }

    if sort_field.is_some() || sort_direction.is_some() {
        actions.push(Action::SortChanged(sort_field, sort_direction));
    }

    if actions.is_empty() {
        return Err(Error::bad_request("Nothing to update"));
    }

    storage.dispatch_all(actions).await;

    Ok(Success::ok(storage.read(ViewResponse::current).await))
}

/// Change page form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePageForm {
    page: usize,
}

/// Go to a specific page
///
/// Pages out of range show the nearest page, the response says so with `clamped`.
///
/// Request:
/// ```sh
/// curl -v -XPUT -H 'Content-Type: application/json' \
///     -d '{ "page": 2 }' \
///     http://localhost:6000/api/view/page
/// ```
pub async fn change_page(
    Extension(storage): Extension<Storage>,
    Form(form): Form<ChangePageForm>,
) -> Success<ViewResponse> {
    let response = storage
        .dispatch_and_read(Action::PageChanged(form.page), ViewResponse::current)
        .await;

    Success::ok(response)
}

/// Sort on a column, or flip the direction when already sorted on it
///
/// Unknown column names sort on the creation date.
///
/// Request:
/// ```sh
/// curl -v -XPOST http://localhost:6000/api/view/sort/email
/// ```
pub async fn sort(
    Extension(storage): Extension<Storage>,
    PathParameters(field): PathParameters<String>,
) -> Success<ViewResponse> {
    let field = SortField::from_name(&field);

    let response = storage
        .dispatch_and_read(Action::SortHeaderClicked(field), ViewResponse::current)
        .await;

    Success::ok(response)
}
