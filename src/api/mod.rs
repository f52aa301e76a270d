//! All API endpoint setup

use axum::Router;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::routing::put;

pub use overview::OverviewResponse;
pub use request::Form;
pub use request::PathParameters;
pub use request::parse_domain;
pub use request::parse_optional;
pub use request::parse_required;
pub use response::Error;
pub use response::Success;

mod alerts;
mod aliases;
mod leaks;
mod overview;
mod request;
mod response;
mod stats;
mod utils;
mod view;

/// Get the Axum router for all API routes
pub fn router() -> Router {
    let aliases = Router::new()
        .route("/", get(aliases::list))
        .route("/", post(aliases::create))
        .route("/all", get(aliases::list_all))
        .route("/refresh", post(aliases::refresh))
        .route("/{alias}", get(aliases::single))
        .route("/{alias}", delete(aliases::delete))
        .route("/{alias}/toggle", post(aliases::toggle));

    let view = Router::new()
        .route("/", get(view::single))
        .route("/", patch(view::update))
        .route("/page", put(view::change_page))
        .route("/sort/{field}", post(view::sort));

    let overview = Router::new()
        .route("/", get(overview::single))
        .route("/refresh", post(overview::refresh))
        .route("/simulate", post(overview::simulate))
        .route("/chart", get(overview::chart));

    let alerts = Router::new()
        .route("/", get(alerts::list))
        .route("/demo", post(alerts::demo));

    Router::new()
        .nest("/aliases", aliases)
        .nest("/view", view)
        .nest("/overview", overview)
        .nest("/alerts", alerts)
        .route("/stats", get(stats::single))
        .route("/leaks/check", post(leaks::check))
}
