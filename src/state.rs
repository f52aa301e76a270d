//! Dashboard state
//!
//! The whole dashboard is a single value, changed only by applying an [`Action`] with
//! [`update`]. Everything random or time dependent is decided before the action is created, so
//! `update` itself is deterministic.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::alerts::Alert;
use crate::alerts::NewAlert;
use crate::aliases::AliasRecord;
use crate::aliases::AliasStatus;
use crate::aliases::alias_email;
use crate::overview::Activity;
use crate::overview::Overview;
use crate::view::PageSize;
use crate::view::SortDirection;
use crate::view::SortField;
use crate::view::StatusFilter;
use crate::view::ViewParameters;

/// Where the data on the dashboard came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// The upstream API
    Upstream,

    /// The built-in demo data, after the upstream failed
    Demo,
}

/// Values to create an alias
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAlias {
    /// ID handed out by the upstream, replaced when already taken
    pub proposed_id: i64,

    pub service: String,
    pub domain: String,
    pub note: Option<String>,
    pub created: NaiveDate,
}

/// Everything that can happen to the dashboard
#[derive(Clone, Debug)]
pub enum Action {
    /// Replace all aliases
    AliasesLoaded(Vec<AliasRecord>, Source),

    /// Add an alias in front
    AliasCreated(NewAlias),

    /// Flip an alias between active and paused
    AliasToggled(i64),

    /// Remove an alias
    AliasDeleted(i64),

    /// An alias address was found in a leak
    AliasLeaked(i64),

    SearchChanged(String),

    StatusFilterChanged(StatusFilter),

    /// Sort on a field and direction, a missing part keeps its current value
    SortChanged(Option<SortField>, Option<SortDirection>),

    /// Clicking a column header sorts on it, or flips the direction when already sorted on it
    SortHeaderClicked(SortField),

    PageChanged(usize),

    OverviewLoaded(Overview, Source),

    /// Days passed with the given daily activity
    ActivitySimulated(u32, Activity),

    /// A leak check came back positive
    LeakDetected,

    AlertRaised(NewAlert),
}

impl Action {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::AliasesLoaded(..) => "aliases-loaded",
            Self::AliasCreated(_) => "alias-created",
            Self::AliasToggled(_) => "alias-toggled",
            Self::AliasDeleted(_) => "alias-deleted",
            Self::AliasLeaked(_) => "alias-leaked",
            Self::SearchChanged(_) => "search-changed",
            Self::StatusFilterChanged(_) => "status-filter-changed",
            Self::SortChanged(..) => "sort-changed",
            Self::SortHeaderClicked(_) => "sort-header-clicked",
            Self::PageChanged(_) => "page-changed",
            Self::OverviewLoaded(..) => "overview-loaded",
            Self::ActivitySimulated(..) => "activity-simulated",
            Self::LeakDetected => "leak-detected",
            Self::AlertRaised(_) => "alert-raised",
        }
    }
}

/// The complete dashboard
#[derive(Clone, Debug, Default)]
pub struct Dashboard {
    /// All aliases, newest creations in front
    pub aliases: Vec<AliasRecord>,

    /// Source of the aliases, `None` while still loading
    pub aliases_source: Option<Source>,

    /// How the alias table is shown
    pub view: ViewParameters,

    /// Headline figures, `None` while still loading
    pub overview: Option<Overview>,

    /// Source of the headline figures
    pub overview_source: Option<Source>,

    /// All alerts, oldest first
    pub alerts: Vec<Alert>,
}

impl Dashboard {
    /// Empty dashboard with a specific page size
    pub fn new(page_size: PageSize) -> Self {
        Self {
            view: ViewParameters::with_page_size(page_size),
            ..Self::default()
        }
    }

    /// Find an alias by ID
    pub fn alias(&self, id: i64) -> Option<&AliasRecord> {
        self.aliases.iter().find(|alias| alias.id == id)
    }

    /// Find an alias by its address
    pub fn alias_by_email(&self, email: &str) -> Option<&AliasRecord> {
        self.aliases.iter().find(|alias| alias.email == email)
    }

    /// ID for a new alias, the proposed one unless it is taken
    ///
    /// `None` when the proposed ID is taken and there is no ID above the highest one
    pub fn free_alias_id(&self, proposed_id: i64) -> Option<i64> {
        if self.alias(proposed_id).is_none() {
            return Some(proposed_id);
        }

        self.aliases
            .iter()
            .map(|alias| alias.id)
            .max()
            .and_then(|max| max.checked_add(1))
    }

    fn set_alias_status<F>(mut self, id: i64, status: F) -> Self
    where
        F: FnOnce(AliasStatus) -> AliasStatus,
    {
        if let Some(alias) = self.aliases.iter_mut().find(|alias| alias.id == id) {
            alias.status = status(alias.status);
        }

        self
    }

    /// Change the view, any change of filters or sorting starts at the first page
    fn with_view<F>(mut self, change: F) -> Self
    where
        F: FnOnce(&mut ViewParameters),
    {
        change(&mut self.view);
        self.view.page = 1;

        self
    }
}

/// Apply an action to the dashboard
pub fn update(dashboard: Dashboard, action: Action) -> Dashboard {
    match action {
        Action::AliasesLoaded(aliases, source) => {
            let mut seen = HashSet::with_capacity(aliases.len());
            let unique = aliases
                .into_iter()
                .filter(|alias| {
                    let first = seen.insert(alias.id);
                    if !first {
                        tracing::warn!("Skipping alias with duplicate ID {}", alias.id);
                    }
                    first
                })
                .collect();

            Dashboard {
                aliases: unique,
                aliases_source: Some(source),
                ..dashboard
            }
            .with_view(|_| {})
        }

        Action::AliasCreated(new_alias) => {
            let Some(id) = dashboard.free_alias_id(new_alias.proposed_id) else {
                tracing::warn!("No free alias ID for {}", new_alias.proposed_id);
                return dashboard;
            };

            let alias = AliasRecord {
                id,
                email: alias_email(id, &new_alias.domain),
                service: new_alias.service,
                status: AliasStatus::Active,
                created: new_alias.created,
                note: new_alias.note,
                forwarded: true,
                leak_protected: true,
            };

            let mut dashboard = dashboard;
            dashboard.aliases.insert(0, alias);
            dashboard
        }

        Action::AliasToggled(id) => dashboard.set_alias_status(id, AliasStatus::toggled),

        Action::AliasLeaked(id) => dashboard.set_alias_status(id, |_| AliasStatus::Leaked),

        Action::AliasDeleted(id) => {
            let mut dashboard = dashboard;
            dashboard.aliases.retain(|alias| alias.id != id);
            dashboard
        }

        Action::SearchChanged(search) => dashboard.with_view(|view| view.search = search),

        Action::StatusFilterChanged(status) => dashboard.with_view(|view| view.status = status),

        Action::SortChanged(field, direction) => dashboard.with_view(|view| {
            view.sort_field = field.unwrap_or(view.sort_field);
            view.sort_direction = direction.unwrap_or(view.sort_direction);
        }),

        Action::SortHeaderClicked(field) => dashboard.with_view(|view| {
            if view.sort_field == field {
                view.sort_direction = view.sort_direction.reversed();
            } else {
                view.sort_field = field;
                view.sort_direction = SortDirection::Desc;
            }
        }),

        Action::PageChanged(page) => {
            let mut dashboard = dashboard;
            dashboard.view.page = page;
            dashboard
        }

        Action::OverviewLoaded(overview, source) => Dashboard {
            overview: Some(overview),
            overview_source: Some(source),
            ..dashboard
        },

        Action::ActivitySimulated(days, activity) => Dashboard {
            overview: dashboard
                .overview
                .map(|overview| overview.simulate(days, &activity)),
            ..dashboard
        },

        Action::LeakDetected => Dashboard {
            overview: dashboard.overview.map(Overview::with_leak),
            ..dashboard
        },

        Action::AlertRaised(new_alert) => {
            let id = dashboard
                .alerts
                .last()
                .map_or(1, |alert| alert.id.saturating_add(1));

            let mut dashboard = dashboard;
            dashboard.alerts.push(Alert {
                id,
                message: new_alert.message,
                risk_level: new_alert.risk_level,
                timestamp: new_alert.timestamp,
            });
            dashboard
        }
    }
}
