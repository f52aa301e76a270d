//! The alias list view
//!
//! Turns the full alias collection plus the view parameters into the page shown in the alias
//! table, together with the pagination metadata. Nothing in here touches the state, the caller
//! decides what to do with the result.

use std::cmp::Ordering;
use std::fmt;
use std::num::NonZeroUsize;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::aliases::AliasRecord;
use crate::aliases::AliasStatus;
use crate::aliases::UnknownStatus;

/// Page size of the alias table
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Amount of page numbers offered by the pager
const VISIBLE_PAGES: usize = 5;

/// Which statuses are shown
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Every status
    #[default]
    All,

    /// A single status
    Only(AliasStatus),
}

impl StatusFilter {
    /// Is a record with this status visible?
    pub fn allows(self, status: AliasStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == status,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "all" {
            Ok(Self::All)
        } else {
            value.parse().map(Self::Only)
        }
    }
}

/// Field to sort the alias table on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortField {
    Email,
    Service,
    Status,
    #[default]
    Created,
}

impl SortField {
    /// Parse a field name, anything unknown sorts on the creation date
    pub fn from_name(name: &str) -> Self {
        match name {
            "email" => Self::Email,
            "service" => Self::Service,
            "status" => Self::Status,
            _ => Self::Created,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Service => "service",
            Self::Status => "status",
            Self::Created => "created",
        }
    }
}

/// Direction of the sort
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// The other direction
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Unknown sort direction
#[derive(Debug, PartialEq, Eq)]
pub struct UnknownDirection(pub String);

impl fmt::Display for UnknownDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, r#"Unknown sort direction "{}""#, self.0)
    }
}

impl FromStr for SortDirection {
    type Err = UnknownDirection;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(UnknownDirection(other.to_string())),
        }
    }
}

/// Size of a single page
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageSize {
    /// At most this many records per page
    Fixed(NonZeroUsize),

    /// Everything on a single page
    Unbounded,
}

impl PageSize {
    /// Page size from a setting, `0` meaning unbounded
    pub fn from_setting(size: usize) -> Self {
        NonZeroUsize::new(size).map_or(Self::Unbounded, Self::Fixed)
    }

    /// Number of records per page, if bounded
    pub fn limit(self) -> Option<usize> {
        match self {
            Self::Fixed(size) => Some(size.get()),
            Self::Unbounded => None,
        }
    }

    /// The last page for a number of records, an empty result still has one page
    pub fn last_page(self, total: usize) -> usize {
        match self {
            Self::Fixed(size) => total.div_ceil(size.get()).max(1),
            Self::Unbounded => 1,
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::from_setting(DEFAULT_PAGE_SIZE)
    }
}

/// Everything that decides what the alias table shows
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewParameters {
    pub status: StatusFilter,
    pub search: String,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,

    /// 1-based page number
    pub page: usize,

    pub page_size: PageSize,
}

impl ViewParameters {
    /// Default parameters with a specific page size
    pub fn with_page_size(page_size: PageSize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }
}

impl Default for ViewParameters {
    fn default() -> Self {
        Self {
            status: StatusFilter::All,
            search: String::new(),
            sort_field: SortField::Created,
            sort_direction: SortDirection::Desc,
            page: 1,
            page_size: PageSize::default(),
        }
    }
}

/// A single page of the alias table
#[derive(Debug)]
pub struct View<'a> {
    /// The records on this page
    pub records: Vec<&'a AliasRecord>,

    /// Number of records matching the filters, over all pages
    pub total: usize,

    /// The page actually shown
    pub page: usize,

    /// The page that was asked for
    pub requested_page: usize,

    pub last_page: usize,

    pub page_size: PageSize,
}

impl View<'_> {
    /// Was the requested page out of range?
    pub fn is_clamped(&self) -> bool {
        self.page != self.requested_page
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.last_page
    }

    /// Page numbers offered by the pager, centred on the current page where possible
    pub fn visible_pages(&self) -> RangeInclusive<usize> {
        let mut start = self.page.saturating_sub(VISIBLE_PAGES / 2).max(1);
        let end = (start + VISIBLE_PAGES - 1).min(self.last_page);

        if end + 1 - start < VISIBLE_PAGES {
            start = (end + 1).saturating_sub(VISIBLE_PAGES).max(1);
        }

        start..=end
    }
}

/// Compute the visible page of the alias table
///
/// Filters on status and search query, sorts and cuts out the requested page. Pages out of
/// range are clamped to the nearest existing page, see [`View::is_clamped`].
pub fn compute_view<'a>(records: &'a [AliasRecord], params: &ViewParameters) -> View<'a> {
    let needle = params.search.to_lowercase();

    let mut matching = records
        .iter()
        .filter(|record| params.status.allows(record.status))
        .filter(|record| needle.is_empty() || record.matches(&needle))
        .collect::<Vec<_>>();

    matching.sort_by(|a, b| compare(a, b, params.sort_field, params.sort_direction));

    let total = matching.len();
    let last_page = params.page_size.last_page(total);
    let page = params.page.clamp(1, last_page);

    let records = match params.page_size.limit() {
        Some(limit) => matching
            .into_iter()
            .skip((page - 1) * limit)
            .take(limit)
            .collect(),
        None => matching,
    };

    View {
        records,
        total,
        page,
        requested_page: params.page,
        last_page,
        page_size: params.page_size,
    }
}

/// Order two records, equal keys fall back to ascending ID
fn compare(
    a: &AliasRecord,
    b: &AliasRecord,
    field: SortField,
    direction: SortDirection,
) -> Ordering {
    let ordering = match field {
        SortField::Email => a.email.cmp(&b.email),
        SortField::Service => a.service.cmp(&b.service),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
        SortField::Created => a.created.cmp(&b.created),
    };

    let ordering = match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    };

    ordering.then_with(|| a.id.cmp(&b.id))
}
