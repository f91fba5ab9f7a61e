//! Pure list-view derivation: search, filters, ordering and summary tiles
//! computed from the full set of project records.

mod filter;
mod session;
mod sort;
mod summary;

pub use filter::{distinct_values, matches_search, Filters};
pub use session::{load_dashboard, FetchSequencer, FetchTicket, ListSession};
pub use sort::{sort_records, SortDirection, SortKey, UnknownSortDirection, UnknownSortKey};
pub use summary::{Dashboard, ProjectStatus, RECENT_LIMIT, RecentProject, Summary};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::ProjectRecord;

/// Everything the user controls on the list page.
///
/// Treated as a value: callers build a new state instead of mutating one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ViewState {
    pub search: String,
    pub filters: Filters,
    pub sort: SortKey,
    pub direction: SortDirection,
}

impl ViewState {
    pub fn with_search(&self, search: impl Into<String>) -> Self {
        ViewState {
            search: search.into(),
            ..self.clone()
        }
    }

    pub fn with_filters(&self, filters: Filters) -> Self {
        ViewState {
            filters,
            ..self.clone()
        }
    }

    /// Picking the current column flips the direction; a new column starts descending.
    pub fn with_sort(&self, sort: SortKey) -> Self {
        let direction = if sort == self.sort {
            self.direction.flipped()
        } else {
            SortDirection::Desc
        };
        ViewState {
            sort,
            direction,
            ..self.clone()
        }
    }

    pub fn with_direction(&self, direction: SortDirection) -> Self {
        ViewState {
            direction,
            ..self.clone()
        }
    }

    pub fn is_visible(&self, record: &ProjectRecord) -> bool {
        matches_search(record, &self.search) && self.filters.matches(record)
    }
}

/// What the list page renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ListView {
    /// Records passing search and filters, in the requested order.
    pub projects: Vec<ProjectRecord>,
    /// Options for the client filter.
    pub clients: Vec<String>,
    /// Options for the Revit version filter.
    pub revit_versions: Vec<String>,
    pub summary: Summary,
}

/// Derives the list page from the full record set.
pub fn derive(mut records: Vec<ProjectRecord>, state: &ViewState) -> ListView {
    let summary = Summary::from_records(&records);
    let clients = distinct_values(records.iter().map(|r| r.client.as_deref()));
    let revit_versions = distinct_values(records.iter().map(|r| r.revit_version.as_deref()));

    sort_records(&mut records, state.sort, state.direction);
    records.retain(|r| state.is_visible(r));

    ListView {
        projects: records,
        clients,
        revit_versions,
        summary,
    }
}
