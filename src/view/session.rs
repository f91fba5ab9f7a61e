use std::sync::atomic::{AtomicU64, Ordering};

use super::{derive, Dashboard, ListView, SortDirection, SortKey, ViewState};
use crate::models::ProjectRecord;
use crate::services::{ProjectStore, StoreError};

/// Hands out increasing tickets so a slow response can be told apart from the
/// newest one.
#[derive(Debug, Default)]
pub struct FetchSequencer {
    latest: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchSequencer {
    pub fn issue(&self) -> FetchTicket {
        FetchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, ticket: FetchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// UI-side owner of the list page state.
///
/// Holds the only mutable copy of the [`ViewState`] and the last accepted
/// record set. Fetch results are applied only if their ticket is the latest.
#[derive(Debug, Default)]
pub struct ListSession {
    state: ViewState,
    records: Vec<ProjectRecord>,
    notice: Option<String>,
    sequencer: FetchSequencer,
}

impl ListSession {
    pub fn new(state: ViewState) -> Self {
        Self {
            state,
            ..Default::default()
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Replaces the view state. Returns true when the change needs a refetch,
    /// i.e. the server-side ordering changed.
    pub fn set_state(&mut self, state: ViewState) -> bool {
        let refetch = state.sort != self.state.sort || state.direction != self.state.direction;
        self.state = state;
        refetch
    }

    pub fn begin_fetch(&self) -> FetchTicket {
        self.sequencer.issue()
    }

    /// Applies a fetch result. Stale results are dropped and `false` is returned.
    ///
    /// A failed fetch empties the list and leaves a notice for the user.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<ProjectRecord>, StoreError>,
    ) -> bool {
        if !self.sequencer.is_latest(ticket) {
            tracing::debug!(?ticket, "discarding stale project fetch");
            return false;
        }
        match result {
            Ok(records) => {
                self.records = records;
                self.notice = None;
            }
            Err(err) => {
                tracing::error!(error = %err, "error fetching projects");
                self.records.clear();
                self.notice = Some(format!("Could not load projects: {err}"));
            }
        }
        true
    }

    /// Fetches and applies in one step.
    ///
    /// Holding `&mut self` across the fetch means two refreshes on the same
    /// session never overlap. Callers that run fetches concurrently use
    /// [`begin_fetch`](Self::begin_fetch) and
    /// [`complete_fetch`](Self::complete_fetch) instead.
    pub async fn refresh(&mut self, store: &dyn ProjectStore) -> bool {
        let ticket = self.begin_fetch();
        let result = store.fetch_all(self.state.sort, self.state.direction).await;
        self.complete_fetch(ticket, result)
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn view(&self) -> ListView {
        derive(self.records.clone(), &self.state)
    }
}

/// Loads the dashboard from entries newest first.
///
/// A failed fetch yields an empty dashboard and a notice.
pub async fn load_dashboard(store: &dyn ProjectStore) -> (Dashboard, Option<String>) {
    match store.fetch_all(SortKey::EntryDate, SortDirection::Desc).await {
        Ok(records) => (Dashboard::from_records(records), None),
        Err(err) => {
            tracing::error!(error = %err, "error fetching projects for stats");
            (
                Dashboard::default(),
                Some("Dashboard data could not be loaded".to_string()),
            )
        }
    }
}
