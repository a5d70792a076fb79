//! Controller state for the tracker UI.
//!
//! # Design
//! `AppState` owns the three pieces of UI state — the active filter, the
//! new-application draft and the last-loaded row list — plus a loading flag
//! and a single, overwritable error slot. Like the rest of the core it never
//! performs I/O: `begin_*`/`submit_*` methods return the `HttpRequest` the
//! host must execute, and `complete_*` methods consume the host's
//! `Result<HttpResponse, ApiError>` (an `Err` conveys a transport failure).
//!
//! The synchronization contract lives here: every successful mutation returns
//! the follow-up reload pair, so the row list is always replaced wholesale
//! from the server and never patched locally. Each reload carries a monotonic
//! `LoadToken`; a completion bearing a superseded token is dropped, so
//! overlapping reloads resolve deterministically in favor of the newest one.

use crate::client::TrackerClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Application, Draft, ListFilter, Status, UpdateApplication};

/// Identifies one issued reload. Hosts hand it back together with the
/// response so stale reloads can be told apart from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken {
    seq: u64,
}

/// Client-side state container driving the list/form UI.
pub struct AppState {
    client: TrackerClient,
    filter: ListFilter,
    draft: Draft,
    rows: Vec<Application>,
    loading: bool,
    error: Option<String>,
    load_seq: u64,
}

impl AppState {
    pub fn new(client: TrackerClient) -> Self {
        Self {
            client,
            filter: ListFilter::default(),
            draft: Draft::default(),
            rows: Vec::new(),
            loading: false,
            error: None,
            load_seq: 0,
        }
    }

    /// The last-loaded record list, newest first (server ordering).
    pub fn rows(&self) -> &[Application] {
        &self.rows
    }

    /// True while a reload is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// The most recent error message, if any. Overwritten by every action.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn filter(&self) -> &ListFilter {
        &self.filter
    }

    /// Edit the filter fields. Takes effect on the next `begin_load`.
    pub fn filter_mut(&mut self) -> &mut ListFilter {
        &mut self.filter
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Edit the form fields of the in-progress draft.
    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Distinct, sorted, non-empty city values of the loaded rows.
    ///
    /// Recomputed from the current list on every call; feeds the city filter
    /// option list, so it reflects whatever the server last returned.
    pub fn city_options(&self) -> Vec<String> {
        let cities: std::collections::BTreeSet<&str> = self
            .rows
            .iter()
            .filter_map(|row| row.city.as_deref())
            .filter(|city| !city.is_empty())
            .collect();
        cities.into_iter().map(str::to_string).collect()
    }

    /// Start a (re)load of the list for the current filter.
    ///
    /// Clears the error, raises the loading flag and supersedes any reload
    /// still in flight. Invoked directly by hosts on startup and when filters
    /// are applied; mutations trigger it through their `complete_*` methods.
    pub fn begin_load(&mut self) -> (LoadToken, HttpRequest) {
        self.error = None;
        self.loading = true;
        self.load_seq += 1;
        let token = LoadToken { seq: self.load_seq };
        (token, self.client.build_list_applications(&self.filter))
    }

    /// Feed back the outcome of a reload.
    ///
    /// A stale token — one superseded by a newer `begin_load` — is dropped
    /// without touching any state; the loading flag still belongs to the
    /// newer reload. Otherwise loading always clears: on success the row list
    /// is replaced wholesale, on failure the error slot records a message and
    /// the rows keep their prior value.
    pub fn complete_load(&mut self, token: LoadToken, result: Result<HttpResponse, ApiError>) {
        if token.seq != self.load_seq {
            return;
        }
        self.loading = false;
        match result.and_then(|response| self.client.parse_list_applications(response)) {
            Ok(rows) => self.rows = rows,
            Err(err) => self.error = Some(surface(err, "Failed to load applications")),
        }
    }

    /// Submit the draft as a new application.
    ///
    /// Local validation failures (missing company/role, malformed date) are
    /// recorded in the error slot and produce no request at all. On success
    /// the returned request carries the normalized payload — empty optional
    /// fields as `null`, never `""`.
    pub fn submit_draft(&mut self) -> Option<HttpRequest> {
        self.error = None;
        let payload = match self.draft.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                self.error = Some(err.to_string());
                return None;
            }
        };
        match self.client.build_create_application(&payload) {
            Ok(request) => Some(request),
            Err(err) => {
                self.error = Some(surface(err, "Failed to create application"));
                None
            }
        }
    }

    /// Feed back the create outcome. Success resets the draft to its defaults
    /// and returns the follow-up reload pair; failure records the error and
    /// keeps the draft for correction. No reload happens on failure.
    pub fn complete_create(
        &mut self,
        result: Result<HttpResponse, ApiError>,
    ) -> Option<(LoadToken, HttpRequest)> {
        match result.and_then(|response| self.client.parse_create_application(response)) {
            Ok(_created) => {
                self.draft = Draft::default();
                Some(self.begin_load())
            }
            Err(err) => {
                self.error = Some(surface(err, "Failed to create application"));
                None
            }
        }
    }

    /// Change one row's status (the table's quick selector).
    ///
    /// No optimistic update: the visible row changes only when the follow-up
    /// reload lands.
    pub fn begin_status_change(&mut self, id: i64, status: Status) -> Option<HttpRequest> {
        self.error = None;
        let patch = UpdateApplication::status_only(status);
        match self.client.build_update_application(id, &patch) {
            Ok(request) => Some(request),
            Err(err) => {
                self.error = Some(surface(err, "Failed to update application"));
                None
            }
        }
    }

    /// Feed back the status-change outcome; reload on success only.
    pub fn complete_status_change(
        &mut self,
        result: Result<HttpResponse, ApiError>,
    ) -> Option<(LoadToken, HttpRequest)> {
        match result.and_then(|response| self.client.parse_update_application(response)) {
            Ok(_updated) => Some(self.begin_load()),
            Err(err) => {
                self.error = Some(surface(err, "Failed to update application"));
                None
            }
        }
    }

    /// Remove one row by id.
    pub fn begin_delete(&mut self, id: i64) -> HttpRequest {
        self.error = None;
        self.client.build_delete_application(id)
    }

    /// Feed back the delete outcome; reload on success only.
    pub fn complete_delete(
        &mut self,
        result: Result<HttpResponse, ApiError>,
    ) -> Option<(LoadToken, HttpRequest)> {
        match result.and_then(|response| self.client.parse_delete_application(response)) {
            Ok(()) => Some(self.begin_load()),
            Err(err) => {
                self.error = Some(surface(err, "Failed to delete application"));
                None
            }
        }
    }
}

/// Flatten an `ApiError` into the message shown near the failed action.
///
/// HTTP-status failures collapse to the fixed per-action string — the body is
/// carried in the error for debugging but never surfaced to the UI — while
/// transport and decode failures keep their own message.
fn surface(err: ApiError, fallback: &str) -> String {
    match err {
        ApiError::HttpError { .. } | ApiError::NotFound => fallback.to_string(),
        other => other.to_string(),
    }
}
