//! Synchronous client core for the job application tracker.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `TrackerClient` is stateless — it holds only `base_url`. Each of the
//!   four REST operations (list/filter, create, update, delete) is split into
//!   `build_*` (produces request) and `parse_*` (consumes response), so the
//!   I/O boundary is explicit.
//! - `AppState` is the controller: filter, draft and row list live there, and
//!   its `begin_*`/`complete_*` methods encode the re-fetch-after-mutation
//!   contract, including the stale-reload guard.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod state;
pub mod types;

pub use client::TrackerClient;
pub use error::{ApiError, DraftError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use state::{AppState, LoadToken};
pub use types::{
    Application, Draft, ListFilter, NewApplication, Status, UpdateApplication, WorkMode,
};
