//! Error types for the tracker API client.
//!
//! # Design
//! `ApiError` is the single request-failure signal: a mutation or list call
//! either succeeded with a parseable 2xx response or it failed with one of
//! these variants. `NotFound` gets a dedicated variant because callers
//! frequently distinguish "the record does not exist" from "the server
//! returned an unexpected status." All other non-2xx responses land in
//! `HttpError` with the raw status code and body for debugging — the body is
//! never parsed for structure on the failure path.
//!
//! `DraftError` is the separate, purely client-side kind: a draft that fails
//! local validation never produces a request at all.

use std::fmt;

/// Errors returned by `TrackerClient` parse methods and surfaced by hosts.
#[derive(Debug)]
pub enum ApiError {
    /// The host could not complete the HTTP round-trip (DNS, refused
    /// connection, broken pipe). Carries the transport's own message.
    TransportError(String),

    /// The server returned 404 — the requested application does not exist.
    NotFound,

    /// The server returned a non-2xx status other than 404.
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::TransportError(msg) => write!(f, "{msg}"),
            ApiError::NotFound => write!(f, "application not found"),
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Local validation failures for the new-application draft.
///
/// These never reach the wire: `AppState::submit_draft` records the message
/// in its error slot and skips the create call entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    /// Company or role title is empty after trimming.
    MissingRequiredFields,

    /// A non-empty date field does not parse as an ISO `YYYY-MM-DD` date.
    InvalidDateApplied,
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::MissingRequiredFields => {
                write!(f, "Company and Role Title are required.")
            }
            DraftError::InvalidDateApplied => {
                write!(f, "Date applied must be a YYYY-MM-DD date.")
            }
        }
    }
}

impl std::error::Error for DraftError {}
