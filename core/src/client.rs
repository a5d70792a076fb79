//! Stateless HTTP request builder and response parser for the tracker API.
//!
//! # Design
//! `TrackerClient` holds only a `base_url` and carries no mutable state
//! between calls. Each of the four REST operations is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! the core deterministic and free of I/O dependencies.
//!
//! Success is any 2xx status — the backend answers POST with a plain 200 and
//! DELETE with a JSON acknowledgement — so parse methods never pin an exact
//! code. Failures are signaled purely by status; the body is carried raw.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Application, ListFilter, NewApplication, UpdateApplication};

/// Synchronous, stateless client for the tracker API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct TrackerClient {
    base_url: String,
}

impl TrackerClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_applications(&self, filter: &ListFilter) -> HttpRequest {
        let mut path = format!("{}/applications", self.base_url);
        let query = build_query(filter);
        if !query.is_empty() {
            path.push('?');
            path.push_str(&query);
        }
        HttpRequest {
            method: HttpMethod::Get,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_application(
        &self,
        input: &NewApplication,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/applications", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_update_application(
        &self,
        id: i64,
        patch: &UpdateApplication,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(patch).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/applications/{id}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_application(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/applications/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_applications(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<Application>, ApiError> {
        check_success(&response)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_create_application(
        &self,
        response: HttpResponse,
    ) -> Result<Application, ApiError> {
        check_success(&response)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_update_application(
        &self,
        response: HttpResponse,
    ) -> Result<Application, ApiError> {
        check_success(&response)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// The backend acknowledges deletion with `{"deleted": true, "id": n}`;
    /// only the status matters here, so the body is ignored.
    pub fn parse_delete_application(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_success(&response)?;
        Ok(())
    }
}

/// Render the filter as query-string pairs in fixed (q, status, city) order.
/// Absent or empty fields are omitted entirely — never sent as `key=`.
fn build_query(filter: &ListFilter) -> String {
    let mut pairs: Vec<(&'static str, &str)> = Vec::new();
    if let Some(q) = filter.q.as_deref().filter(|v| !v.is_empty()) {
        pairs.push(("q", q));
    }
    if let Some(status) = filter.status {
        pairs.push(("status", status.as_str()));
    }
    if let Some(city) = filter.city.as_deref().filter(|v| !v.is_empty()) {
        pairs.push(("city", city));
    }

    pairs
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_success(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
