//! Domain DTOs for the tracker API.
//!
//! # Design
//! These types mirror the backend's schema but are defined independently of
//! the mock-server crate; integration tests catch schema drift between the
//! two. The backend stores `status` and `work_mode` as plain strings with no
//! enum check, so the strict enums here are the client's own discipline: a
//! loaded record always carries exactly one status from the fixed set.
//!
//! `last_follow_up`, `next_action_date`, `contact_name` and `contact_email`
//! exist in the backend's table but have no form input; they ride along as
//! optional pass-through fields so programmatic callers can still set them.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DraftError;

/// Pipeline status of an application. Serializes as the exact variant name,
/// which is also the wire string the backend stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Applied,
    Screen,
    Interview,
    Offer,
    Rejected,
}

impl Status {
    /// Every status in pipeline order. Drives select/option lists in hosts.
    pub const ALL: [Status; 5] = [
        Status::Applied,
        Status::Screen,
        Status::Interview,
        Status::Offer,
        Status::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Applied => "Applied",
            Status::Screen => "Screen",
            Status::Interview => "Interview",
            Status::Offer => "Offer",
            Status::Rejected => "Rejected",
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Applied
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "applied" => Ok(Status::Applied),
            "screen" => Ok(Status::Screen),
            "interview" => Ok(Status::Interview),
            "offer" => Ok(Status::Offer),
            "rejected" => Ok(Status::Rejected),
            other => Err(format!(
                "unknown status '{other}' (expected Applied, Screen, Interview, Offer or Rejected)"
            )),
        }
    }
}

/// Where the work happens. Serializes as the exact variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkMode {
    Remote,
    Hybrid,
    Onsite,
}

impl WorkMode {
    pub const ALL: [WorkMode; 3] = [WorkMode::Remote, WorkMode::Hybrid, WorkMode::Onsite];

    pub fn as_str(self) -> &'static str {
        match self {
            WorkMode::Remote => "Remote",
            WorkMode::Hybrid => "Hybrid",
            WorkMode::Onsite => "Onsite",
        }
    }
}

impl Default for WorkMode {
    fn default() -> Self {
        WorkMode::Hybrid
    }
}

impl fmt::Display for WorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "remote" => Ok(WorkMode::Remote),
            "hybrid" => Ok(WorkMode::Hybrid),
            "onsite" => Ok(WorkMode::Onsite),
            other => Err(format!(
                "unknown work mode '{other}' (expected Remote, Hybrid or Onsite)"
            )),
        }
    }
}

/// A single application record returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Application {
    pub id: i64,
    pub company: String,
    pub role_title: String,
    pub city: Option<String>,
    pub work_mode: WorkMode,
    pub status: Status,
    pub date_applied: Option<NaiveDate>,
    pub job_link: Option<String>,
    pub notes: Option<String>,
    pub last_follow_up: Option<NaiveDate>,
    pub next_action_date: Option<NaiveDate>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
}

/// Request payload for creating a new application. The server assigns the id.
///
/// The form-derived fields always serialize — empty optionals as an explicit
/// JSON `null`, exactly what the web form sent — while the pass-through
/// backend fields are omitted from the body unless set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewApplication {
    pub company: String,
    pub role_title: String,
    pub city: Option<String>,
    #[serde(default)]
    pub work_mode: WorkMode,
    #[serde(default)]
    pub status: Status,
    pub date_applied: Option<NaiveDate>,
    pub job_link: Option<String>,
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_follow_up: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_action_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

/// Request payload for partially updating an application. Only the fields
/// present in the JSON are applied; omitted fields remain unchanged on the
/// server. `Default` is the empty patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateApplication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_mode: Option<WorkMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_applied: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_follow_up: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_action_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

impl UpdateApplication {
    /// The status-only patch issued by the quick status selector.
    pub fn status_only(status: Status) -> Self {
        UpdateApplication {
            status: Some(status),
            ..UpdateApplication::default()
        }
    }
}

/// Optional narrowing of the list operation.
///
/// `None` and the empty string both mean "omit this parameter from the query
/// string entirely"; the server treats absent and empty alike as no filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Substring match across company, role title and city.
    pub q: Option<String>,
    /// Exact status match.
    pub status: Option<Status>,
    /// Exact city match.
    pub city: Option<String>,
}

/// The in-progress new-application form.
///
/// Text inputs stay raw `String`s (the date included) until submission;
/// `to_payload` validates and normalizes in one step. `Default` is the
/// documented form reset: work mode Hybrid, status Applied, all else empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub company: String,
    pub role_title: String,
    pub city: String,
    pub work_mode: WorkMode,
    pub status: Status,
    pub date_applied: String,
    pub job_link: String,
    pub notes: String,
}

impl Draft {
    /// Validate the draft and normalize it into a create payload.
    ///
    /// Company and role title must be non-empty after trimming; a non-empty
    /// date must parse as `YYYY-MM-DD`. Empty optional fields become `None`
    /// so they serialize as `null`, never as `""`. Field values are sent
    /// verbatim otherwise — trimming is the server's business.
    pub fn to_payload(&self) -> Result<NewApplication, DraftError> {
        if self.company.trim().is_empty() || self.role_title.trim().is_empty() {
            return Err(DraftError::MissingRequiredFields);
        }

        let date_applied = match self.date_applied.trim() {
            "" => None,
            raw => Some(
                raw.parse::<NaiveDate>()
                    .map_err(|_| DraftError::InvalidDateApplied)?,
            ),
        };

        Ok(NewApplication {
            company: self.company.clone(),
            role_title: self.role_title.clone(),
            city: none_if_empty(&self.city),
            work_mode: self.work_mode,
            status: self.status,
            date_applied,
            job_link: none_if_empty(&self.job_link),
            notes: none_if_empty(&self.notes),
            last_follow_up: None,
            next_action_date: None,
            contact_name: None,
            contact_email: None,
        })
    }
}

fn none_if_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
