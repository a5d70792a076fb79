//! In-memory stand-in for the tracker's FastAPI backend.
//!
//! Mirrors the real server's observable behavior so the client core can be
//! exercised end-to-end: id-descending list order, exact-match status/city
//! filters, a trimmed case-insensitive `q` substring search, POST answered
//! with a plain 200, skip-null partial updates, 404s carrying the `detail`
//! body and the JSON delete acknowledgement. `status` and `work_mode` stay
//! plain strings here, exactly as loose as the backend's table columns.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub company: String,
    pub role_title: String,
    pub city: Option<String>,
    pub work_mode: String,
    pub status: String,
    pub date_applied: Option<NaiveDate>,
    pub last_follow_up: Option<NaiveDate>,
    pub next_action_date: Option<NaiveDate>,
    pub job_link: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateApplication {
    pub company: String,
    pub role_title: String,
    pub city: Option<String>,
    #[serde(default = "default_work_mode")]
    pub work_mode: String,
    #[serde(default = "default_status")]
    pub status: String,
    pub date_applied: Option<NaiveDate>,
    pub last_follow_up: Option<NaiveDate>,
    pub next_action_date: Option<NaiveDate>,
    pub job_link: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
}

fn default_work_mode() -> String {
    "Hybrid".to_string()
}

fn default_status() -> String {
    "Applied".to_string()
}

#[derive(Deserialize)]
pub struct UpdateApplication {
    pub company: Option<String>,
    pub role_title: Option<String>,
    pub city: Option<String>,
    pub work_mode: Option<String>,
    pub status: Option<String>,
    pub date_applied: Option<NaiveDate>,
    pub last_follow_up: Option<NaiveDate>,
    pub next_action_date: Option<NaiveDate>,
    pub job_link: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub status: Option<String>,
    pub city: Option<String>,
}

/// In-memory store. The `BTreeMap` keeps rows id-ordered so listing newest
/// first is a reverse walk, like the backend's `ORDER BY id DESC`.
#[derive(Default)]
pub struct Store {
    next_id: i64,
    rows: BTreeMap<i64, Application>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db = Db::default();
    Router::new()
        .route("/health", get(health))
        .route(
            "/applications",
            get(list_applications).post(create_application),
        )
        .route(
            "/applications/{id}",
            put(update_application).delete(delete_application),
        )
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

async fn list_applications(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Application>> {
    let store = db.read().await;
    let rows = store
        .rows
        .values()
        .rev()
        .filter(|row| matches_filters(row, &params))
        .cloned()
        .collect();
    Json(rows)
}

/// Mirror the backend's WHERE clauses: exact match on status and city, a
/// trimmed case-insensitive substring match for `q` across company, role
/// title and city. Empty parameters disable a filter, like absent ones.
///
/// One divergence: the backend feeds `q` into SQL `LIKE`, where `%` and `_`
/// act as wildcards; here they only match themselves.
fn matches_filters(row: &Application, params: &ListParams) -> bool {
    if let Some(status) = params.status.as_deref().filter(|s| !s.is_empty()) {
        if row.status != status {
            return false;
        }
    }
    if let Some(city) = params.city.as_deref().filter(|c| !c.is_empty()) {
        if row.city.as_deref() != Some(city) {
            return false;
        }
    }
    if let Some(q) = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        let needle = q.to_ascii_lowercase();
        let hit = [Some(row.company.as_str()), Some(row.role_title.as_str()), row.city.as_deref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_ascii_lowercase().contains(&needle));
        if !hit {
            return false;
        }
    }
    true
}

async fn create_application(
    State(db): State<Db>,
    Json(input): Json<CreateApplication>,
) -> Json<Application> {
    let mut store = db.write().await;
    store.next_id += 1;
    let row = Application {
        id: store.next_id,
        company: input.company,
        role_title: input.role_title,
        city: input.city,
        work_mode: input.work_mode,
        status: input.status,
        date_applied: input.date_applied,
        last_follow_up: input.last_follow_up,
        next_action_date: input.next_action_date,
        job_link: input.job_link,
        contact_name: input.contact_name,
        contact_email: input.contact_email,
        notes: input.notes,
    };
    store.rows.insert(row.id, row.clone());
    // The real backend answers POST with its default 200, not 201.
    Json(row)
}

/// 404 with the JSON detail body the backend's `HTTPException` answers.
fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": "Application not found" })),
    )
}

async fn update_application(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(patch): Json<UpdateApplication>,
) -> Result<Json<Application>, (StatusCode, Json<serde_json::Value>)> {
    let mut store = db.write().await;
    let row = store.rows.get_mut(&id).ok_or_else(not_found)?;

    // Omitted and null fields alike are skipped; a field cannot be cleared
    // through PUT, matching the backend's exclude-unset + non-null rule.
    if let Some(company) = patch.company {
        row.company = company;
    }
    if let Some(role_title) = patch.role_title {
        row.role_title = role_title;
    }
    if let Some(city) = patch.city {
        row.city = Some(city);
    }
    if let Some(work_mode) = patch.work_mode {
        row.work_mode = work_mode;
    }
    if let Some(status) = patch.status {
        row.status = status;
    }
    if let Some(date_applied) = patch.date_applied {
        row.date_applied = Some(date_applied);
    }
    if let Some(last_follow_up) = patch.last_follow_up {
        row.last_follow_up = Some(last_follow_up);
    }
    if let Some(next_action_date) = patch.next_action_date {
        row.next_action_date = Some(next_action_date);
    }
    if let Some(job_link) = patch.job_link {
        row.job_link = Some(job_link);
    }
    if let Some(contact_name) = patch.contact_name {
        row.contact_name = Some(contact_name);
    }
    if let Some(contact_email) = patch.contact_email {
        row.contact_email = Some(contact_email);
    }
    if let Some(notes) = patch.notes {
        row.notes = Some(notes);
    }

    Ok(Json(row.clone()))
}

async fn delete_application(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let mut store = db.write().await;
    store
        .rows
        .remove(&id)
        .map(|_| Json(json!({ "deleted": true, "id": id })))
        .ok_or_else(not_found)
}
