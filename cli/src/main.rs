//! Command-line host for the tracker core.
//!
//! Drives `AppState` exactly as a UI would: every command funnels through the
//! begin/complete pairs, mutations run their follow-up reload, and whatever
//! lands in the error slot becomes the process error. The only IO here is
//! executing the requests the core hands out.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use jobtrack_core::{
    ApiError, AppState, Application, HttpMethod, HttpRequest, HttpResponse, LoadToken, Status,
    TrackerClient, WorkMode,
};

#[derive(Parser)]
#[command(name = "jobtrack")]
#[command(about = "Track job applications from the terminal")]
struct Cli {
    /// Base URL of the tracker API
    #[arg(long, global = true, default_value = "http://127.0.0.1:8000")]
    api: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List applications
    List {
        /// Search company, role title and city
        #[arg(short, long)]
        query: Option<String>,

        /// Filter by status (Applied, Screen, Interview, Offer, Rejected)
        #[arg(short, long)]
        status: Option<Status>,

        /// Filter by exact city
        #[arg(short, long)]
        city: Option<String>,
    },

    /// Add an application
    Add {
        /// Company name
        #[arg(long)]
        company: String,

        /// Role title
        #[arg(long)]
        role: String,

        /// City
        #[arg(long)]
        city: Option<String>,

        /// Work mode (Remote, Hybrid, Onsite)
        #[arg(long)]
        work_mode: Option<WorkMode>,

        /// Status (Applied, Screen, Interview, Offer, Rejected)
        #[arg(long)]
        status: Option<Status>,

        /// Date applied, YYYY-MM-DD
        #[arg(long)]
        date_applied: Option<String>,

        /// Link to the posting
        #[arg(long)]
        link: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Change an application's status
    SetStatus {
        /// Application ID
        id: i64,

        /// New status (Applied, Screen, Interview, Offer, Rejected)
        status: Status,
    },

    /// Delete an application
    Delete {
        /// Application ID
        id: i64,
    },

    /// List the distinct cities on file
    Cities,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut state = AppState::new(TrackerClient::new(&cli.api));

    match cli.command {
        Commands::List {
            query,
            status,
            city,
        } => {
            let filter = state.filter_mut();
            filter.q = query;
            filter.status = status;
            filter.city = city;
            reload(&mut state)?;
            print_table(state.rows());
        }

        Commands::Add {
            company,
            role,
            city,
            work_mode,
            status,
            date_applied,
            link,
            notes,
        } => {
            let draft = state.draft_mut();
            draft.company = company;
            draft.role_title = role;
            draft.city = city.unwrap_or_default();
            if let Some(mode) = work_mode {
                draft.work_mode = mode;
            }
            if let Some(status) = status {
                draft.status = status;
            }
            draft.date_applied = date_applied.unwrap_or_default();
            draft.job_link = link.unwrap_or_default();
            draft.notes = notes.unwrap_or_default();

            let Some(request) = state.submit_draft() else {
                return surface_error(&state);
            };
            let follow_up = state.complete_create(execute(request));
            finish(&mut state, follow_up)?;

            // The reload lists newest first, so the new row is on top.
            if let Some(row) = state.rows().first() {
                println!("Added #{}: {} at {}", row.id, row.role_title, row.company);
            }
            print_table(state.rows());
        }

        Commands::SetStatus { id, status } => {
            let Some(request) = state.begin_status_change(id, status) else {
                return surface_error(&state);
            };
            let follow_up = state.complete_status_change(execute(request));
            finish(&mut state, follow_up)?;
            println!("Application #{id} is now {status}.");
            print_table(state.rows());
        }

        Commands::Delete { id } => {
            let request = state.begin_delete(id);
            let follow_up = state.complete_delete(execute(request));
            finish(&mut state, follow_up)?;
            println!("Deleted application #{id}.");
            print_table(state.rows());
        }

        Commands::Cities => {
            reload(&mut state)?;
            let cities = state.city_options();
            if cities.is_empty() {
                println!("No cities on file.");
            } else {
                for city in cities {
                    println!("{city}");
                }
            }
        }
    }

    Ok(())
}

/// Execute a request with ureq. 4xx/5xx come back as plain responses so the
/// core interprets statuses itself; only transport failures become errors.
fn execute(request: HttpRequest) -> Result<HttpResponse, ApiError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (request.method, request.body) {
        (HttpMethod::Get, _) => agent.get(&request.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&request.path).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&request.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&request.path).send_empty(),
        (HttpMethod::Put, Some(body)) => agent
            .put(&request.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Put, None) => agent.put(&request.path).send_empty(),
    }
    .map_err(|err| ApiError::TransportError(err.to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|err| ApiError::TransportError(err.to_string()))?;

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}

/// Run a load to completion for the current filter.
fn reload(state: &mut AppState) -> Result<()> {
    let (token, request) = state.begin_load();
    state.complete_load(token, execute(request));
    surface_error(state)
}

/// Finish a mutation: run the follow-up reload when one was handed out, then
/// surface whatever error the round left behind.
fn finish(state: &mut AppState, follow_up: Option<(LoadToken, HttpRequest)>) -> Result<()> {
    if let Some((token, request)) = follow_up {
        state.complete_load(token, execute(request));
    }
    surface_error(state)
}

fn surface_error(state: &AppState) -> Result<()> {
    match state.error() {
        Some(message) => bail!("{message}"),
        None => Ok(()),
    }
}

fn print_table(rows: &[Application]) {
    if rows.is_empty() {
        println!("No applications found.");
        return;
    }
    println!(
        "{:<6} {:<20} {:<26} {:<14} {:<8} {:<10} {:<10}",
        "ID", "COMPANY", "ROLE", "CITY", "MODE", "STATUS", "APPLIED"
    );
    println!("{}", "-".repeat(100));
    for row in rows {
        let applied = row
            .date_applied
            .map(|date| date.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<6} {:<20} {:<26} {:<14} {:<8} {:<10} {:<10}",
            row.id,
            truncate(&row.company, 18),
            truncate(&row.role_title, 24),
            truncate(row.city.as_deref().unwrap_or("-"), 12),
            row.work_mode.as_str(),
            row.status.as_str(),
            applied
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        // Cut on a char boundary; a byte offset can land inside multibyte text.
        let end = s
            .char_indices()
            .nth(max.saturating_sub(3))
            .map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}
