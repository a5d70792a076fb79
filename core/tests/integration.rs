//! Full CRUD lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every core client
//! operation over real HTTP using ureq. Validates that the core's request
//! building and response parsing work end-to-end with the actual server.

mod common;

use common::{execute, start_server};
use jobtrack_core::{ApiError, ListFilter, NewApplication, Status, UpdateApplication, WorkMode};

fn minimal_application(company: &str, role_title: &str) -> NewApplication {
    NewApplication {
        company: company.to_string(),
        role_title: role_title.to_string(),
        city: None,
        work_mode: WorkMode::default(),
        status: Status::default(),
        date_applied: None,
        job_link: None,
        notes: None,
        last_follow_up: None,
        next_action_date: None,
        contact_name: None,
        contact_email: None,
    }
}

#[test]
fn crud_lifecycle() {
    let client = start_server();

    // Step 1: list — should be empty.
    let req = client.build_list_applications(&ListFilter::default());
    let rows = client.parse_list_applications(execute(req)).unwrap();
    assert!(rows.is_empty(), "expected empty list");

    // Step 2: create with a full payload.
    let mut input = minimal_application("Acme", "Platform Engineer");
    input.city = Some("Austin".to_string());
    input.date_applied = chrono::NaiveDate::from_ymd_opt(2024, 1, 15);
    input.notes = Some("referred by Sam".to_string());
    let req = client.build_create_application(&input).unwrap();
    let created = client.parse_create_application(execute(req)).unwrap();
    assert_eq!(created.company, "Acme");
    assert_eq!(created.status, Status::Applied);
    assert_eq!(created.work_mode, WorkMode::Hybrid);
    let first_id = created.id;

    // Step 3: create a second row; the list puts it first.
    let req = client
        .build_create_application(&minimal_application("Globex", "Data Engineer"))
        .unwrap();
    let second = client.parse_create_application(execute(req)).unwrap();
    assert!(second.id > first_id);

    let req = client.build_list_applications(&ListFilter::default());
    let rows = client.parse_list_applications(execute(req)).unwrap();
    assert_eq!(
        rows.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![second.id, first_id],
        "newest first"
    );

    // Step 4: status-only update leaves the rest of the row alone.
    let patch = UpdateApplication::status_only(Status::Interview);
    let req = client.build_update_application(first_id, &patch).unwrap();
    let updated = client.parse_update_application(execute(req)).unwrap();
    assert_eq!(updated.status, Status::Interview);
    assert_eq!(updated.company, "Acme");
    assert_eq!(updated.notes.as_deref(), Some("referred by Sam"));

    // Step 5: a second partial update keeps the first one's change.
    let patch = UpdateApplication {
        city: Some("Denver".to_string()),
        ..UpdateApplication::default()
    };
    let req = client.build_update_application(first_id, &patch).unwrap();
    let updated = client.parse_update_application(execute(req)).unwrap();
    assert_eq!(updated.city.as_deref(), Some("Denver"));
    assert_eq!(updated.status, Status::Interview);

    // Step 6: delete the second row.
    let req = client.build_delete_application(second.id);
    client.parse_delete_application(execute(req)).unwrap();

    let req = client.build_list_applications(&ListFilter::default());
    let rows = client.parse_list_applications(execute(req)).unwrap();
    assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![first_id]);

    // Step 7: mutations on the deleted id come back NotFound.
    let patch = UpdateApplication::status_only(Status::Offer);
    let req = client.build_update_application(second.id, &patch).unwrap();
    let err = client.parse_update_application(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    let req = client.build_delete_application(second.id);
    let err = client.parse_delete_application(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
}

#[test]
fn filters_round_trip() {
    let client = start_server();

    let mut austin = minimal_application("Acme", "Platform Engineer");
    austin.city = Some("Austin".to_string());
    let req = client.build_create_application(&austin).unwrap();
    let austin = client.parse_create_application(execute(req)).unwrap();

    let mut boston = minimal_application("Globex", "Data Engineer");
    boston.city = Some("Boston".to_string());
    boston.status = Status::Screen;
    let req = client.build_create_application(&boston).unwrap();
    let boston = client.parse_create_application(execute(req)).unwrap();

    // q matches company, role title and city, case-insensitively and trimmed.
    let filter = ListFilter {
        q: Some("  ENGINEER ".to_string()),
        ..ListFilter::default()
    };
    let req = client.build_list_applications(&filter);
    let rows = client.parse_list_applications(execute(req)).unwrap();
    assert_eq!(rows.len(), 2);

    let filter = ListFilter {
        q: Some("globex".to_string()),
        ..ListFilter::default()
    };
    let req = client.build_list_applications(&filter);
    let rows = client.parse_list_applications(execute(req)).unwrap();
    assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![boston.id]);

    // Exact status and city narrowing.
    let filter = ListFilter {
        status: Some(Status::Screen),
        ..ListFilter::default()
    };
    let req = client.build_list_applications(&filter);
    let rows = client.parse_list_applications(execute(req)).unwrap();
    assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![boston.id]);

    let filter = ListFilter {
        city: Some("Austin".to_string()),
        status: Some(Status::Applied),
        ..ListFilter::default()
    };
    let req = client.build_list_applications(&filter);
    let rows = client.parse_list_applications(execute(req)).unwrap();
    assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![austin.id]);

    // No matches is an empty list, not an error.
    let filter = ListFilter {
        q: Some("no such company".to_string()),
        ..ListFilter::default()
    };
    let req = client.build_list_applications(&filter);
    let rows = client.parse_list_applications(execute(req)).unwrap();
    assert!(rows.is_empty());
}
