// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pointage_persistence::Persistence;

use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{
    CreateEntryRequest, EntryInfo, EntryListResponse, EntryPayload, EntryResponse,
    SetEntryStatusRequest, UpdateEntryRequest,
};
use crate::tests::helpers::{
    admin_actor, collaborator_actor, complete_payload, draft_entry, responsible_actor,
    seeded_persistence, submitted_entry_id, test_cause,
};

#[test]
fn test_create_entry_returns_a_draft() {
    let mut persistence: Persistence = seeded_persistence();

    let entry: EntryInfo = draft_entry(&mut persistence);

    assert!(entry.id.is_some());
    assert_eq!(entry.status, "draft");
    assert_eq!(entry.user_id, "u1");
    assert_eq!(entry.week_label, "2024-W02");
    assert_eq!(entry.payload.heures_passees, "8");
    assert!(entry.submitted_at.is_none());
}

#[test]
fn test_create_entry_requires_a_complete_payload() {
    let mut persistence: Persistence = seeded_persistence();
    let payload: EntryPayload = EntryPayload {
        libelle: String::new(),
        ..complete_payload()
    };

    let result: Result<EntryResponse, ApiError> = handlers::create_entry(
        &mut persistence,
        CreateEntryRequest {
            user_id: String::from("u1"),
            date_pointage: String::from("2024-01-08"),
            payload,
        },
        &collaborator_actor(),
        test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "libelle"
    ));
}

#[test]
fn test_create_entry_rejects_a_malformed_date() {
    let mut persistence: Persistence = seeded_persistence();

    let result: Result<EntryResponse, ApiError> = handlers::create_entry(
        &mut persistence,
        CreateEntryRequest {
            user_id: String::from("u1"),
            date_pointage: String::from("08/01/2024"),
            payload: complete_payload(),
        },
        &collaborator_actor(),
        test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "date_pointage"
    ));
}

#[test]
fn test_update_draft_entry_replaces_the_payload() {
    let mut persistence: Persistence = seeded_persistence();
    let entry: EntryInfo = draft_entry(&mut persistence);
    let payload: EntryPayload = EntryPayload {
        heures_passees: String::from("7.5"),
        ..complete_payload()
    };

    let response: EntryResponse = handlers::update_entry(
        &mut persistence,
        UpdateEntryRequest {
            entry_id: entry.id.unwrap(),
            payload,
        },
        &collaborator_actor(),
        test_cause(),
    )
    .unwrap();

    assert_eq!(response.entry.payload.heures_passees, "7.5");
    let stored: EntryInfo = handlers::get_entry(
        &mut persistence,
        entry.id.unwrap(),
        &collaborator_actor(),
    )
    .unwrap();
    assert_eq!(stored.payload.heures_passees, "7.5");
}

#[test]
fn test_update_is_refused_once_submitted() {
    let mut persistence: Persistence = seeded_persistence();
    let entry_id: i64 = submitted_entry_id(&mut persistence);

    let result: Result<EntryResponse, ApiError> = handlers::update_entry(
        &mut persistence,
        UpdateEntryRequest {
            entry_id,
            payload: complete_payload(),
        },
        &collaborator_actor(),
        test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { rule, .. }) if rule == "entry_locked"
    ));
}

#[test]
fn test_submit_is_one_way() {
    let mut persistence: Persistence = seeded_persistence();
    let entry_id: i64 = submitted_entry_id(&mut persistence);

    let result: Result<EntryResponse, ApiError> =
        handlers::submit_entry(&mut persistence, entry_id, &collaborator_actor(), test_cause());

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { rule, .. }) if rule == "entry_lifecycle"
    ));
}

#[test]
fn test_validation_records_the_validator() {
    let mut persistence: Persistence = seeded_persistence();
    let entry_id: i64 = submitted_entry_id(&mut persistence);

    let response: EntryResponse = handlers::set_entry_status(
        &mut persistence,
        SetEntryStatusRequest {
            entry_id,
            status: String::from("validated"),
        },
        &responsible_actor(),
        test_cause(),
    )
    .unwrap();

    assert_eq!(response.entry.status, "validated");
    assert_eq!(response.entry.validated_by, Some(String::from("r1")));
    assert!(response.entry.validated_at.is_some());
}

#[test]
fn test_unknown_status_string_is_invalid() {
    let mut persistence: Persistence = seeded_persistence();
    let entry_id: i64 = submitted_entry_id(&mut persistence);

    let result: Result<EntryResponse, ApiError> = handlers::set_entry_status(
        &mut persistence,
        SetEntryStatusRequest {
            entry_id,
            status: String::from("done"),
        },
        &responsible_actor(),
        test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "status"
    ));
}

#[test]
fn test_delete_hides_then_restore_recovers() {
    let mut persistence: Persistence = seeded_persistence();
    let entry: EntryInfo = draft_entry(&mut persistence);
    let entry_id: i64 = entry.id.unwrap();

    let _ = handlers::delete_entry(&mut persistence, entry_id, &collaborator_actor(), test_cause())
        .unwrap();
    let hidden: EntryListResponse =
        handlers::list_entries(&mut persistence, "u1", &collaborator_actor()).unwrap();
    assert!(hidden.entries.is_empty());

    let restored: EntryResponse = handlers::restore_entry(
        &mut persistence,
        entry_id,
        &collaborator_actor(),
        test_cause(),
    )
    .unwrap();
    assert!(!restored.entry.is_deleted);

    let listed: EntryListResponse =
        handlers::list_entries(&mut persistence, "u1", &collaborator_actor()).unwrap();
    assert_eq!(listed.entries.len(), 1);
}

#[test]
fn test_delete_of_a_submitted_entry_is_admin_only() {
    let mut persistence: Persistence = seeded_persistence();
    let entry_id: i64 = submitted_entry_id(&mut persistence);

    let result: Result<EntryResponse, ApiError> =
        handlers::delete_entry(&mut persistence, entry_id, &collaborator_actor(), test_cause());

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { rule, .. }) if rule == "entry_locked"
    ));

    let deleted: EntryResponse =
        handlers::delete_entry(&mut persistence, entry_id, &admin_actor(), test_cause()).unwrap();
    assert!(deleted.entry.is_deleted);
}

#[test]
fn test_archive_flags_the_entry_without_hiding_it_from_get() {
    let mut persistence: Persistence = seeded_persistence();
    let entry: EntryInfo = draft_entry(&mut persistence);
    let entry_id: i64 = entry.id.unwrap();

    let archived: EntryResponse = handlers::archive_entry(
        &mut persistence,
        entry_id,
        &collaborator_actor(),
        test_cause(),
    )
    .unwrap();

    assert!(archived.entry.is_archived);
    let stored: EntryInfo =
        handlers::get_entry(&mut persistence, entry_id, &collaborator_actor()).unwrap();
    assert!(stored.is_archived);
}

#[test]
fn test_the_week_listing_scopes_to_one_week() {
    let mut persistence: Persistence = seeded_persistence();
    let entry: EntryInfo = draft_entry(&mut persistence);
    let _ = handlers::create_entry(
        &mut persistence,
        CreateEntryRequest {
            user_id: String::from("u1"),
            date_pointage: String::from("2024-01-15"),
            payload: complete_payload(),
        },
        &collaborator_actor(),
        test_cause(),
    )
    .unwrap();

    let week: EntryListResponse = handlers::list_entries_for_week(
        &mut persistence,
        "u1",
        "2024-W02",
        &collaborator_actor(),
    )
    .unwrap();

    assert_eq!(week.entries.len(), 1);
    assert_eq!(week.entries[0].id, entry.id);
    assert_eq!(week.entries[0].week_label, "2024-W02");
}

#[test]
fn test_get_unknown_entry_fails_not_found() {
    let mut persistence: Persistence = seeded_persistence();

    let result: Result<EntryInfo, ApiError> =
        handlers::get_entry(&mut persistence, 99, &collaborator_actor());

    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { resource_type, .. }) if resource_type == "entry"
    ));
}

#[test]
fn test_team_listing_shows_the_report_entries() {
    let mut persistence: Persistence = seeded_persistence();
    let _ = draft_entry(&mut persistence);

    let team: EntryListResponse =
        handlers::list_team_entries(&mut persistence, &responsible_actor()).unwrap();

    assert_eq!(team.entries.len(), 1);
    assert_eq!(team.entries[0].user_id, "u1");
}
