// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::Duration;
use pointage_domain::{EntryStatus, PointageEntry};

use crate::Persistence;
use crate::tests::helpers::{seeded_persistence, test_entry, test_event, test_now};

fn created_entry(persistence: &mut Persistence) -> PointageEntry {
    persistence
        .create_entry(
            &test_entry("u1"),
            &test_event("CreateEntry", "entry", "new"),
        )
        .unwrap()
}

#[test]
fn test_create_entry_assigns_an_id() {
    let mut persistence: Persistence = seeded_persistence();

    let entry: PointageEntry = created_entry(&mut persistence);

    assert!(entry.id.is_some());
    let stored: PointageEntry = persistence.get_entry(entry.id.unwrap()).unwrap().unwrap();
    assert_eq!(stored, entry);
}

#[test]
fn test_get_unknown_entry_returns_none() {
    let mut persistence: Persistence = seeded_persistence();

    assert_eq!(persistence.get_entry(99).unwrap(), None);
}

#[test]
fn test_update_draft_entry_persists_the_payload() {
    let mut persistence: Persistence = seeded_persistence();
    let mut entry: PointageEntry = created_entry(&mut persistence);
    let entry_id: i64 = entry.id.unwrap();
    entry.fields.heures_passees = String::from("7.5");
    entry.updated_at = test_now() + Duration::hours(1);

    let rows: usize = persistence
        .update_draft_entry(
            entry_id,
            &entry,
            &test_event("UpdateEntry", "entry", &entry_id.to_string()),
        )
        .unwrap();

    assert_eq!(rows, 1);
    let stored: PointageEntry = persistence.get_entry(entry_id).unwrap().unwrap();
    assert_eq!(stored.fields.heures_passees, "7.5");
    assert_eq!(stored.updated_at, entry.updated_at);
}

#[test]
fn test_submit_entry_is_conditional_on_draft_status() {
    let mut persistence: Persistence = seeded_persistence();
    let mut entry: PointageEntry = created_entry(&mut persistence);
    let entry_id: i64 = entry.id.unwrap();
    entry.status = EntryStatus::Submitted;
    entry.submitted_at = Some(test_now());
    let event = test_event("SubmitEntry", "entry", &entry_id.to_string());

    let first: usize = persistence.submit_entry(entry_id, &entry, &event).unwrap();
    let second: usize = persistence.submit_entry(entry_id, &entry, &event).unwrap();

    assert_eq!(first, 1);
    // The stored row is no longer a draft, so the second write is a no-op.
    assert_eq!(second, 0);
    let stored: PointageEntry = persistence.get_entry(entry_id).unwrap().unwrap();
    assert_eq!(stored.status, EntryStatus::Submitted);
    assert_eq!(stored.submitted_at, Some(test_now()));
}

#[test]
fn test_update_draft_entry_is_a_noop_after_submission() {
    let mut persistence: Persistence = seeded_persistence();
    let mut entry: PointageEntry = created_entry(&mut persistence);
    let entry_id: i64 = entry.id.unwrap();
    entry.status = EntryStatus::Submitted;
    entry.submitted_at = Some(test_now());
    persistence
        .submit_entry(
            entry_id,
            &entry,
            &test_event("SubmitEntry", "entry", &entry_id.to_string()),
        )
        .unwrap();

    entry.fields.heures_passees = String::from("0");
    let rows: usize = persistence
        .update_draft_entry(
            entry_id,
            &entry,
            &test_event("UpdateEntry", "entry", &entry_id.to_string()),
        )
        .unwrap();

    assert_eq!(rows, 0);
    let stored: PointageEntry = persistence.get_entry(entry_id).unwrap().unwrap();
    assert_eq!(stored.fields.heures_passees, "8");
}

#[test]
fn test_overwrite_entry_records_the_validation() {
    let mut persistence: Persistence = seeded_persistence();
    let mut entry: PointageEntry = created_entry(&mut persistence);
    let entry_id: i64 = entry.id.unwrap();
    entry.status = EntryStatus::Validated;
    entry.validated_at = Some(test_now());
    entry.validated_by = Some(String::from("r1"));

    let rows: usize = persistence
        .overwrite_entry(
            entry_id,
            &entry,
            &test_event("SetEntryStatus", "entry", &entry_id.to_string()),
        )
        .unwrap();

    assert_eq!(rows, 1);
    let stored: PointageEntry = persistence.get_entry(entry_id).unwrap().unwrap();
    assert_eq!(stored.status, EntryStatus::Validated);
    assert_eq!(stored.validated_by, Some(String::from("r1")));
}

#[test]
fn test_soft_deleted_entries_are_excluded_from_listings() {
    let mut persistence: Persistence = seeded_persistence();
    let mut entry: PointageEntry = created_entry(&mut persistence);
    let entry_id: i64 = entry.id.unwrap();
    entry.is_deleted = true;

    persistence
        .set_entry_flags(
            entry_id,
            &entry,
            &test_event("DeleteEntry", "entry", &entry_id.to_string()),
        )
        .unwrap();

    assert!(persistence.list_entries_for_user("u1").unwrap().is_empty());
    // The stored row survives so a restore can find it.
    let stored: PointageEntry = persistence.get_entry(entry_id).unwrap().unwrap();
    assert!(stored.is_deleted);
}

#[test]
fn test_entries_are_listed_newest_pointage_date_first() {
    let mut persistence: Persistence = seeded_persistence();
    let mut older: PointageEntry = test_entry("u1");
    older.date_pointage = older.date_pointage.pred_opt().unwrap();
    persistence
        .create_entry(&older, &test_event("CreateEntry", "entry", "new"))
        .unwrap();
    let newer: PointageEntry = created_entry(&mut persistence);

    let listed: Vec<PointageEntry> = persistence.list_entries_for_user("u1").unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].date_pointage, newer.date_pointage);
    assert_eq!(listed[1].date_pointage, older.date_pointage);
}

#[test]
fn test_team_listing_spans_multiple_users() {
    let mut persistence: Persistence = seeded_persistence();
    let _ = created_entry(&mut persistence);

    let team: Vec<String> = vec![String::from("u1")];
    let listed: Vec<PointageEntry> = persistence.list_entries_for_users(&team).unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].user_id, "u1");
}
