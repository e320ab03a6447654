// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use pointage_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use pointage_domain::{
    ConditionalList, ConditionalListItem, EntryFields, PointageEntry, User, UserRole,
};

use crate::Persistence;

pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
}

pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
}

pub fn complete_fields() -> EntryFields {
    EntryFields {
        clef_imputation: String::from("STR7.1.2"),
        libelle: String::from("UVR"),
        fonction: String::from("CPL"),
        date_besoin: String::from("2024-02-01"),
        heures_theoriques: String::from("8"),
        heures_passees: String::from("8"),
        commentaires: String::new(),
    }
}

pub fn test_entry(user_id: &str) -> PointageEntry {
    PointageEntry::new(user_id.to_string(), test_date(), complete_fields(), test_now())
}

pub fn test_event(action: &str, resource_type: &str, resource_id: &str) -> AuditEvent {
    AuditEvent::new(
        Actor::new(String::from("u1"), String::from("collaborator")),
        Cause::new(String::from("req-456"), String::from("User request")),
        Action::new(action.to_string(), None),
        StateSnapshot::new(String::from("null")),
        StateSnapshot::new(String::from("{}")),
        resource_type.to_string(),
        resource_id.to_string(),
    )
}

pub fn test_item(clef: &str, libelle: &str, fonction: &str) -> ConditionalListItem {
    ConditionalListItem::new(clef.to_string(), libelle.to_string(), fonction.to_string()).unwrap()
}

pub fn test_list(name: &str) -> ConditionalList {
    ConditionalList::new(
        name.to_string(),
        Some(String::from("reference codes")),
        vec![
            test_item("STR7.1.2", "UVR", "CPL"),
            test_item("STR8.0.1", "DEV", "ING"),
        ],
        test_now(),
    )
    .unwrap()
}

/// Creates an in-memory store seeded with a responsible `r1` and a
/// collaborator `u1` reporting to them.
pub fn seeded_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let responsible: User = User::new(
        String::from("r1"),
        String::from("Resp One"),
        String::from("r1@example.com"),
        UserRole::Responsible,
        None,
        test_now(),
    );
    let collaborator: User = User::new(
        String::from("u1"),
        String::from("Collab One"),
        String::from("u1@example.com"),
        UserRole::Collaborator,
        Some(String::from("r1")),
        test_now(),
    );
    persistence
        .create_user(&responsible, &test_event("CreateUser", "user", "r1"))
        .unwrap();
    persistence
        .create_user(&collaborator, &test_event("CreateUser", "user", "u1"))
        .unwrap();
    persistence
}
