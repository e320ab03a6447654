// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for the API handler tests.

use pointage_audit::Cause;
use pointage_domain::UserRole;
use pointage_persistence::Persistence;

use crate::auth::AuthenticatedActor;
use crate::handlers;
use crate::request_response::{
    CreateEntryRequest, CreateListRequest, CreateUserRequest, EntryInfo, EntryPayload,
    ListItemPayload,
};

pub fn test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("User request"))
}

pub fn admin_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("a1"), UserRole::Admin)
}

pub fn responsible_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("r1"), UserRole::Responsible)
}

pub fn collaborator_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("u1"), UserRole::Collaborator)
}

/// A store with the standard cast registered: admin `a1`, responsible
/// `r1`, and collaborator `u1` reporting to `r1`.
pub fn seeded_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let admin: AuthenticatedActor = admin_actor();

    let _ = handlers::create_user(
        &mut persistence,
        CreateUserRequest {
            id: String::from("a1"),
            name: String::from("Alice Admin"),
            email: String::from("alice@example.com"),
            role: String::from("admin"),
            responsible_id: None,
        },
        &admin,
        test_cause(),
    )
    .unwrap();
    let _ = handlers::create_user(
        &mut persistence,
        CreateUserRequest {
            id: String::from("r1"),
            name: String::from("Rosa Reviewer"),
            email: String::from("rosa@example.com"),
            role: String::from("responsible"),
            responsible_id: None,
        },
        &admin,
        test_cause(),
    )
    .unwrap();
    let _ = handlers::create_user(
        &mut persistence,
        CreateUserRequest {
            id: String::from("u1"),
            name: String::from("Ugo Worker"),
            email: String::from("ugo@example.com"),
            role: String::from("collaborator"),
            responsible_id: Some(String::from("r1")),
        },
        &admin,
        test_cause(),
    )
    .unwrap();

    persistence
}

pub fn complete_payload() -> EntryPayload {
    EntryPayload {
        clef_imputation: String::from("STR7.1.2"),
        libelle: String::from("UVR"),
        fonction: String::from("CPL"),
        date_besoin: String::from("2024-02-01"),
        heures_theoriques: String::from("8"),
        heures_passees: String::from("8"),
        commentaires: String::new(),
    }
}

/// Creates a draft entry owned by `u1` and returns its wire view.
pub fn draft_entry(persistence: &mut Persistence) -> EntryInfo {
    handlers::create_entry(
        persistence,
        CreateEntryRequest {
            user_id: String::from("u1"),
            date_pointage: String::from("2024-01-08"),
            payload: complete_payload(),
        },
        &collaborator_actor(),
        test_cause(),
    )
    .unwrap()
    .entry
}

/// Creates and submits an entry owned by `u1`, returning its identifier.
pub fn submitted_entry_id(persistence: &mut Persistence) -> i64 {
    let entry: EntryInfo = draft_entry(persistence);
    let entry_id: i64 = entry.id.unwrap();
    let _ = handlers::submit_entry(persistence, entry_id, &collaborator_actor(), test_cause())
        .unwrap();
    entry_id
}

pub fn reference_items() -> Vec<ListItemPayload> {
    vec![
        ListItemPayload {
            clef_imputation: String::from("STR7.1.2"),
            libelle: String::from("UVR"),
            fonction: String::from("CPL"),
        },
        ListItemPayload {
            clef_imputation: String::from("STR8.0.1"),
            libelle: String::from("LGT"),
            fonction: String::from("CPL"),
        },
    ]
}

/// Creates the reference list `2024` with the standard items.
pub fn seeded_list(persistence: &mut Persistence) {
    let _ = handlers::create_list(
        persistence,
        CreateListRequest {
            name: String::from("2024"),
            description: Some(String::from("reference codes")),
            items: reference_items(),
        },
        &responsible_actor(),
        test_cause(),
    )
    .unwrap();
}

/// Creates the reference list `2024` and makes it the active list.
pub fn active_list(persistence: &mut Persistence) {
    seeded_list(persistence);
    let _ = handlers::set_active_list(persistence, "2024", &responsible_actor(), test_cause())
        .unwrap();
}
