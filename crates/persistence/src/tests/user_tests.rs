// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::Duration;
use pointage_domain::{User, UserStatus};

use crate::{Persistence, PersistenceError};
use crate::tests::helpers::{seeded_persistence, test_event, test_now};

#[test]
fn test_seeded_users_roundtrip() {
    let mut persistence: Persistence = seeded_persistence();

    let collaborator: User = persistence.get_user("u1").unwrap().unwrap();
    assert_eq!(collaborator.responsible_id, Some(String::from("r1")));
    assert_eq!(collaborator.status, UserStatus::Active);

    let all: Vec<User> = persistence.list_users().unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn test_duplicate_user_insert_fails() {
    let mut persistence: Persistence = seeded_persistence();
    let duplicate: User = persistence.get_user("u1").unwrap().unwrap();

    let result: Result<(), PersistenceError> =
        persistence.create_user(&duplicate, &test_event("CreateUser", "user", "u1"));

    assert!(matches!(result, Err(PersistenceError::QueryFailed(_))));
}

#[test]
fn test_update_user_profile_changes_name_and_email() {
    let mut persistence: Persistence = seeded_persistence();
    let mut user: User = persistence.get_user("u1").unwrap().unwrap();
    user.name = String::from("Renamed");
    user.email = String::from("renamed@example.com");
    user.updated_at = test_now() + Duration::hours(1);

    let rows: usize = persistence
        .update_user_profile(&user, &test_event("UpdateUser", "user", "u1"))
        .unwrap();

    assert_eq!(rows, 1);
    let stored: User = persistence.get_user("u1").unwrap().unwrap();
    assert_eq!(stored.name, "Renamed");
    assert_eq!(stored.email, "renamed@example.com");
    assert_eq!(stored.updated_at, user.updated_at);
}

#[test]
fn test_update_user_can_deactivate() {
    let mut persistence: Persistence = seeded_persistence();
    let mut user: User = persistence.get_user("u1").unwrap().unwrap();
    user.status = UserStatus::Inactive;

    let rows: usize = persistence
        .update_user(&user, &test_event("SetUserStatus", "user", "u1"))
        .unwrap();

    assert_eq!(rows, 1);
    let stored: User = persistence.get_user("u1").unwrap().unwrap();
    assert_eq!(stored.status, UserStatus::Inactive);
}

#[test]
fn test_update_unknown_user_affects_no_rows() {
    let mut persistence: Persistence = seeded_persistence();
    let mut ghost: User = persistence.get_user("u1").unwrap().unwrap();
    ghost.id = String::from("ghost");

    let rows: usize = persistence
        .update_user(&ghost, &test_event("SetUserStatus", "user", "ghost"))
        .unwrap();

    assert_eq!(rows, 0);
}

#[test]
fn test_list_team_returns_only_direct_reports() {
    let mut persistence: Persistence = seeded_persistence();

    let team: Vec<User> = persistence.list_team("r1").unwrap();

    assert_eq!(team.len(), 1);
    assert_eq!(team[0].id, "u1");
    assert!(persistence.list_team("u1").unwrap().is_empty());
}
