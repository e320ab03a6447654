// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, TimeZone, Utc};
use pointage_audit::Actor;
use pointage_domain::{EntryFields, PointageEntry, User, UserRole};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::AuthError;
use crate::tests::helpers::{admin_actor, collaborator_actor, responsible_actor};

fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).single().unwrap()
}

fn entry_owned_by(user_id: &str) -> PointageEntry {
    PointageEntry::new(
        user_id.to_string(),
        chrono::NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
        EntryFields::default(),
        test_now(),
    )
}

fn collaborator_user(id: &str, responsible_id: &str) -> User {
    User::new(
        id.to_string(),
        String::from("Someone"),
        format!("{id}@example.com"),
        UserRole::Collaborator,
        Some(responsible_id.to_string()),
        test_now(),
    )
}

#[test]
fn test_audit_actor_carries_the_role_name() {
    let actor: Actor = responsible_actor().to_audit_actor();

    assert_eq!(actor.id, "r1");
    assert_eq!(actor.actor_type, "responsible");
}

#[test]
fn test_owners_and_admins_may_mutate_an_entry() {
    let entry: PointageEntry = entry_owned_by("u1");

    assert!(AuthorizationService::authorize_entry_mutation(&collaborator_actor(), &entry).is_ok());
    assert!(AuthorizationService::authorize_entry_mutation(&admin_actor(), &entry).is_ok());

    let stranger: AuthenticatedActor =
        AuthenticatedActor::new(String::from("u9"), UserRole::Collaborator);
    let result: Result<(), AuthError> =
        AuthorizationService::authorize_entry_mutation(&stranger, &entry);
    assert!(matches!(result, Err(AuthError::Unauthorized { .. })));
}

#[test]
fn test_a_responsible_may_not_mutate_a_report_entry_directly() {
    let entry: PointageEntry = entry_owned_by("u1");

    let result: Result<(), AuthError> =
        AuthorizationService::authorize_entry_mutation(&responsible_actor(), &entry);

    assert!(matches!(result, Err(AuthError::Unauthorized { .. })));
}

#[test]
fn test_review_follows_the_reporting_line() {
    let report: User = collaborator_user("u1", "r1");
    let outside_report: User = collaborator_user("u2", "r9");

    assert!(AuthorizationService::authorize_review(&responsible_actor(), &report).is_ok());
    assert!(AuthorizationService::authorize_review(&admin_actor(), &outside_report).is_ok());

    let result: Result<(), AuthError> =
        AuthorizationService::authorize_review(&responsible_actor(), &outside_report);
    assert!(matches!(result, Err(AuthError::Unauthorized { .. })));
}

#[test]
fn test_collaborators_cannot_review() {
    let own_record: User = collaborator_user("u1", "r1");

    let result: Result<(), AuthError> =
        AuthorizationService::authorize_review(&collaborator_actor(), &own_record);

    assert!(matches!(
        result,
        Err(AuthError::Unauthorized { required_role, .. }) if required_role == "responsible"
    ));
}

#[test]
fn test_record_view_covers_self_line_manager_and_admin() {
    let record: User = collaborator_user("u1", "r1");

    assert!(AuthorizationService::authorize_record_view(&collaborator_actor(), &record).is_ok());
    assert!(AuthorizationService::authorize_record_view(&responsible_actor(), &record).is_ok());
    assert!(AuthorizationService::authorize_record_view(&admin_actor(), &record).is_ok());

    let other_responsible: AuthenticatedActor =
        AuthenticatedActor::new(String::from("r9"), UserRole::Responsible);
    let result: Result<(), AuthError> =
        AuthorizationService::authorize_record_view(&other_responsible, &record);
    assert!(matches!(result, Err(AuthError::Unauthorized { .. })));
}

#[test]
fn test_list_management_needs_a_team_role() {
    assert!(AuthorizationService::authorize_list_management(&responsible_actor()).is_ok());
    assert!(AuthorizationService::authorize_list_management(&admin_actor()).is_ok());
    assert!(AuthorizationService::authorize_list_management(&collaborator_actor()).is_err());
}

#[test]
fn test_user_management_and_audit_access_are_admin_only() {
    assert!(AuthorizationService::authorize_user_management(&admin_actor()).is_ok());
    assert!(AuthorizationService::authorize_user_management(&responsible_actor()).is_err());
    assert!(AuthorizationService::authorize_audit_access(&admin_actor()).is_ok());
    assert!(AuthorizationService::authorize_audit_access(&responsible_actor()).is_err());
}
