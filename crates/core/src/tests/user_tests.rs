// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::Utc;
use pointage_domain::{DomainError, User, UserRole, UserStatus};

use crate::tests::helpers::{create_test_actor, create_test_cause, test_now};
use crate::{Command, CoreError, State, TransitionResult, apply};

fn responsible() -> User {
    User::new(
        String::from("r1"),
        String::from("Resp One"),
        String::from("r1@example.com"),
        UserRole::Responsible,
        None,
        Utc::now(),
    )
}

fn create_collaborator_command() -> Command {
    Command::CreateUser {
        id: String::from("u2"),
        name: String::from("New Collaborator"),
        email: String::from("u2@example.com"),
        role: UserRole::Collaborator,
        responsible_id: Some(String::from("r1")),
    }
}

#[test]
fn test_create_collaborator_with_known_responsible() {
    let state: State = State::new().with_responsible(responsible());

    let transition: TransitionResult = apply(
        &state,
        create_collaborator_command(),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    let user: &User = transition.new_state.user.as_ref().unwrap();
    assert_eq!(user.id, "u2");
    assert_eq!(user.status, UserStatus::Active);
    assert_eq!(user.responsible_id, Some(String::from("r1")));
    assert_eq!(transition.audit_event.resource_type, "user");
}

#[test]
fn test_create_collaborator_without_responsible_record_fails() {
    let state: State = State::new();

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        create_collaborator_command(),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::ResponsibleNotFound(String::from("r1"))
        ))
    );
}

#[test]
fn test_create_collaborator_under_another_collaborator_fails() {
    let mut fake_responsible: User = responsible();
    fake_responsible.role = UserRole::Collaborator;
    fake_responsible.responsible_id = Some(String::from("r9"));
    let state: State = State::new().with_responsible(fake_responsible);

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        create_collaborator_command(),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::ResponsibleNotFound(_)
        ))
    ));
}

#[test]
fn test_create_collaborator_without_reference_fails_invariant() {
    let state: State = State::new();
    let command: Command = Command::CreateUser {
        id: String::from("u2"),
        name: String::from("Orphan"),
        email: String::from("u2@example.com"),
        role: UserRole::Collaborator,
        responsible_id: None,
    };

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        command,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::MissingResponsible {
            user_id: String::from("u2")
        }))
    );
}

#[test]
fn test_create_admin_with_responsible_reference_fails_invariant() {
    let state: State = State::new();
    let command: Command = Command::CreateUser {
        id: String::from("a1"),
        name: String::from("Admin"),
        email: String::from("a1@example.com"),
        role: UserRole::Admin,
        responsible_id: Some(String::from("r1")),
    };

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        command,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::UnexpectedResponsible {
                user_id: String::from("a1")
            }
        ))
    );
}

#[test]
fn test_create_duplicate_user_fails() {
    let state: State = State::new()
        .with_user(responsible())
        .with_responsible(responsible());
    let command: Command = Command::CreateUser {
        id: String::from("r1"),
        name: String::from("Resp One"),
        email: String::from("r1@example.com"),
        role: UserRole::Responsible,
        responsible_id: None,
    };

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        command,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::DuplicateUser(
            String::from("r1")
        )))
    );
}

#[test]
fn test_update_user_profile() {
    let state: State = State::new().with_user(responsible());
    let command: Command = Command::UpdateUser {
        id: String::from("r1"),
        name: String::from("Renamed"),
        email: String::from("renamed@example.com"),
    };

    let transition: TransitionResult = apply(
        &state,
        command,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    let user: &User = transition.new_state.user.as_ref().unwrap();
    assert_eq!(user.name, "Renamed");
    assert_eq!(user.email, "renamed@example.com");
    assert_eq!(user.updated_at, test_now());
}

#[test]
fn test_deactivate_user() {
    let state: State = State::new().with_user(responsible());
    let command: Command = Command::SetUserStatus {
        id: String::from("r1"),
        status: UserStatus::Inactive,
    };

    let transition: TransitionResult = apply(
        &state,
        command,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert_eq!(
        transition.new_state.user.as_ref().unwrap().status,
        UserStatus::Inactive
    );
}

#[test]
fn test_update_unknown_user_fails_not_found() {
    let state: State = State::new();
    let command: Command = Command::SetUserStatus {
        id: String::from("ghost"),
        status: UserStatus::Inactive,
    };

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        command,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::UserNotFound(
            String::from("ghost")
        )))
    );
}
