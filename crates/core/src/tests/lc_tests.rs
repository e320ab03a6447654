// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pointage_domain::{ConditionalList, DomainError, LcOptions};

use crate::tests::helpers::{
    create_test_actor, create_test_cause, test_item, test_list, test_now,
};
use crate::{Command, CoreError, State, TransitionResult, apply, has_active_code, resolve_options};

#[test]
fn test_options_are_deduplicated_per_field_in_insertion_order() {
    let mut list: ConditionalList = test_list("2024");
    // Same libelle as the first item, new clef.
    list.items.push(test_item("STR7.1.3", "UVR", "CPL"));

    let options: LcOptions = resolve_options(&list);

    let clefs: Vec<&str> = options
        .clef_imputation
        .iter()
        .map(|o| o.value.as_str())
        .collect();
    assert_eq!(clefs, vec!["STR7.1.2", "STR8.0.1", "STR7.1.3"]);

    let libelles: Vec<&str> = options.libelle.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(libelles, vec!["UVR", "DEV"]);

    let fonctions: Vec<&str> = options.fonction.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(fonctions, vec!["CPL", "ING"]);
}

#[test]
fn test_inactive_items_contribute_no_options() {
    let mut list: ConditionalList = test_list("2024");
    list.items[1].is_active = false;

    let options: LcOptions = resolve_options(&list);

    assert!(options.clef_imputation.iter().all(|o| o.value != "STR8.0.1"));
    assert!(options.libelle.iter().all(|o| o.value != "DEV"));
    assert!(options.fonction.iter().all(|o| o.value != "ING"));
}

#[test]
fn test_empty_fonction_values_are_skipped() {
    let mut list: ConditionalList = test_list("2024");
    list.items.push(test_item("STR9.0.0", "QA", ""));

    let options: LcOptions = resolve_options(&list);

    assert!(options.fonction.iter().all(|o| !o.value.is_empty()));
    assert!(options.clef_imputation.iter().any(|o| o.value == "STR9.0.0"));
}

#[test]
fn test_has_active_code_respects_the_active_flag() {
    let mut list: ConditionalList = test_list("2024");
    assert!(has_active_code(&list, "STR7.1.2"));
    assert!(!has_active_code(&list, "STR9.9.9"));

    list.items[0].is_active = false;
    assert!(!has_active_code(&list, "STR7.1.2"));
}

#[test]
fn test_create_list_rejects_duplicate_name() {
    let state: State = State::new().with_list_names(vec![String::from("2024")]);
    let command: Command = Command::CreateList {
        name: String::from("2024"),
        description: None,
        items: Vec::new(),
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
        Err(CoreError::DomainViolation(DomainError::DuplicateListName(
            String::from("2024")
        )))
    );
}

#[test]
fn test_create_list_with_items() {
    let state: State = State::new();
    let command: Command = Command::CreateList {
        name: String::from("2025"),
        description: Some(String::from("next year")),
        items: vec![test_item("A", "B", "C")],
    };

    let transition: TransitionResult = apply(
        &state,
        command,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    let list: &ConditionalList = transition.new_state.list.as_ref().unwrap();
    assert_eq!(list.name, "2025");
    assert_eq!(list.items.len(), 1);
    assert!(transition.new_state.list_names.contains(&String::from("2025")));
    assert_eq!(transition.audit_event.resource_type, "conditional_list");
    assert_eq!(transition.audit_event.resource_id, "2025");
}

#[test]
fn test_merge_skips_exact_duplicates_when_asked() {
    let state: State = State::new().with_list(test_list("2024"));
    let command: Command = Command::MergeListItems {
        name: String::from("2024"),
        items: vec![
            test_item("STR7.1.2", "UVR", "CPL"),
            test_item("NEW", "NEW", "NEW"),
        ],
        remove_duplicates: true,
    };

    let transition: TransitionResult = apply(
        &state,
        command,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    let list: &ConditionalList = transition.new_state.list.as_ref().unwrap();
    // One duplicate skipped, one item added to the original two.
    assert_eq!(list.items.len(), 3);
    let details: &str = transition.audit_event.action.details.as_deref().unwrap();
    assert!(details.contains("1 duplicates skipped"));
}

#[test]
fn test_merge_keeps_duplicates_when_not_asked() {
    let state: State = State::new().with_list(test_list("2024"));
    let command: Command = Command::MergeListItems {
        name: String::from("2024"),
        items: vec![test_item("STR7.1.2", "UVR", "CPL")],
        remove_duplicates: false,
    };

    let transition: TransitionResult = apply(
        &state,
        command,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert_eq!(transition.new_state.list.as_ref().unwrap().items.len(), 3);
}

#[test]
fn test_merge_dedup_is_case_sensitive() {
    let state: State = State::new().with_list(test_list("2024"));
    let command: Command = Command::MergeListItems {
        name: String::from("2024"),
        items: vec![test_item("str7.1.2", "UVR", "CPL")],
        remove_duplicates: true,
    };

    let transition: TransitionResult = apply(
        &state,
        command,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    // Lowercase clef does not match the existing uppercase triple.
    assert_eq!(transition.new_state.list.as_ref().unwrap().items.len(), 3);
}

#[test]
fn test_merge_into_unknown_list_fails_not_found() {
    let state: State = State::new();
    let command: Command = Command::MergeListItems {
        name: String::from("nope"),
        items: Vec::new(),
        remove_duplicates: true,
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
        Err(CoreError::DomainViolation(DomainError::ListNotFound(
            String::from("nope")
        )))
    );
}

#[test]
fn test_set_active_list_requires_a_known_name() {
    let state: State = State::new();
    let command: Command = Command::SetActiveList {
        name: String::from("nope"),
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
        Err(CoreError::DomainViolation(DomainError::ListNotFound(
            String::from("nope")
        )))
    );
}

#[test]
fn test_set_active_list_activates_the_loaded_list() {
    let state: State = State::new().with_list(test_list("2024"));
    let command: Command = Command::SetActiveList {
        name: String::from("2024"),
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
        transition.new_state.active_list.as_ref().map(|l| l.name.as_str()),
        Some("2024")
    );
}

#[test]
fn test_deactivate_item_flips_the_flag_only() {
    let state: State = State::new().with_list(test_list("2024"));
    let command: Command = Command::DeactivateListItem {
        name: String::from("2024"),
        index: 0,
    };

    let transition: TransitionResult = apply(
        &state,
        command,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    let list: &ConditionalList = transition.new_state.list.as_ref().unwrap();
    assert!(!list.items[0].is_active);
    assert!(list.items[1].is_active);
    assert_eq!(list.items.len(), 2);
}

#[test]
fn test_deactivate_item_checks_the_index() {
    let state: State = State::new().with_list(test_list("2024"));
    let command: Command = Command::DeactivateListItem {
        name: String::from("2024"),
        index: 5,
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
            DomainError::ItemIndexOutOfRange {
                list: String::from("2024"),
                index: 5,
            }
        ))
    );
}
