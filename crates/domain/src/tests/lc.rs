// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, Utc};

use crate::{ConditionalList, ConditionalListItem, DomainError, LcOption};

fn item(clef: &str, libelle: &str, fonction: &str) -> ConditionalListItem {
    ConditionalListItem::new(clef.to_string(), libelle.to_string(), fonction.to_string()).unwrap()
}

#[test]
fn test_item_requires_clef_and_libelle() {
    let missing_clef: Result<ConditionalListItem, DomainError> =
        ConditionalListItem::new(String::new(), String::from("UVR"), String::from("CPL"));
    assert!(matches!(
        missing_clef,
        Err(DomainError::InvalidListItem { .. })
    ));

    let missing_libelle: Result<ConditionalListItem, DomainError> =
        ConditionalListItem::new(String::from("STR7.1.2"), String::from("  "), String::new());
    assert!(matches!(
        missing_libelle,
        Err(DomainError::InvalidListItem { .. })
    ));

    let valid: ConditionalListItem = item("STR7.1.2", "UVR", "");
    assert!(valid.is_active);
}

#[test]
fn test_same_triple_is_exact_and_case_sensitive() {
    let a: ConditionalListItem = item("X", "Y", "Z");
    let b: ConditionalListItem = item("X", "Y", "Z");
    let c: ConditionalListItem = item("x", "Y", "Z");

    assert!(a.same_triple(&b));
    assert!(!a.same_triple(&c));
}

#[test]
fn test_same_triple_ignores_the_active_flag() {
    let a: ConditionalListItem = item("X", "Y", "Z");
    let mut b: ConditionalListItem = item("X", "Y", "Z");
    b.is_active = false;

    assert!(a.same_triple(&b));
}

#[test]
fn test_list_rejects_empty_name() {
    let now: DateTime<Utc> = Utc::now();
    let result: Result<ConditionalList, DomainError> =
        ConditionalList::new(String::from("   "), None, Vec::new(), now);
    assert!(matches!(result, Err(DomainError::InvalidListName(_))));
}

#[test]
fn test_contains_triple_scans_all_items() {
    let now: DateTime<Utc> = Utc::now();
    let list: ConditionalList = ConditionalList::new(
        String::from("2024"),
        None,
        vec![item("A", "B", "C"), item("X", "Y", "Z")],
        now,
    )
    .unwrap();

    assert!(list.contains_triple(&item("X", "Y", "Z")));
    assert!(!list.contains_triple(&item("X", "Y", "W")));
}

#[test]
fn test_option_label_mirrors_value() {
    let option: LcOption = LcOption::from_value("STR7.1.2");
    assert_eq!(option.value, "STR7.1.2");
    assert_eq!(option.label, "STR7.1.2");
    assert!(option.active);
}
