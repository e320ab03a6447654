// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;

use crate::{
    DomainError, EntryFields, EntryPatch, parse_pointage_date, validate_entry_fields,
    validate_entry_patch, validate_hours,
};

fn complete_fields() -> EntryFields {
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

#[test]
fn test_complete_payload_passes() {
    let result: Result<(), DomainError> = validate_entry_fields(&complete_fields());
    assert!(result.is_ok());
}

#[test]
fn test_commentaires_is_optional() {
    let mut fields: EntryFields = complete_fields();
    fields.commentaires = String::new();
    assert!(validate_entry_fields(&fields).is_ok());
}

#[test]
fn test_missing_required_field_is_reported_by_name() {
    let mut fields: EntryFields = complete_fields();
    fields.libelle = String::from("  ");

    let result: Result<(), DomainError> = validate_entry_fields(&fields);
    assert_eq!(result, Err(DomainError::MissingField { field: "libelle" }));
}

#[test]
fn test_hours_must_be_non_negative_numbers() {
    assert!(validate_hours("heures_passees", "7.5").is_ok());
    assert!(validate_hours("heures_passees", "0").is_ok());

    let negative: Result<(), DomainError> = validate_hours("heures_passees", "-1");
    assert_eq!(
        negative,
        Err(DomainError::InvalidHours {
            field: "heures_passees",
            value: String::from("-1")
        })
    );

    let not_a_number: Result<(), DomainError> = validate_hours("heures_theoriques", "eight");
    assert!(matches!(not_a_number, Err(DomainError::InvalidHours { .. })));
}

#[test]
fn test_patch_validation_skips_absent_fields() {
    let patch: EntryPatch = EntryPatch {
        heures_passees: Some(String::from("7.5")),
        ..EntryPatch::default()
    };
    assert!(validate_entry_patch(&patch).is_ok());

    let empty: EntryPatch = EntryPatch::default();
    assert!(validate_entry_patch(&empty).is_ok());
}

#[test]
fn test_patch_validation_checks_populated_fields() {
    let patch: EntryPatch = EntryPatch {
        clef_imputation: Some(String::new()),
        ..EntryPatch::default()
    };
    let result: Result<(), DomainError> = validate_entry_patch(&patch);
    assert_eq!(
        result,
        Err(DomainError::MissingField {
            field: "clef_imputation"
        })
    );

    let bad_hours: EntryPatch = EntryPatch {
        heures_theoriques: Some(String::from("NaN")),
        ..EntryPatch::default()
    };
    assert!(matches!(
        validate_entry_patch(&bad_hours),
        Err(DomainError::InvalidHours { .. })
    ));
}

#[test]
fn test_parse_pointage_date() {
    let parsed: NaiveDate = parse_pointage_date("2024-01-08").unwrap();
    assert_eq!(parsed, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());

    let result: Result<NaiveDate, DomainError> = parse_pointage_date("08/01/2024");
    assert!(matches!(result, Err(DomainError::DateParseError { .. })));
}
