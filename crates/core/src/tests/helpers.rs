// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use pointage_audit::{Actor, Cause};
use pointage_domain::{
    ConditionalList, ConditionalListItem, EntryFields, EntryStatus, PointageEntry,
};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("u1"), String::from("collaborator"))
}

pub fn create_test_reviewer() -> Actor {
    Actor::new(String::from("r1"), String::from("responsible"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("User request"))
}

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

pub fn draft_entry(id: i64) -> PointageEntry {
    PointageEntry::new(String::from("u1"), test_date(), complete_fields(), test_now()).with_id(id)
}

pub fn submitted_entry(id: i64) -> PointageEntry {
    let mut entry: PointageEntry = draft_entry(id);
    entry.status = EntryStatus::Submitted;
    entry.submitted_at = Some(test_now());
    entry
}

pub fn test_item(clef: &str, libelle: &str, fonction: &str) -> ConditionalListItem {
    ConditionalListItem::new(clef.to_string(), libelle.to_string(), fonction.to_string()).unwrap()
}

pub fn test_list(name: &str) -> ConditionalList {
    ConditionalList::new(
        name.to_string(),
        None,
        vec![
            test_item("STR7.1.2", "UVR", "CPL"),
            test_item("STR8.0.1", "DEV", "ING"),
        ],
        test_now(),
    )
    .unwrap()
    .with_id(1)
}
