// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One end-to-end pass through the whole workflow: reference data setup,
//! entry lifecycle, modification request, and the audit trail left behind.

use pointage_persistence::Persistence;

use crate::handlers;
use crate::request_response::{
    AuditTrailResponse, CreateModificationRequestRequest, EntryInfo, EntryPatchPayload,
    EntryResponse, OptionsResponse, ReviewModificationRequestRequest, ReviewResponse,
    SetEntryStatusRequest, UpdateEntryRequest,
};
use crate::tests::helpers::{
    active_list, admin_actor, collaborator_actor, complete_payload, draft_entry,
    responsible_actor, seeded_persistence, test_cause,
};

#[test]
fn test_full_workflow_from_reference_data_to_audit_trail() {
    let mut persistence: Persistence = seeded_persistence();

    // The responsible curates and activates the reference list.
    active_list(&mut persistence);
    let options: OptionsResponse = handlers::resolve_entry_options(&mut persistence).unwrap();
    assert!(options
        .clef_imputation
        .iter()
        .any(|option| option.value == "STR7.1.2"));

    // The collaborator drafts, corrects, and submits an entry.
    let entry: EntryInfo = draft_entry(&mut persistence);
    let entry_id: i64 = entry.id.unwrap();
    let mut payload = complete_payload();
    payload.heures_theoriques = String::from("7");
    let _ = handlers::update_entry(
        &mut persistence,
        UpdateEntryRequest { entry_id, payload },
        &collaborator_actor(),
        test_cause(),
    )
    .unwrap();
    let submitted: EntryResponse =
        handlers::submit_entry(&mut persistence, entry_id, &collaborator_actor(), test_cause())
            .unwrap();
    assert_eq!(submitted.entry.status, "submitted");

    // The responsible validates it.
    let validated: EntryResponse = handlers::set_entry_status(
        &mut persistence,
        SetEntryStatusRequest {
            entry_id,
            status: String::from("validated"),
        },
        &responsible_actor(),
        test_cause(),
    )
    .unwrap();
    assert_eq!(validated.entry.status, "validated");
    assert_eq!(validated.entry.validated_by, Some(String::from("r1")));

    // A correction goes through the request workflow, not a direct edit.
    let request_id: i64 = handlers::create_modification_request(
        &mut persistence,
        CreateModificationRequestRequest {
            entry_id,
            requested_data: EntryPatchPayload {
                heures_passees: Some(String::from("6.5")),
                ..EntryPatchPayload::default()
            },
            comment: Some(String::from("left early on the 8th")),
        },
        &collaborator_actor(),
        test_cause(),
    )
    .unwrap()
    .request
    .id
    .unwrap();

    let review: ReviewResponse = handlers::review_modification_request(
        &mut persistence,
        ReviewModificationRequestRequest {
            request_id,
            decision: String::from("approved"),
            review_comment: Some(String::from("confirmed with the team")),
        },
        &responsible_actor(),
        test_cause(),
    )
    .unwrap();
    assert_eq!(review.request.status, "approved");

    let final_entry: EntryInfo =
        handlers::get_entry(&mut persistence, entry_id, &collaborator_actor()).unwrap();
    assert_eq!(final_entry.payload.heures_passees, "6.5");
    assert_eq!(final_entry.payload.heures_theoriques, "7");
    assert_eq!(final_entry.status, "validated");

    // The audit trail of the entry records each post-creation step.
    let trail: AuditTrailResponse = handlers::get_audit_trail(
        &mut persistence,
        "entry",
        &entry_id.to_string(),
        &admin_actor(),
    )
    .unwrap();
    let actions: Vec<&str> = trail
        .events
        .iter()
        .map(|event| event.action.as_str())
        .collect();
    assert_eq!(
        actions,
        vec!["UpdateEntry", "SubmitEntry", "SetEntryStatus"]
    );
    assert_eq!(trail.events[1].actor_id, "u1");
    assert_eq!(trail.events[2].actor_id, "r1");

    // The request trail holds the decision.
    let request_trail: AuditTrailResponse = handlers::get_audit_trail(
        &mut persistence,
        "modification_request",
        &request_id.to_string(),
        &admin_actor(),
    )
    .unwrap();
    assert_eq!(request_trail.events.len(), 1);
    assert_eq!(request_trail.events[0].action, "ReviewModificationRequest");
}
