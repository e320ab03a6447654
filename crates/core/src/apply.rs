// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, Utc};
use pointage_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use pointage_domain::{
    ConditionalList, ConditionalListItem, DomainError, EntryFields, EntryPatch, EntryStatus,
    ModificationRequest, PointageEntry, ReviewDecision, User, UserRole, UserStatus,
    validate_entry_fields, validate_entry_patch,
};

use crate::command::Command;
use crate::error::CoreError;
use crate::resolver::has_active_code;
use crate::state::{State, TransitionResult, snapshot_of};

/// Applies a command to the current state, producing a new state and audit
/// event.
///
/// The engine never mutates its input and never performs I/O; the caller
/// loads the relevant records into `state` beforehand and persists
/// `new_state` afterwards.
///
/// # Arguments
///
/// * `state` - The records the command operates on (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The timestamp to record for this transition
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The command violates domain rules
/// - A record the command addresses is absent from the state
pub fn apply(
    state: &State,
    command: Command,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::CreateEntry {
            user_id,
            date_pointage,
            fields,
        } => create_entry(state, user_id, date_pointage, fields, actor, cause, now),
        Command::UpdateEntry { entry_id, fields } => {
            update_entry(state, entry_id, fields, actor, cause, now)
        }
        Command::SubmitEntry { entry_id } => submit_entry(state, entry_id, actor, cause, now),
        Command::SetEntryStatus { entry_id, status } => {
            set_entry_status(state, entry_id, status, actor, cause, now)
        }
        Command::DeleteEntry { entry_id } => {
            set_entry_flags(state, entry_id, EntryFlagOp::Delete, actor, cause, now)
        }
        Command::ArchiveEntry { entry_id } => {
            set_entry_flags(state, entry_id, EntryFlagOp::Archive, actor, cause, now)
        }
        Command::RestoreEntry { entry_id } => {
            set_entry_flags(state, entry_id, EntryFlagOp::Restore, actor, cause, now)
        }
        Command::CreateModificationRequest {
            entry_id,
            user_id,
            requested_data,
            comment,
        } => create_request(
            state,
            entry_id,
            user_id,
            requested_data,
            comment,
            actor,
            cause,
            now,
        ),
        Command::ReviewModificationRequest {
            request_id,
            decision,
            review_comment,
        } => review_request(state, request_id, decision, review_comment, actor, cause, now),
        Command::CreateList {
            name,
            description,
            items,
        } => create_list(state, name, description, items, actor, cause, now),
        Command::MergeListItems {
            name,
            items,
            remove_duplicates,
        } => merge_list_items(state, &name, items, remove_duplicates, actor, cause, now),
        Command::SetActiveList { name } => set_active_list(state, &name, actor, cause),
        Command::DeactivateListItem { name, index } => {
            deactivate_list_item(state, &name, index, actor, cause, now)
        }
        Command::CreateUser {
            id,
            name,
            email,
            role,
            responsible_id,
        } => create_user(state, id, name, email, role, responsible_id, actor, cause, now),
        Command::UpdateUser { id, name, email } => {
            update_user(state, &id, name, email, actor, cause, now)
        }
        Command::SetUserStatus { id, status } => {
            set_user_status(state, &id, status, actor, cause, now)
        }
    }
}

/// Soft-flag operations share one code path.
enum EntryFlagOp {
    Delete,
    Archive,
    Restore,
}

impl EntryFlagOp {
    const fn action_name(&self) -> &'static str {
        match self {
            Self::Delete => "DeleteEntry",
            Self::Archive => "ArchiveEntry",
            Self::Restore => "RestoreEntry",
        }
    }
}

fn create_entry(
    state: &State,
    user_id: String,
    date_pointage: chrono::NaiveDate,
    fields: EntryFields,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<TransitionResult, CoreError> {
    validate_entry_fields(&fields)?;

    let entry: PointageEntry = PointageEntry::new(user_id.clone(), date_pointage, fields, now);

    let before: StateSnapshot = snapshot_of::<PointageEntry>(None)?;
    let after: StateSnapshot = snapshot_of(Some(&entry))?;

    let action: Action = Action::new(
        String::from("CreateEntry"),
        Some(format!(
            "Created draft entry for user '{user_id}' on {date_pointage}"
        )),
    );
    let audit_event: AuditEvent = entry_event(actor, cause, action, before, after, entry.id);

    let mut new_state: State = state.clone();
    new_state.entry = Some(entry);

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

fn update_entry(
    state: &State,
    entry_id: i64,
    fields: EntryFields,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<TransitionResult, CoreError> {
    let entry: PointageEntry = require_entry(state, entry_id)?;

    if entry.status.is_locked() {
        return Err(CoreError::DomainViolation(DomainError::EntryLocked {
            entry_id,
            status: entry.status,
        }));
    }
    validate_entry_fields(&fields)?;

    let before: StateSnapshot = snapshot_of(Some(&entry))?;

    let mut updated: PointageEntry = entry;
    updated.fields = fields;
    updated.updated_at = now;

    let after: StateSnapshot = snapshot_of(Some(&updated))?;

    let action: Action = Action::new(
        String::from("UpdateEntry"),
        Some(format!("Updated draft entry {entry_id}")),
    );
    let audit_event: AuditEvent = entry_event(actor, cause, action, before, after, updated.id);

    let mut new_state: State = state.clone();
    new_state.entry = Some(updated);

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

fn submit_entry(
    state: &State,
    entry_id: i64,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<TransitionResult, CoreError> {
    let entry: PointageEntry = require_entry(state, entry_id)?;

    if !entry.status.can_transition_to(EntryStatus::Submitted) {
        return Err(CoreError::DomainViolation(DomainError::InvalidTransition {
            entry_id,
            from: entry.status,
            to: EntryStatus::Submitted,
        }));
    }

    let before: StateSnapshot = snapshot_of(Some(&entry))?;

    let mut submitted: PointageEntry = entry;
    submitted.status = EntryStatus::Submitted;
    submitted.submitted_at = Some(now);
    submitted.updated_at = now;

    let after: StateSnapshot = snapshot_of(Some(&submitted))?;

    let action: Action = Action::new(
        String::from("SubmitEntry"),
        Some(format!("Submitted entry {entry_id}")),
    );
    let audit_event: AuditEvent = entry_event(actor, cause, action, before, after, submitted.id);

    let mut new_state: State = state.clone();
    new_state.entry = Some(submitted);

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

fn set_entry_status(
    state: &State,
    entry_id: i64,
    status: EntryStatus,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<TransitionResult, CoreError> {
    let entry: PointageEntry = require_entry(state, entry_id)?;

    let before: StateSnapshot = snapshot_of(Some(&entry))?;

    // Administrative escape hatch: any source state is allowed, the
    // transition is recorded in the audit trail instead of being refused.
    let mut updated: PointageEntry = entry;
    let from: EntryStatus = updated.status;
    updated.status = status;
    updated.updated_at = now;
    match status {
        EntryStatus::Validated => {
            updated.validated_at = Some(now);
            updated.validated_by = Some(actor.id.clone());
        }
        EntryStatus::Submitted if updated.submitted_at.is_none() => {
            updated.submitted_at = Some(now);
        }
        _ => {}
    }

    let after: StateSnapshot = snapshot_of(Some(&updated))?;

    let action: Action = Action::new(
        String::from("SetEntryStatus"),
        Some(format!(
            "Overrode entry {entry_id} status from {} to {}",
            from.as_str(),
            status.as_str()
        )),
    );
    let audit_event: AuditEvent = entry_event(actor, cause, action, before, after, updated.id);

    let mut new_state: State = state.clone();
    new_state.entry = Some(updated);

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

fn set_entry_flags(
    state: &State,
    entry_id: i64,
    op: EntryFlagOp,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<TransitionResult, CoreError> {
    // Restore must see soft-deleted entries, the other flag operations
    // treat them as absent.
    let entry: PointageEntry = match op {
        EntryFlagOp::Restore => state
            .entry
            .clone()
            .ok_or(CoreError::DomainViolation(DomainError::EntryNotFound(
                entry_id,
            )))?,
        EntryFlagOp::Delete | EntryFlagOp::Archive => require_entry(state, entry_id)?,
    };

    let before: StateSnapshot = snapshot_of(Some(&entry))?;

    let mut updated: PointageEntry = entry;
    match op {
        EntryFlagOp::Delete => updated.is_deleted = true,
        EntryFlagOp::Archive => updated.is_archived = true,
        EntryFlagOp::Restore => {
            updated.is_deleted = false;
            updated.is_archived = false;
        }
    }
    updated.updated_at = now;

    let after: StateSnapshot = snapshot_of(Some(&updated))?;

    let action: Action = Action::new(
        String::from(op.action_name()),
        Some(format!("{} entry {entry_id}", op.action_name())),
    );
    let audit_event: AuditEvent = entry_event(actor, cause, action, before, after, updated.id);

    let mut new_state: State = state.clone();
    new_state.entry = Some(updated);

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

#[allow(clippy::too_many_arguments)]
fn create_request(
    state: &State,
    entry_id: i64,
    user_id: String,
    requested_data: EntryPatch,
    comment: Option<String>,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<TransitionResult, CoreError> {
    let entry: PointageEntry = require_entry(state, entry_id)?;

    if entry.status == EntryStatus::Draft {
        return Err(CoreError::DomainViolation(
            DomainError::DraftEntryPrecondition { entry_id },
        ));
    }
    if state.has_pending_request {
        return Err(CoreError::DomainViolation(
            DomainError::PendingRequestExists { entry_id },
        ));
    }
    if requested_data.is_empty() {
        return Err(CoreError::DomainViolation(DomainError::MissingField {
            field: "requested_data",
        }));
    }
    validate_entry_patch(&requested_data)?;

    let request: ModificationRequest = ModificationRequest::new(
        entry_id,
        user_id,
        requested_data,
        entry.fields.clone(),
        comment,
        now,
    );

    let before: StateSnapshot = snapshot_of::<ModificationRequest>(None)?;
    let after: StateSnapshot = snapshot_of(Some(&request))?;

    let action: Action = Action::new(
        String::from("CreateModificationRequest"),
        Some(format!(
            "Opened modification request against entry {entry_id}"
        )),
    );
    let audit_event: AuditEvent = request_event(actor, cause, action, before, after, request.id);

    let mut new_state: State = state.clone();
    new_state.request = Some(request);
    new_state.has_pending_request = true;

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

fn review_request(
    state: &State,
    request_id: i64,
    decision: ReviewDecision,
    review_comment: Option<String>,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<TransitionResult, CoreError> {
    let request: ModificationRequest =
        state
            .request
            .clone()
            .ok_or(CoreError::DomainViolation(DomainError::RequestNotFound(
                request_id,
            )))?;

    if request.status.is_decided() {
        return Err(CoreError::DomainViolation(DomainError::AlreadyReviewed {
            request_id,
            status: request.status,
        }));
    }

    let before: StateSnapshot = snapshot_of(Some(&request))?;

    let mut decided: ModificationRequest = request;
    decided.status = decision.as_status();
    decided.reviewed_at = Some(now);
    decided.reviewed_by = Some(actor.id.clone());
    decided.review_comment = review_comment;

    let mut new_state: State = state.clone();

    if decision == ReviewDecision::Approved {
        let entry: PointageEntry = require_entry(state, decided.entry_id)?;

        // A code that went stale while the request sat in the queue must
        // not slip into a locked entry through approval.
        if let Some(code) = &decided.requested_data.clef_imputation {
            let active: &ConditionalList =
                state
                    .active_list
                    .as_ref()
                    .ok_or(CoreError::DomainViolation(DomainError::NoActiveList))?;
            if !has_active_code(active, code) {
                return Err(CoreError::DomainViolation(DomainError::StaleReference {
                    field: "clef_imputation",
                    value: code.clone(),
                }));
            }
        }

        let mut updated: PointageEntry = entry;
        updated.fields = decided.requested_data.apply_to(&updated.fields);
        updated.updated_at = now;
        new_state.entry = Some(updated);
    }

    let after: StateSnapshot = snapshot_of(Some(&decided))?;

    let action: Action = Action::new(
        String::from("ReviewModificationRequest"),
        Some(format!(
            "Recorded decision '{}' on request {request_id}",
            decision.as_str()
        )),
    );
    let audit_event: AuditEvent = request_event(actor, cause, action, before, after, decided.id);

    new_state.request = Some(decided);
    new_state.has_pending_request = false;

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

fn create_list(
    state: &State,
    name: String,
    description: Option<String>,
    items: Vec<ConditionalListItem>,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<TransitionResult, CoreError> {
    if state.list_names.iter().any(|existing| existing == &name) {
        return Err(CoreError::DomainViolation(DomainError::DuplicateListName(
            name,
        )));
    }
    validate_items(&items)?;

    let list: ConditionalList = ConditionalList::new(name.clone(), description, items, now)?;

    let before: StateSnapshot = snapshot_of::<ConditionalList>(None)?;
    let after: StateSnapshot = snapshot_of(Some(&list))?;

    let action: Action = Action::new(
        String::from("CreateList"),
        Some(format!(
            "Created conditional list '{name}' with {} items",
            list.items.len()
        )),
    );
    let audit_event: AuditEvent = list_event(actor, cause, action, before, after, &name);

    let mut new_state: State = state.clone();
    new_state.list_names.push(name);
    new_state.list = Some(list);

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

fn merge_list_items(
    state: &State,
    name: &str,
    items: Vec<ConditionalListItem>,
    remove_duplicates: bool,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<TransitionResult, CoreError> {
    let list: ConditionalList = require_list(state, name)?;
    validate_items(&items)?;

    let before: StateSnapshot = snapshot_of(Some(&list))?;

    let mut merged: ConditionalList = list;
    let mut skipped: usize = 0;
    for item in items {
        if remove_duplicates && merged.contains_triple(&item) {
            skipped += 1;
            continue;
        }
        merged.items.push(item);
    }
    merged.updated_at = now;

    let after: StateSnapshot = snapshot_of(Some(&merged))?;

    let action: Action = Action::new(
        String::from("MergeListItems"),
        Some(format!(
            "Merged items into list '{name}' ({skipped} duplicates skipped)"
        )),
    );
    let audit_event: AuditEvent = list_event(actor, cause, action, before, after, name);

    let mut new_state: State = state.clone();
    new_state.list = Some(merged);

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

fn set_active_list(
    state: &State,
    name: &str,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let list: ConditionalList = require_list(state, name)?;

    let before: StateSnapshot = snapshot_of(state.active_list.as_ref())?;
    let after: StateSnapshot = snapshot_of(Some(&list))?;

    let action: Action = Action::new(
        String::from("SetActiveList"),
        Some(format!("Activated conditional list '{name}'")),
    );
    let audit_event: AuditEvent = list_event(actor, cause, action, before, after, name);

    let mut new_state: State = state.clone();
    new_state.active_list = Some(list);

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

fn deactivate_list_item(
    state: &State,
    name: &str,
    index: usize,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<TransitionResult, CoreError> {
    let list: ConditionalList = require_list(state, name)?;

    if index >= list.items.len() {
        return Err(CoreError::DomainViolation(DomainError::ItemIndexOutOfRange {
            list: name.to_string(),
            index,
        }));
    }

    let before: StateSnapshot = snapshot_of(Some(&list))?;

    let mut updated: ConditionalList = list;
    updated.items[index].is_active = false;
    updated.updated_at = now;

    let after: StateSnapshot = snapshot_of(Some(&updated))?;

    let action: Action = Action::new(
        String::from("DeactivateListItem"),
        Some(format!("Deactivated item {index} of list '{name}'")),
    );
    let audit_event: AuditEvent = list_event(actor, cause, action, before, after, name);

    let mut new_state: State = state.clone();
    new_state.list = Some(updated);

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

#[allow(clippy::too_many_arguments)]
fn create_user(
    state: &State,
    id: String,
    name: String,
    email: String,
    role: UserRole,
    responsible_id: Option<String>,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<TransitionResult, CoreError> {
    if state.user.is_some() {
        return Err(CoreError::DomainViolation(DomainError::DuplicateUser(id)));
    }

    let user: User = User::new(id, name, email, role, responsible_id, now);
    user.validate_responsible_reference()?;

    if role == UserRole::Collaborator {
        let manages: bool = state
            .responsible
            .as_ref()
            .is_some_and(|r| r.role.manages_team());
        if !manages {
            let missing: String = user.responsible_id.clone().unwrap_or_default();
            return Err(CoreError::DomainViolation(DomainError::ResponsibleNotFound(
                missing,
            )));
        }
    }

    let before: StateSnapshot = snapshot_of::<User>(None)?;
    let after: StateSnapshot = snapshot_of(Some(&user))?;

    let action: Action = Action::new(
        String::from("CreateUser"),
        Some(format!("Registered user '{}' as {}", user.id, user.role)),
    );
    let audit_event: AuditEvent = user_event(actor, cause, action, before, after, &user.id);

    let mut new_state: State = state.clone();
    new_state.user = Some(user);

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

fn update_user(
    state: &State,
    id: &str,
    name: String,
    email: String,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<TransitionResult, CoreError> {
    let user: User = require_user(state, id)?;

    let before: StateSnapshot = snapshot_of(Some(&user))?;

    let mut updated: User = user;
    updated.name = name;
    updated.email = email;
    updated.updated_at = now;

    let after: StateSnapshot = snapshot_of(Some(&updated))?;

    let action: Action = Action::new(
        String::from("UpdateUser"),
        Some(format!("Updated profile of user '{id}'")),
    );
    let audit_event: AuditEvent = user_event(actor, cause, action, before, after, id);

    let mut new_state: State = state.clone();
    new_state.user = Some(updated);

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

fn set_user_status(
    state: &State,
    id: &str,
    status: UserStatus,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<TransitionResult, CoreError> {
    let user: User = require_user(state, id)?;

    let before: StateSnapshot = snapshot_of(Some(&user))?;

    let mut updated: User = user;
    updated.status = status;
    updated.updated_at = now;

    let after: StateSnapshot = snapshot_of(Some(&updated))?;

    let action: Action = Action::new(
        String::from("SetUserStatus"),
        Some(format!("Set user '{id}' status to {}", status.as_str())),
    );
    let audit_event: AuditEvent = user_event(actor, cause, action, before, after, id);

    let mut new_state: State = state.clone();
    new_state.user = Some(updated);

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

fn require_entry(state: &State, entry_id: i64) -> Result<PointageEntry, CoreError> {
    match &state.entry {
        Some(entry) if !entry.is_deleted => Ok(entry.clone()),
        _ => Err(CoreError::DomainViolation(DomainError::EntryNotFound(
            entry_id,
        ))),
    }
}

fn require_list(state: &State, name: &str) -> Result<ConditionalList, CoreError> {
    state
        .list
        .clone()
        .ok_or_else(|| CoreError::DomainViolation(DomainError::ListNotFound(name.to_string())))
}

fn require_user(state: &State, id: &str) -> Result<User, CoreError> {
    state
        .user
        .clone()
        .ok_or_else(|| CoreError::DomainViolation(DomainError::UserNotFound(id.to_string())))
}

fn validate_items(items: &[ConditionalListItem]) -> Result<(), CoreError> {
    for (index, item) in items.iter().enumerate() {
        if item.clef_imputation.trim().is_empty() {
            return Err(CoreError::DomainViolation(DomainError::InvalidListItem {
                index,
                reason: "clef_imputation must not be empty",
            }));
        }
        if item.libelle.trim().is_empty() {
            return Err(CoreError::DomainViolation(DomainError::InvalidListItem {
                index,
                reason: "libelle must not be empty",
            }));
        }
    }
    Ok(())
}

fn entry_event(
    actor: Actor,
    cause: Cause,
    action: Action,
    before: StateSnapshot,
    after: StateSnapshot,
    entry_id: Option<i64>,
) -> AuditEvent {
    AuditEvent::new(
        actor,
        cause,
        action,
        before,
        after,
        String::from("entry"),
        entry_id.map_or_else(|| String::from("new"), |id| id.to_string()),
    )
}

fn request_event(
    actor: Actor,
    cause: Cause,
    action: Action,
    before: StateSnapshot,
    after: StateSnapshot,
    request_id: Option<i64>,
) -> AuditEvent {
    AuditEvent::new(
        actor,
        cause,
        action,
        before,
        after,
        String::from("modification_request"),
        request_id.map_or_else(|| String::from("new"), |id| id.to_string()),
    )
}

fn list_event(
    actor: Actor,
    cause: Cause,
    action: Action,
    before: StateSnapshot,
    after: StateSnapshot,
    name: &str,
) -> AuditEvent {
    AuditEvent::new(
        actor,
        cause,
        action,
        before,
        after,
        String::from("conditional_list"),
        name.to_string(),
    )
}

fn user_event(
    actor: Actor,
    cause: Cause,
    action: Action,
    before: StateSnapshot,
    after: StateSnapshot,
    user_id: &str,
) -> AuditEvent {
    AuditEvent::new(
        actor,
        cause,
        action,
        before,
        after,
        String::from("user"),
        user_id.to_string(),
    )
}
