// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operation handlers gluing authorization, the transition engine, and the
//! store together.
//!
//! Every mutating handler follows the same shape: authorize the caller,
//! load the records the command needs, run the command through the
//! transition engine, and persist the outcome together with its audit
//! event. Conditional writes that affect zero rows mean a concurrent
//! writer won the race; those surface as conflicts rather than silent
//! no-ops.

use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use pointage::{Command, State, TransitionResult, apply, resolve_options};
use pointage_audit::{AuditEvent, Cause};
use pointage_domain::{
    ConditionalList, ConditionalListItem, DomainError, EntryStatus, ModificationRequest,
    PointageEntry, RequestStatus, ReviewDecision, User, UserRole, UserStatus,
    parse_pointage_date,
};
use pointage_persistence::Persistence;
use tracing::info;

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AuditEventInfo, AuditTrailResponse, CreateEntryRequest, CreateListRequest,
    CreateModificationRequestRequest, CreateUserRequest, DeactivateListItemRequest, EntryInfo,
    EntryListResponse, EntryResponse, ListInfo, ListItemPayload, ListNamesResponse, ListResponse,
    MergeListItemsRequest, MergeListItemsResponse, OptionsResponse, RequestInfo,
    RequestListResponse, RequestResponse, ReviewModificationRequestRequest, ReviewResponse,
    SetEntryStatusRequest, SetUserStatusRequest, UpdateEntryRequest, UpdateUserRequest,
    UserInfo, UserListResponse, UserResponse,
};

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// Creates a draft pointage entry.
///
/// # Errors
///
/// Returns an error when the caller may not create entries for the owner,
/// the date does not parse, or the payload is incomplete.
pub fn create_entry(
    persistence: &mut Persistence,
    request: CreateEntryRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<EntryResponse, ApiError> {
    AuthorizationService::authorize_entry_creation(authenticated_actor, &request.user_id)?;

    let date_pointage: NaiveDate =
        parse_pointage_date(&request.date_pointage).map_err(translate_domain_error)?;
    let command: Command = Command::CreateEntry {
        user_id: request.user_id,
        date_pointage,
        fields: request.payload.into_fields(),
    };

    let result: TransitionResult = run(&State::new(), command, authenticated_actor, cause)?;
    let message: String = message_of(&result.audit_event);
    let entry: PointageEntry = transition_entry(result.new_state)?;

    let stored: PointageEntry = persistence
        .create_entry(&entry, &result.audit_event)
        .map_err(translate_persistence_error)?;
    info!("created entry {:?} for user '{}'", stored.id, stored.user_id);

    Ok(EntryResponse {
        entry: EntryInfo::from_entry(&stored),
        message,
    })
}

/// Replaces the payload of a draft entry.
///
/// # Errors
///
/// Returns an error when the caller does not own the entry, the entry is
/// locked, or the payload is incomplete. A conflict is returned when the
/// entry stopped being a draft concurrently.
pub fn update_entry(
    persistence: &mut Persistence,
    request: UpdateEntryRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<EntryResponse, ApiError> {
    let current: PointageEntry = load_entry(persistence, request.entry_id)?;
    AuthorizationService::authorize_entry_mutation(authenticated_actor, &current)?;

    let command: Command = Command::UpdateEntry {
        entry_id: request.entry_id,
        fields: request.payload.into_fields(),
    };
    let state: State = State::new().with_entry(current);

    let result: TransitionResult = run(&state, command, authenticated_actor, cause)?;
    let message: String = message_of(&result.audit_event);
    let updated: PointageEntry = transition_entry(result.new_state)?;

    let rows: usize = persistence
        .update_draft_entry(request.entry_id, &updated, &result.audit_event)
        .map_err(translate_persistence_error)?;
    if rows == 0 {
        return Err(entry_conflict(request.entry_id));
    }

    Ok(EntryResponse {
        entry: EntryInfo::from_entry(&updated),
        message,
    })
}

/// Submits a draft entry for validation. One-way lock.
///
/// # Errors
///
/// Returns an error when the caller does not own the entry or the entry is
/// not a draft. A conflict is returned when the entry was submitted
/// concurrently.
pub fn submit_entry(
    persistence: &mut Persistence,
    entry_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<EntryResponse, ApiError> {
    let current: PointageEntry = load_entry(persistence, entry_id)?;
    AuthorizationService::authorize_entry_mutation(authenticated_actor, &current)?;

    let state: State = State::new().with_entry(current);
    let result: TransitionResult = run(
        &state,
        Command::SubmitEntry { entry_id },
        authenticated_actor,
        cause,
    )?;
    let message: String = message_of(&result.audit_event);
    let submitted: PointageEntry = transition_entry(result.new_state)?;

    let rows: usize = persistence
        .submit_entry(entry_id, &submitted, &result.audit_event)
        .map_err(translate_persistence_error)?;
    if rows == 0 {
        return Err(entry_conflict(entry_id));
    }
    info!("entry {entry_id} submitted by '{}'", authenticated_actor.id);

    Ok(EntryResponse {
        entry: EntryInfo::from_entry(&submitted),
        message,
    })
}

/// Overrides an entry's lifecycle status. This is the validation and
/// rejection path, and doubles as the administrative escape hatch.
///
/// # Errors
///
/// Returns an error when the caller does not manage the entry's owner or
/// the status string is unknown.
pub fn set_entry_status(
    persistence: &mut Persistence,
    request: SetEntryStatusRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<EntryResponse, ApiError> {
    let status: EntryStatus =
        EntryStatus::from_str(&request.status).map_err(translate_domain_error)?;
    let current: PointageEntry = load_entry(persistence, request.entry_id)?;
    let owner: User = load_user(persistence, &current.user_id)?;
    AuthorizationService::authorize_review(authenticated_actor, &owner)?;

    let state: State = State::new().with_entry(current);
    let command: Command = Command::SetEntryStatus {
        entry_id: request.entry_id,
        status,
    };

    let result: TransitionResult = run(&state, command, authenticated_actor, cause)?;
    let message: String = message_of(&result.audit_event);
    let updated: PointageEntry = transition_entry(result.new_state)?;

    let rows: usize = persistence
        .overwrite_entry(request.entry_id, &updated, &result.audit_event)
        .map_err(translate_persistence_error)?;
    if rows == 0 {
        return Err(not_found_entry(request.entry_id));
    }
    info!(
        "entry {} status set to '{}' by '{}'",
        request.entry_id,
        status.as_str(),
        authenticated_actor.id
    );

    Ok(EntryResponse {
        entry: EntryInfo::from_entry(&updated),
        message,
    })
}

/// Soft-deletes an entry. The row survives for restore and audit.
///
/// # Errors
///
/// Returns an error when the caller does not own the entry, or when a
/// non-admin deletes an entry that has left the draft state.
pub fn delete_entry(
    persistence: &mut Persistence,
    entry_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<EntryResponse, ApiError> {
    set_entry_flags(
        persistence,
        entry_id,
        Command::DeleteEntry { entry_id },
        authenticated_actor,
        cause,
    )
}

/// Soft-archives an entry.
///
/// # Errors
///
/// Returns an error when the caller does not own the entry.
pub fn archive_entry(
    persistence: &mut Persistence,
    entry_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<EntryResponse, ApiError> {
    set_entry_flags(
        persistence,
        entry_id,
        Command::ArchiveEntry { entry_id },
        authenticated_actor,
        cause,
    )
}

/// Clears the soft-delete and soft-archive flags of an entry.
///
/// # Errors
///
/// Returns an error when the caller does not own the entry.
pub fn restore_entry(
    persistence: &mut Persistence,
    entry_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<EntryResponse, ApiError> {
    set_entry_flags(
        persistence,
        entry_id,
        Command::RestoreEntry { entry_id },
        authenticated_actor,
        cause,
    )
}

fn set_entry_flags(
    persistence: &mut Persistence,
    entry_id: i64,
    command: Command,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<EntryResponse, ApiError> {
    let current: PointageEntry = load_entry(persistence, entry_id)?;
    AuthorizationService::authorize_entry_mutation(authenticated_actor, &current)?;

    // Only admins may delete an entry that has left the draft state.
    if matches!(command, Command::DeleteEntry { .. })
        && authenticated_actor.role != UserRole::Admin
        && current.status != EntryStatus::Draft
    {
        return Err(translate_domain_error(DomainError::EntryLocked {
            entry_id,
            status: current.status,
        }));
    }

    let state: State = State::new().with_entry(current);
    let result: TransitionResult = run(&state, command, authenticated_actor, cause)?;
    let message: String = message_of(&result.audit_event);
    let updated: PointageEntry = transition_entry(result.new_state)?;

    let rows: usize = persistence
        .set_entry_flags(entry_id, &updated, &result.audit_event)
        .map_err(translate_persistence_error)?;
    if rows == 0 {
        return Err(not_found_entry(entry_id));
    }

    Ok(EntryResponse {
        entry: EntryInfo::from_entry(&updated),
        message,
    })
}

/// Fetches one entry.
///
/// # Errors
///
/// Returns an error when the entry does not exist or the caller may not
/// see its owner's records.
pub fn get_entry(
    persistence: &mut Persistence,
    entry_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<EntryInfo, ApiError> {
    let entry: PointageEntry = load_entry(persistence, entry_id)?;
    let owner: User = load_user(persistence, &entry.user_id)?;
    AuthorizationService::authorize_record_view(authenticated_actor, &owner)?;
    Ok(EntryInfo::from_entry(&entry))
}

/// Lists one user's entries, newest pointage date first. Soft-deleted
/// entries are excluded.
///
/// # Errors
///
/// Returns an error when the caller may not see the owner's records.
pub fn list_entries(
    persistence: &mut Persistence,
    user_id: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<EntryListResponse, ApiError> {
    let owner: User = load_user(persistence, user_id)?;
    AuthorizationService::authorize_record_view(authenticated_actor, &owner)?;

    let entries: Vec<PointageEntry> = persistence
        .list_entries_for_user(user_id)
        .map_err(translate_persistence_error)?;
    Ok(EntryListResponse {
        entries: entries.iter().map(EntryInfo::from_entry).collect(),
    })
}

/// Lists one user's entries for a single ISO week (`YYYY-Www`), newest
/// pointage date first.
///
/// # Errors
///
/// Returns an error when the caller may not see the owner's records.
pub fn list_entries_for_week(
    persistence: &mut Persistence,
    user_id: &str,
    week_label: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<EntryListResponse, ApiError> {
    let owner: User = load_user(persistence, user_id)?;
    AuthorizationService::authorize_record_view(authenticated_actor, &owner)?;

    let entries: Vec<PointageEntry> = persistence
        .list_entries_for_user_week(user_id, week_label)
        .map_err(translate_persistence_error)?;
    Ok(EntryListResponse {
        entries: entries.iter().map(EntryInfo::from_entry).collect(),
    })
}

/// Lists the entries of every user the caller manages.
///
/// A responsible sees their direct reports; an admin sees everyone.
///
/// # Errors
///
/// Returns an error when the caller does not manage a team.
pub fn list_team_entries(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<EntryListResponse, ApiError> {
    AuthorizationService::authorize_team_view(authenticated_actor)?;

    let member_ids: Vec<String> = managed_user_ids(persistence, authenticated_actor)?;
    let entries: Vec<PointageEntry> = persistence
        .list_entries_for_users(&member_ids)
        .map_err(translate_persistence_error)?;
    Ok(EntryListResponse {
        entries: entries.iter().map(EntryInfo::from_entry).collect(),
    })
}

// ---------------------------------------------------------------------------
// Modification requests
// ---------------------------------------------------------------------------

/// Opens a modification request against a locked entry. The caller is
/// recorded as the requesting user.
///
/// # Errors
///
/// Returns an error when the caller does not own the entry, the entry is
/// still a draft, a pending request already exists, or the patch is empty
/// or malformed.
pub fn create_modification_request(
    persistence: &mut Persistence,
    request: CreateModificationRequestRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<RequestResponse, ApiError> {
    let entry: PointageEntry = load_entry(persistence, request.entry_id)?;
    AuthorizationService::authorize_entry_mutation(authenticated_actor, &entry)?;

    let has_pending: bool = persistence
        .has_pending_request(request.entry_id)
        .map_err(translate_persistence_error)?;
    let state: State = State::new()
        .with_entry(entry)
        .with_pending_request(has_pending);
    let command: Command = Command::CreateModificationRequest {
        entry_id: request.entry_id,
        user_id: authenticated_actor.id.clone(),
        requested_data: request.requested_data.into_patch(),
        comment: request.comment,
    };

    let result: TransitionResult = run(&state, command, authenticated_actor, cause)?;
    let message: String = message_of(&result.audit_event);
    let pending: ModificationRequest = transition_request(result.new_state)?;

    let stored: ModificationRequest = persistence
        .create_request(&pending, &result.audit_event)
        .map_err(translate_persistence_error)?;
    info!(
        "modification request {:?} opened against entry {}",
        stored.id, stored.entry_id
    );

    Ok(RequestResponse {
        request: RequestInfo::from_request(&stored),
        message,
    })
}

/// Records the single decision on a pending modification request. On
/// approval the patch is applied to the entry in the same transaction.
///
/// # Errors
///
/// Returns an error when the caller does not manage the requester, the
/// decision string is unknown, the request was already decided, or an
/// approved reference code is no longer active.
pub fn review_modification_request(
    persistence: &mut Persistence,
    request: ReviewModificationRequestRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ReviewResponse, ApiError> {
    let decision: ReviewDecision =
        ReviewDecision::from_str(&request.decision).map_err(translate_domain_error)?;
    let pending: ModificationRequest = load_request(persistence, request.request_id)?;
    let requester: User = load_user(persistence, &pending.user_id)?;
    AuthorizationService::authorize_review(authenticated_actor, &requester)?;

    let entry_id: i64 = pending.entry_id;
    let mut state: State = State::new().with_request(pending);
    if let Some(entry) = persistence
        .get_entry(entry_id)
        .map_err(translate_persistence_error)?
    {
        state = state.with_entry(entry);
    }
    if let Some(active) = persistence
        .get_active_list()
        .map_err(translate_persistence_error)?
    {
        state = state.with_active_list(active);
    }

    let command: Command = Command::ReviewModificationRequest {
        request_id: request.request_id,
        decision,
        review_comment: request.review_comment,
    };
    let result: TransitionResult = run(&state, command, authenticated_actor, cause)?;
    let message: String = message_of(&result.audit_event);

    let decided: ModificationRequest = transition_request_from(&result.new_state)?;
    let patched: Option<PointageEntry> = if decision == ReviewDecision::Approved {
        result.new_state.entry
    } else {
        None
    };

    let rows: usize = persistence
        .persist_review(
            request.request_id,
            &decided,
            patched.as_ref(),
            &result.audit_event,
        )
        .map_err(translate_persistence_error)?;
    if rows == 0 {
        return Err(ApiError::Conflict {
            message: format!(
                "Modification request {} was decided concurrently",
                request.request_id
            ),
        });
    }
    info!(
        "request {} decided '{}' by '{}'",
        request.request_id,
        decision.as_str(),
        authenticated_actor.id
    );

    Ok(ReviewResponse {
        request: RequestInfo::from_request(&decided),
        entry: patched.as_ref().map(EntryInfo::from_entry),
        message,
    })
}

/// Lists every modification request, optionally narrowed to one status,
/// newest first.
///
/// # Errors
///
/// Returns an error when the caller is not an administrator.
pub fn list_requests(
    persistence: &mut Persistence,
    filter_status: Option<RequestStatus>,
    authenticated_actor: &AuthenticatedActor,
) -> Result<RequestListResponse, ApiError> {
    AuthorizationService::authorize_request_overview(authenticated_actor)?;

    let requests: Vec<ModificationRequest> = persistence
        .list_requests(filter_status)
        .map_err(translate_persistence_error)?;
    Ok(RequestListResponse {
        requests: requests.iter().map(RequestInfo::from_request).collect(),
    })
}

/// Lists one user's modification requests, newest first.
///
/// # Errors
///
/// Returns an error when the caller may not see the owner's records.
pub fn list_requests_for_user(
    persistence: &mut Persistence,
    user_id: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<RequestListResponse, ApiError> {
    let owner: User = load_user(persistence, user_id)?;
    AuthorizationService::authorize_record_view(authenticated_actor, &owner)?;

    let requests: Vec<ModificationRequest> = persistence
        .list_requests_for_user(user_id)
        .map_err(translate_persistence_error)?;
    Ok(RequestListResponse {
        requests: requests.iter().map(RequestInfo::from_request).collect(),
    })
}

/// Lists the pending modification requests of every user the caller
/// manages, oldest first.
///
/// # Errors
///
/// Returns an error when the caller does not manage a team.
pub fn list_pending_requests(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<RequestListResponse, ApiError> {
    AuthorizationService::authorize_team_view(authenticated_actor)?;

    let member_ids: Vec<String> = managed_user_ids(persistence, authenticated_actor)?;
    let requests: Vec<ModificationRequest> = persistence
        .list_pending_requests_for_users(&member_ids)
        .map_err(translate_persistence_error)?;
    Ok(RequestListResponse {
        requests: requests.iter().map(RequestInfo::from_request).collect(),
    })
}

// ---------------------------------------------------------------------------
// Conditional lists
// ---------------------------------------------------------------------------

/// Creates a conditional list. The name is the natural key.
///
/// # Errors
///
/// Returns an error when the caller may not manage reference data, the
/// name is taken or empty, or an item is invalid.
pub fn create_list(
    persistence: &mut Persistence,
    request: CreateListRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ListResponse, ApiError> {
    AuthorizationService::authorize_list_management(authenticated_actor)?;

    let names: Vec<String> = persistence
        .list_names()
        .map_err(translate_persistence_error)?;
    let items: Vec<ConditionalListItem> = request
        .items
        .into_iter()
        .map(ListItemPayload::into_item)
        .collect();
    let state: State = State::new().with_list_names(names);
    let command: Command = Command::CreateList {
        name: request.name,
        description: request.description,
        items,
    };

    let result: TransitionResult = run(&state, command, authenticated_actor, cause)?;
    let message: String = message_of(&result.audit_event);
    let list: ConditionalList = transition_list(result.new_state)?;

    let stored: ConditionalList = persistence
        .create_list(&list, &result.audit_event)
        .map_err(translate_persistence_error)?;
    info!("conditional list '{}' created", stored.name);

    Ok(ListResponse {
        list: ListInfo::from_list(&stored),
        message,
    })
}

/// Appends items to an existing list, optionally skipping exact-triple
/// duplicates.
///
/// # Errors
///
/// Returns an error when the caller may not manage reference data, the
/// list does not exist, or an item is invalid.
pub fn merge_list_items(
    persistence: &mut Persistence,
    request: MergeListItemsRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<MergeListItemsResponse, ApiError> {
    AuthorizationService::authorize_list_management(authenticated_actor)?;

    let list: ConditionalList = load_list(persistence, &request.name)?;
    let before_len: usize = list.items.len();
    let incoming: usize = request.items.len();
    let items: Vec<ConditionalListItem> = request
        .items
        .into_iter()
        .map(ListItemPayload::into_item)
        .collect();

    let state: State = State::new().with_list(list);
    let command: Command = Command::MergeListItems {
        name: request.name,
        items,
        remove_duplicates: request.remove_duplicates,
    };

    let result: TransitionResult = run(&state, command, authenticated_actor, cause)?;
    let message: String = message_of(&result.audit_event);
    let merged: ConditionalList = transition_list(result.new_state)?;
    let added: usize = merged.items.len() - before_len;
    let list_id: i64 = require_list_id(&merged)?;

    persistence
        .update_list_items(list_id, &merged, &result.audit_event)
        .map_err(translate_persistence_error)?;

    Ok(MergeListItemsResponse {
        list: ListInfo::from_list(&merged),
        added,
        skipped: incoming - added,
        message,
    })
}

/// Switches the process-wide active list pointer.
///
/// # Errors
///
/// Returns an error when the caller may not manage reference data or the
/// list does not exist.
pub fn set_active_list(
    persistence: &mut Persistence,
    name: &str,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ListResponse, ApiError> {
    AuthorizationService::authorize_list_management(authenticated_actor)?;

    let list: ConditionalList = load_list(persistence, name)?;
    let mut state: State = State::new().with_list(list);
    if let Some(active) = persistence
        .get_active_list()
        .map_err(translate_persistence_error)?
    {
        state = state.with_active_list(active);
    }

    let command: Command = Command::SetActiveList {
        name: name.to_string(),
    };
    let result: TransitionResult = run(&state, command, authenticated_actor, cause)?;
    let message: String = message_of(&result.audit_event);
    let activated: ConditionalList =
        result
            .new_state
            .active_list
            .ok_or_else(|| ApiError::Internal {
                message: String::from("transition produced no active list"),
            })?;

    persistence
        .set_active_list_name(name, &result.audit_event)
        .map_err(translate_persistence_error)?;
    info!("conditional list '{name}' activated");

    Ok(ListResponse {
        list: ListInfo::from_list(&activated),
        message,
    })
}

/// Soft-deactivates a single list item. The item stays in the list but no
/// longer contributes options.
///
/// # Errors
///
/// Returns an error when the caller may not manage reference data, the
/// list does not exist, or the index is out of range.
pub fn deactivate_list_item(
    persistence: &mut Persistence,
    request: DeactivateListItemRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ListResponse, ApiError> {
    AuthorizationService::authorize_list_management(authenticated_actor)?;

    let list: ConditionalList = load_list(persistence, &request.name)?;
    let state: State = State::new().with_list(list);
    let command: Command = Command::DeactivateListItem {
        name: request.name,
        index: request.index,
    };

    let result: TransitionResult = run(&state, command, authenticated_actor, cause)?;
    let message: String = message_of(&result.audit_event);
    let updated: ConditionalList = transition_list(result.new_state)?;
    let list_id: i64 = require_list_id(&updated)?;

    persistence
        .update_list_items(list_id, &updated, &result.audit_event)
        .map_err(translate_persistence_error)?;

    Ok(ListResponse {
        list: ListInfo::from_list(&updated),
        message,
    })
}

/// Fetches one conditional list by name. Reference data is readable by
/// every authenticated caller.
///
/// # Errors
///
/// Returns an error when the list does not exist.
pub fn get_list(persistence: &mut Persistence, name: &str) -> Result<ListInfo, ApiError> {
    let list: ConditionalList = load_list(persistence, name)?;
    Ok(ListInfo::from_list(&list))
}

/// Lists the known list names and the active pointer.
///
/// # Errors
///
/// Returns an error when the store is unavailable.
pub fn list_names(persistence: &mut Persistence) -> Result<ListNamesResponse, ApiError> {
    let names: Vec<String> = persistence
        .list_names()
        .map_err(translate_persistence_error)?;
    let active: Option<String> = persistence
        .get_active_list_name()
        .map_err(translate_persistence_error)?;
    Ok(ListNamesResponse { names, active })
}

/// Resolves the autocomplete options of the active list.
///
/// # Errors
///
/// Returns an error when no list is currently active.
pub fn resolve_entry_options(
    persistence: &mut Persistence,
) -> Result<OptionsResponse, ApiError> {
    let active: ConditionalList = persistence
        .get_active_list()
        .map_err(translate_persistence_error)?
        .ok_or_else(|| translate_domain_error(DomainError::NoActiveList))?;
    Ok(OptionsResponse::from_options(
        &active.name,
        &resolve_options(&active),
    ))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Registers a user.
///
/// # Errors
///
/// Returns an error when the caller is not an admin, the identifier is
/// taken, the role string is unknown, or the responsible reference is
/// missing or invalid.
pub fn create_user(
    persistence: &mut Persistence,
    request: CreateUserRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<UserResponse, ApiError> {
    AuthorizationService::authorize_user_management(authenticated_actor)?;

    let role: UserRole = UserRole::from_str(&request.role).map_err(translate_domain_error)?;

    let mut state: State = State::new();
    if let Some(existing) = persistence
        .get_user(&request.id)
        .map_err(translate_persistence_error)?
    {
        state = state.with_user(existing);
    }
    if let Some(responsible_id) = &request.responsible_id
        && let Some(responsible) = persistence
            .get_user(responsible_id)
            .map_err(translate_persistence_error)?
    {
        state = state.with_responsible(responsible);
    }

    let command: Command = Command::CreateUser {
        id: request.id,
        name: request.name,
        email: request.email,
        role,
        responsible_id: request.responsible_id,
    };
    let result: TransitionResult = run(&state, command, authenticated_actor, cause)?;
    let message: String = message_of(&result.audit_event);
    let user: User = transition_user(result.new_state)?;

    persistence
        .create_user(&user, &result.audit_event)
        .map_err(translate_persistence_error)?;
    info!("user '{}' registered as {}", user.id, user.role);

    Ok(UserResponse {
        user: UserInfo::from_user(&user),
        message,
    })
}

/// Updates a user's mutable profile fields.
///
/// # Errors
///
/// Returns an error when the caller is neither the user nor an admin, or
/// the user does not exist.
pub fn update_user(
    persistence: &mut Persistence,
    request: UpdateUserRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<UserResponse, ApiError> {
    AuthorizationService::authorize_profile_update(authenticated_actor, &request.id)?;

    let current: User = load_user(persistence, &request.id)?;
    let state: State = State::new().with_user(current);
    let command: Command = Command::UpdateUser {
        id: request.id.clone(),
        name: request.name,
        email: request.email,
    };

    let result: TransitionResult = run(&state, command, authenticated_actor, cause)?;
    let message: String = message_of(&result.audit_event);
    let updated: User = transition_user(result.new_state)?;

    let rows: usize = persistence
        .update_user_profile(&updated, &result.audit_event)
        .map_err(translate_persistence_error)?;
    if rows == 0 {
        return Err(not_found_user(&request.id));
    }

    Ok(UserResponse {
        user: UserInfo::from_user(&updated),
        message,
    })
}

/// Activates or deactivates a user.
///
/// # Errors
///
/// Returns an error when the caller is not an admin, the status string is
/// unknown, or the user does not exist.
pub fn set_user_status(
    persistence: &mut Persistence,
    request: SetUserStatusRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<UserResponse, ApiError> {
    AuthorizationService::authorize_user_management(authenticated_actor)?;

    let status: UserStatus =
        UserStatus::from_str(&request.status).map_err(translate_domain_error)?;
    let current: User = load_user(persistence, &request.id)?;
    let state: State = State::new().with_user(current);
    let command: Command = Command::SetUserStatus {
        id: request.id.clone(),
        status,
    };

    let result: TransitionResult = run(&state, command, authenticated_actor, cause)?;
    let message: String = message_of(&result.audit_event);
    let updated: User = transition_user(result.new_state)?;

    let rows: usize = persistence
        .update_user(&updated, &result.audit_event)
        .map_err(translate_persistence_error)?;
    if rows == 0 {
        return Err(not_found_user(&request.id));
    }
    info!("user '{}' set {}", request.id, status.as_str());

    Ok(UserResponse {
        user: UserInfo::from_user(&updated),
        message,
    })
}

/// Fetches one user.
///
/// # Errors
///
/// Returns an error when the user does not exist or the caller may not
/// see them.
pub fn get_user(
    persistence: &mut Persistence,
    user_id: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<UserInfo, ApiError> {
    let user: User = load_user(persistence, user_id)?;
    AuthorizationService::authorize_record_view(authenticated_actor, &user)?;
    Ok(UserInfo::from_user(&user))
}

/// Lists every known user.
///
/// # Errors
///
/// Returns an error when the caller is not an admin.
pub fn list_users(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<UserListResponse, ApiError> {
    AuthorizationService::authorize_user_management(authenticated_actor)?;

    let users: Vec<User> = persistence
        .list_users()
        .map_err(translate_persistence_error)?;
    Ok(UserListResponse {
        users: users.iter().map(UserInfo::from_user).collect(),
    })
}

/// Lists the caller's direct reports.
///
/// # Errors
///
/// Returns an error when the caller does not manage a team.
pub fn list_team(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<UserListResponse, ApiError> {
    AuthorizationService::authorize_team_view(authenticated_actor)?;

    let members: Vec<User> = managed_users(persistence, authenticated_actor)?;
    Ok(UserListResponse {
        users: members.iter().map(UserInfo::from_user).collect(),
    })
}

// ---------------------------------------------------------------------------
// Audit
// ---------------------------------------------------------------------------

/// Reads the audit trail of one record, oldest event first.
///
/// # Errors
///
/// Returns an error when the caller is not an admin.
pub fn get_audit_trail(
    persistence: &mut Persistence,
    resource_type: &str,
    resource_id: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<AuditTrailResponse, ApiError> {
    AuthorizationService::authorize_audit_access(authenticated_actor)?;

    let events: Vec<AuditEvent> = persistence
        .list_audit_events_for(resource_type, resource_id)
        .map_err(translate_persistence_error)?;
    Ok(AuditTrailResponse {
        resource_type: resource_type.to_string(),
        resource_id: resource_id.to_string(),
        events: events.iter().map(AuditEventInfo::from_event).collect(),
    })
}

// ---------------------------------------------------------------------------
// Shared plumbing
// ---------------------------------------------------------------------------

fn run(
    state: &State,
    command: Command,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<TransitionResult, ApiError> {
    apply(
        state,
        command,
        authenticated_actor.to_audit_actor(),
        cause,
        Utc::now(),
    )
    .map_err(translate_core_error)
}

fn message_of(event: &AuditEvent) -> String {
    event
        .action
        .details
        .clone()
        .unwrap_or_else(|| event.action.name.clone())
}

fn managed_users(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<Vec<User>, ApiError> {
    if authenticated_actor.role == UserRole::Admin {
        return persistence.list_users().map_err(translate_persistence_error);
    }
    persistence
        .list_team(&authenticated_actor.id)
        .map_err(translate_persistence_error)
}

fn managed_user_ids(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<Vec<String>, ApiError> {
    Ok(managed_users(persistence, authenticated_actor)?
        .into_iter()
        .map(|user| user.id)
        .collect())
}

fn load_entry(persistence: &mut Persistence, entry_id: i64) -> Result<PointageEntry, ApiError> {
    persistence
        .get_entry(entry_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| not_found_entry(entry_id))
}

fn load_request(
    persistence: &mut Persistence,
    request_id: i64,
) -> Result<ModificationRequest, ApiError> {
    persistence
        .get_request(request_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("modification_request"),
            message: format!("Modification request {request_id} not found"),
        })
}

fn load_list(persistence: &mut Persistence, name: &str) -> Result<ConditionalList, ApiError> {
    persistence
        .get_list_by_name(name)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("conditional_list"),
            message: format!("Conditional list '{name}' not found"),
        })
}

fn load_user(persistence: &mut Persistence, user_id: &str) -> Result<User, ApiError> {
    persistence
        .get_user(user_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| not_found_user(user_id))
}

fn transition_entry(new_state: State) -> Result<PointageEntry, ApiError> {
    new_state.entry.ok_or_else(|| ApiError::Internal {
        message: String::from("transition produced no entry"),
    })
}

fn transition_request(new_state: State) -> Result<ModificationRequest, ApiError> {
    new_state.request.ok_or_else(|| ApiError::Internal {
        message: String::from("transition produced no modification request"),
    })
}

fn transition_request_from(new_state: &State) -> Result<ModificationRequest, ApiError> {
    new_state
        .request
        .clone()
        .ok_or_else(|| ApiError::Internal {
            message: String::from("transition produced no modification request"),
        })
}

fn transition_list(new_state: State) -> Result<ConditionalList, ApiError> {
    new_state.list.ok_or_else(|| ApiError::Internal {
        message: String::from("transition produced no conditional list"),
    })
}

fn transition_user(new_state: State) -> Result<User, ApiError> {
    new_state.user.ok_or_else(|| ApiError::Internal {
        message: String::from("transition produced no user"),
    })
}

fn require_list_id(list: &ConditionalList) -> Result<i64, ApiError> {
    list.id.ok_or_else(|| ApiError::Internal {
        message: format!("conditional list '{}' has no stored identifier", list.name),
    })
}

fn not_found_entry(entry_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("entry"),
        message: format!("Pointage entry {entry_id} not found"),
    }
}

fn not_found_user(user_id: &str) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("user"),
        message: format!("User '{user_id}' not found"),
    }
}

fn entry_conflict(entry_id: i64) -> ApiError {
    ApiError::Conflict {
        message: format!("Entry {entry_id} was modified concurrently"),
    }
}
