// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API surface.
//!
//! Requests carry raw caller input (dates and statuses as strings) and are
//! validated by the transition engine; responses carry flattened,
//! serialization-friendly views of the domain records.

use chrono::{DateTime, Utc};
use pointage_audit::AuditEvent;
use pointage_domain::{
    ConditionalList, ConditionalListItem, EntryFields, EntryPatch, LcOption, LcOptions,
    ModificationRequest, PointageEntry, User,
};

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

fn format_optional_timestamp(ts: Option<DateTime<Utc>>) -> Option<String> {
    ts.map(format_timestamp)
}

// ---------------------------------------------------------------------------
// Entry payloads
// ---------------------------------------------------------------------------

/// The payload fields of an entry, as sent and returned on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EntryPayload {
    /// Imputation key from the active conditional list.
    pub clef_imputation: String,
    /// Label from the active conditional list.
    pub libelle: String,
    /// Function code from the active conditional list.
    pub fonction: String,
    /// Free-form need date.
    pub date_besoin: String,
    /// Theoretical hours, numeric-as-string.
    pub heures_theoriques: String,
    /// Spent hours, numeric-as-string.
    pub heures_passees: String,
    /// Free-text comments. Optional.
    #[serde(default)]
    pub commentaires: String,
}

impl EntryPayload {
    /// Converts the payload into domain entry fields.
    #[must_use]
    pub fn into_fields(self) -> EntryFields {
        EntryFields {
            clef_imputation: self.clef_imputation,
            libelle: self.libelle,
            fonction: self.fonction,
            date_besoin: self.date_besoin,
            heures_theoriques: self.heures_theoriques,
            heures_passees: self.heures_passees,
            commentaires: self.commentaires,
        }
    }

    /// Builds a payload view from domain entry fields.
    #[must_use]
    pub fn from_fields(fields: &EntryFields) -> Self {
        Self {
            clef_imputation: fields.clef_imputation.clone(),
            libelle: fields.libelle.clone(),
            fonction: fields.fonction.clone(),
            date_besoin: fields.date_besoin.clone(),
            heures_theoriques: fields.heures_theoriques.clone(),
            heures_passees: fields.heures_passees.clone(),
            commentaires: fields.commentaires.clone(),
        }
    }
}

/// A partial edit to an entry payload. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EntryPatchPayload {
    /// Replacement imputation key, if any.
    pub clef_imputation: Option<String>,
    /// Replacement label, if any.
    pub libelle: Option<String>,
    /// Replacement function code, if any.
    pub fonction: Option<String>,
    /// Replacement need date, if any.
    pub date_besoin: Option<String>,
    /// Replacement theoretical hours, if any.
    pub heures_theoriques: Option<String>,
    /// Replacement spent hours, if any.
    pub heures_passees: Option<String>,
    /// Replacement comments, if any.
    pub commentaires: Option<String>,
}

impl EntryPatchPayload {
    /// Converts the payload into a domain entry patch.
    #[must_use]
    pub fn into_patch(self) -> EntryPatch {
        EntryPatch {
            clef_imputation: self.clef_imputation,
            libelle: self.libelle,
            fonction: self.fonction,
            date_besoin: self.date_besoin,
            heures_theoriques: self.heures_theoriques,
            heures_passees: self.heures_passees,
            commentaires: self.commentaires,
        }
    }

    /// Builds a payload view from a domain entry patch.
    #[must_use]
    pub fn from_patch(patch: &EntryPatch) -> Self {
        Self {
            clef_imputation: patch.clef_imputation.clone(),
            libelle: patch.libelle.clone(),
            fonction: patch.fonction.clone(),
            date_besoin: patch.date_besoin.clone(),
            heures_theoriques: patch.heures_theoriques.clone(),
            heures_passees: patch.heures_passees.clone(),
            commentaires: patch.commentaires.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Entry requests and responses
// ---------------------------------------------------------------------------

/// Request to create a draft entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateEntryRequest {
    /// The owning user.
    pub user_id: String,
    /// The tracked calendar day, `YYYY-MM-DD`.
    pub date_pointage: String,
    /// The payload fields.
    pub payload: EntryPayload,
}

/// Request to replace the payload of a draft entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateEntryRequest {
    /// The entry identifier.
    pub entry_id: i64,
    /// The replacement payload.
    pub payload: EntryPayload,
}

/// Request to override an entry's lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetEntryStatusRequest {
    /// The entry identifier.
    pub entry_id: i64,
    /// The target status, one of `draft`, `submitted`, `validated`,
    /// `rejected`.
    pub status: String,
}

/// A flattened view of a persisted entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EntryInfo {
    /// The store-assigned identifier.
    pub id: Option<i64>,
    /// The owning user.
    pub user_id: String,
    /// The tracked calendar day, `YYYY-MM-DD`.
    pub date_pointage: String,
    /// Week label derived from the pointage date.
    pub week_label: String,
    /// The payload fields.
    pub payload: EntryPayload,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
    /// Last mutation timestamp, RFC 3339.
    pub updated_at: String,
    /// Submission timestamp, RFC 3339, if submitted.
    pub submitted_at: Option<String>,
    /// Validation timestamp, RFC 3339, if validated.
    pub validated_at: Option<String>,
    /// The validator's user identifier, if validated.
    pub validated_by: Option<String>,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// Soft-archive flag.
    pub is_archived: bool,
}

impl EntryInfo {
    /// Builds the wire view of an entry.
    #[must_use]
    pub fn from_entry(entry: &PointageEntry) -> Self {
        Self {
            id: entry.id,
            user_id: entry.user_id.clone(),
            date_pointage: entry.date_pointage.format("%Y-%m-%d").to_string(),
            week_label: entry.week_label.clone(),
            payload: EntryPayload::from_fields(&entry.fields),
            status: entry.status.as_str().to_string(),
            created_at: format_timestamp(entry.created_at),
            updated_at: format_timestamp(entry.updated_at),
            submitted_at: format_optional_timestamp(entry.submitted_at),
            validated_at: format_optional_timestamp(entry.validated_at),
            validated_by: entry.validated_by.clone(),
            is_deleted: entry.is_deleted,
            is_archived: entry.is_archived,
        }
    }
}

/// Response carrying a single entry and the action outcome.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EntryResponse {
    /// The entry after the operation.
    pub entry: EntryInfo,
    /// A human-readable description of what happened.
    pub message: String,
}

/// Response carrying a sequence of entries.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EntryListResponse {
    /// The matching entries, newest pointage date first.
    pub entries: Vec<EntryInfo>,
}

// ---------------------------------------------------------------------------
// Modification request DTOs
// ---------------------------------------------------------------------------

/// Request to open a modification request against a locked entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateModificationRequestRequest {
    /// The target entry.
    pub entry_id: i64,
    /// The proposed new values.
    pub requested_data: EntryPatchPayload,
    /// Optional requester comment.
    pub comment: Option<String>,
}

/// Request to record the decision on a pending modification request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReviewModificationRequestRequest {
    /// The request identifier.
    pub request_id: i64,
    /// The decision, `approved` or `rejected`.
    pub decision: String,
    /// Optional reviewer comment.
    pub review_comment: Option<String>,
}

/// A flattened view of a persisted modification request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RequestInfo {
    /// The store-assigned identifier.
    pub id: Option<i64>,
    /// The target entry.
    pub entry_id: i64,
    /// The requesting user.
    pub user_id: String,
    /// The proposed new values.
    pub requested_data: EntryPatchPayload,
    /// The entry's payload at request time.
    pub current_data: EntryPayload,
    /// Optional requester comment.
    pub comment: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
    /// Decision timestamp, RFC 3339, once decided.
    pub reviewed_at: Option<String>,
    /// The reviewer's user identifier, once decided.
    pub reviewed_by: Option<String>,
    /// Optional reviewer comment.
    pub review_comment: Option<String>,
}

impl RequestInfo {
    /// Builds the wire view of a modification request.
    #[must_use]
    pub fn from_request(request: &ModificationRequest) -> Self {
        Self {
            id: request.id,
            entry_id: request.entry_id,
            user_id: request.user_id.clone(),
            requested_data: EntryPatchPayload::from_patch(&request.requested_data),
            current_data: EntryPayload::from_fields(&request.current_data),
            comment: request.comment.clone(),
            status: request.status.as_str().to_string(),
            created_at: format_timestamp(request.created_at),
            reviewed_at: format_optional_timestamp(request.reviewed_at),
            reviewed_by: request.reviewed_by.clone(),
            review_comment: request.review_comment.clone(),
        }
    }
}

/// Response carrying a single modification request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RequestResponse {
    /// The request after the operation.
    pub request: RequestInfo,
    /// A human-readable description of what happened.
    pub message: String,
}

/// Response to a review decision.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReviewResponse {
    /// The decided request.
    pub request: RequestInfo,
    /// The patched entry, present only for approvals.
    pub entry: Option<EntryInfo>,
    /// A human-readable description of what happened.
    pub message: String,
}

/// Response carrying a sequence of modification requests.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RequestListResponse {
    /// The matching requests.
    pub requests: Vec<RequestInfo>,
}

// ---------------------------------------------------------------------------
// Conditional list DTOs
// ---------------------------------------------------------------------------

/// One reference triple, as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListItemPayload {
    /// Imputation key.
    pub clef_imputation: String,
    /// Label.
    pub libelle: String,
    /// Function code.
    #[serde(default)]
    pub fonction: String,
}

impl ListItemPayload {
    /// Converts the payload into an active domain list item.
    #[must_use]
    pub fn into_item(self) -> ConditionalListItem {
        ConditionalListItem {
            clef_imputation: self.clef_imputation,
            libelle: self.libelle,
            fonction: self.fonction,
            is_active: true,
        }
    }
}

/// Request to create a conditional list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateListRequest {
    /// The unique list name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// The initial items.
    pub items: Vec<ListItemPayload>,
}

/// Request to append items to an existing list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MergeListItemsRequest {
    /// The target list name.
    pub name: String,
    /// The incoming items.
    pub items: Vec<ListItemPayload>,
    /// Skip incoming items whose triple already exists in the list.
    pub remove_duplicates: bool,
}

/// Request to soft-deactivate one list item.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeactivateListItemRequest {
    /// The target list name.
    pub name: String,
    /// The zero-based item index.
    pub index: usize,
}

/// A flattened view of one stored list item.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListItemInfo {
    /// Imputation key.
    pub clef_imputation: String,
    /// Label.
    pub libelle: String,
    /// Function code.
    pub fonction: String,
    /// Whether the item participates in option resolution.
    pub is_active: bool,
}

impl ListItemInfo {
    /// Builds the wire view of a list item.
    #[must_use]
    pub fn from_item(item: &ConditionalListItem) -> Self {
        Self {
            clef_imputation: item.clef_imputation.clone(),
            libelle: item.libelle.clone(),
            fonction: item.fonction.clone(),
            is_active: item.is_active,
        }
    }
}

/// A flattened view of a persisted conditional list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListInfo {
    /// The store-assigned identifier.
    pub id: Option<i64>,
    /// The unique list name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// The items, in insertion order.
    pub items: Vec<ListItemInfo>,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
    /// Last mutation timestamp, RFC 3339.
    pub updated_at: String,
}

impl ListInfo {
    /// Builds the wire view of a conditional list.
    #[must_use]
    pub fn from_list(list: &ConditionalList) -> Self {
        Self {
            id: list.id,
            name: list.name.clone(),
            description: list.description.clone(),
            items: list.items.iter().map(ListItemInfo::from_item).collect(),
            created_at: format_timestamp(list.created_at),
            updated_at: format_timestamp(list.updated_at),
        }
    }
}

/// Response carrying a single conditional list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListResponse {
    /// The list after the operation.
    pub list: ListInfo,
    /// A human-readable description of what happened.
    pub message: String,
}

/// Response to a merge of items into a list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MergeListItemsResponse {
    /// The list after the merge.
    pub list: ListInfo,
    /// How many incoming items were appended.
    pub added: usize,
    /// How many incoming items were skipped as duplicates.
    pub skipped: usize,
    /// A human-readable description of what happened.
    pub message: String,
}

/// Response carrying the known list names.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListNamesResponse {
    /// All list names, sorted.
    pub names: Vec<String>,
    /// The currently active list name, if any.
    pub active: Option<String>,
}

/// One autocomplete option on the wire.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OptionInfo {
    /// The raw field value.
    pub value: String,
    /// The display label.
    pub label: String,
    /// Always true for resolved options.
    pub active: bool,
}

impl OptionInfo {
    fn from_option(option: &LcOption) -> Self {
        Self {
            value: option.value.clone(),
            label: option.label.clone(),
            active: option.active,
        }
    }
}

/// De-duplicated autocomplete options for the three reference fields.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OptionsResponse {
    /// The list the options were resolved from.
    pub list_name: String,
    /// Distinct imputation keys.
    pub clef_imputation: Vec<OptionInfo>,
    /// Distinct labels.
    pub libelle: Vec<OptionInfo>,
    /// Distinct function codes.
    pub fonction: Vec<OptionInfo>,
}

impl OptionsResponse {
    /// Builds the wire view of resolved options.
    #[must_use]
    pub fn from_options(list_name: &str, options: &LcOptions) -> Self {
        Self {
            list_name: list_name.to_string(),
            clef_imputation: options
                .clef_imputation
                .iter()
                .map(OptionInfo::from_option)
                .collect(),
            libelle: options.libelle.iter().map(OptionInfo::from_option).collect(),
            fonction: options
                .fonction
                .iter()
                .map(OptionInfo::from_option)
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// User DTOs
// ---------------------------------------------------------------------------

/// Request to register a user.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateUserRequest {
    /// The externally-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Role, one of `collaborator`, `responsible`, `admin`.
    pub role: String,
    /// The managing responsible. Required for collaborators.
    pub responsible_id: Option<String>,
}

/// Request to update a user's mutable profile fields.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateUserRequest {
    /// The user identifier.
    pub id: String,
    /// Replacement display name.
    pub name: String,
    /// Replacement contact email.
    pub email: String,
}

/// Request to activate or deactivate a user.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetUserStatusRequest {
    /// The user identifier.
    pub id: String,
    /// The target status, `active` or `inactive`.
    pub status: String,
}

/// A flattened view of a persisted user.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserInfo {
    /// The externally-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Role classification.
    pub role: String,
    /// Activation status.
    pub status: String,
    /// The managing responsible, for collaborators.
    pub responsible_id: Option<String>,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
    /// Last mutation timestamp, RFC 3339.
    pub updated_at: String,
}

impl UserInfo {
    /// Builds the wire view of a user.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            status: user.status.as_str().to_string(),
            responsible_id: user.responsible_id.clone(),
            created_at: format_timestamp(user.created_at),
            updated_at: format_timestamp(user.updated_at),
        }
    }
}

/// Response carrying a single user.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserResponse {
    /// The user after the operation.
    pub user: UserInfo,
    /// A human-readable description of what happened.
    pub message: String,
}

/// Response carrying a sequence of users.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserListResponse {
    /// The matching users.
    pub users: Vec<UserInfo>,
}

// ---------------------------------------------------------------------------
// Audit DTOs
// ---------------------------------------------------------------------------

/// A flattened view of one audit event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditEventInfo {
    /// The acting user identifier.
    pub actor_id: String,
    /// The actor's role at the time of the action.
    pub actor_type: String,
    /// The cause identifier.
    pub cause_id: String,
    /// The cause description.
    pub cause_description: String,
    /// The action name.
    pub action: String,
    /// Optional action detail.
    pub details: Option<String>,
    /// Serialized record state before the transition.
    pub before: String,
    /// Serialized record state after the transition.
    pub after: String,
    /// The kind of record touched.
    pub resource_type: String,
    /// The identifier of the touched record.
    pub resource_id: String,
}

impl AuditEventInfo {
    /// Builds the wire view of an audit event.
    #[must_use]
    pub fn from_event(event: &AuditEvent) -> Self {
        Self {
            actor_id: event.actor.id.clone(),
            actor_type: event.actor.actor_type.clone(),
            cause_id: event.cause.id.clone(),
            cause_description: event.cause.description.clone(),
            action: event.action.name.clone(),
            details: event.action.details.clone(),
            before: event.before.data.clone(),
            after: event.after.data.clone(),
            resource_type: event.resource_type.clone(),
            resource_id: event.resource_id.clone(),
        }
    }
}

/// Response carrying the audit trail of one record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditTrailResponse {
    /// The kind of record addressed.
    pub resource_type: String,
    /// The identifier of the addressed record.
    pub resource_id: String,
    /// The events, oldest first.
    pub events: Vec<AuditEventInfo>,
}
