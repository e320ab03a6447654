// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;
use pointage_domain::{
    ConditionalListItem, EntryFields, EntryPatch, EntryStatus, ReviewDecision, UserRole,
    UserStatus,
};

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new draft pointage entry.
    CreateEntry {
        /// The owning user.
        user_id: String,
        /// The tracked calendar day.
        date_pointage: NaiveDate,
        /// The payload fields.
        fields: EntryFields,
    },
    /// Replace the payload of a draft entry.
    UpdateEntry {
        /// The entry identifier.
        entry_id: i64,
        /// The replacement payload.
        fields: EntryFields,
    },
    /// Transition a draft entry to submitted. One-way lock.
    SubmitEntry {
        /// The entry identifier.
        entry_id: i64,
    },
    /// Role-gated status override, outside the normal workflow.
    SetEntryStatus {
        /// The entry identifier.
        entry_id: i64,
        /// The target status.
        status: EntryStatus,
    },
    /// Soft-delete an entry.
    DeleteEntry {
        /// The entry identifier.
        entry_id: i64,
    },
    /// Soft-archive an entry.
    ArchiveEntry {
        /// The entry identifier.
        entry_id: i64,
    },
    /// Clear the soft-delete and soft-archive flags.
    RestoreEntry {
        /// The entry identifier.
        entry_id: i64,
    },
    /// Propose a change to a locked entry.
    CreateModificationRequest {
        /// The target entry.
        entry_id: i64,
        /// The requesting user.
        user_id: String,
        /// The proposed new values.
        requested_data: EntryPatch,
        /// Optional requester comment.
        comment: Option<String>,
    },
    /// Record the single decision on a pending modification request.
    ReviewModificationRequest {
        /// The request identifier.
        request_id: i64,
        /// The reviewer's decision.
        decision: ReviewDecision,
        /// Optional reviewer comment.
        review_comment: Option<String>,
    },
    /// Create a new conditional list. The name is the natural key.
    CreateList {
        /// The unique list name.
        name: String,
        /// Optional description.
        description: Option<String>,
        /// The initial items.
        items: Vec<ConditionalListItem>,
    },
    /// Append items to a named conditional list.
    MergeListItems {
        /// The target list name.
        name: String,
        /// The incoming items.
        items: Vec<ConditionalListItem>,
        /// Skip incoming items matching an existing triple exactly.
        remove_duplicates: bool,
    },
    /// Switch the process-wide active list pointer.
    SetActiveList {
        /// The list to activate.
        name: String,
    },
    /// Soft-deactivate a single list item.
    DeactivateListItem {
        /// The target list name.
        name: String,
        /// The zero-based item index.
        index: usize,
    },
    /// Register a new user.
    CreateUser {
        /// The externally-assigned identifier.
        id: String,
        /// Display name.
        name: String,
        /// Contact email.
        email: String,
        /// Role classification.
        role: UserRole,
        /// The managing responsible, for collaborators.
        responsible_id: Option<String>,
    },
    /// Update a user's mutable profile fields.
    UpdateUser {
        /// The user identifier.
        id: String,
        /// Replacement display name.
        name: String,
        /// Replacement contact email.
        email: String,
    },
    /// Activate or deactivate a user.
    SetUserStatus {
        /// The user identifier.
        id: String,
        /// The target status.
        status: UserStatus,
    },
}
