// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::entry::EntryStatus;
use crate::request::RequestStatus;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required payload field is empty or missing.
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },
    /// An hours field does not parse as a non-negative number.
    InvalidHours {
        /// The name of the hours field.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Pointage entry does not exist.
    EntryNotFound(i64),
    /// Mutation attempted on an entry that is no longer a draft.
    EntryLocked {
        /// The entry identifier.
        entry_id: i64,
        /// The status that locks the entry.
        status: EntryStatus,
    },
    /// Lifecycle transition attempted from a state that does not permit it.
    InvalidTransition {
        /// The entry identifier.
        entry_id: i64,
        /// The current status.
        from: EntryStatus,
        /// The requested status.
        to: EntryStatus,
    },
    /// Entry status string is not one of the known values.
    InvalidEntryStatus(String),
    /// Modification request does not exist.
    RequestNotFound(i64),
    /// A decision was already recorded for this modification request.
    AlreadyReviewed {
        /// The request identifier.
        request_id: i64,
        /// The recorded decision.
        status: RequestStatus,
    },
    /// Modification request status string is not one of the known values.
    InvalidRequestStatus(String),
    /// A modification request targets a draft entry.
    DraftEntryPrecondition {
        /// The entry identifier.
        entry_id: i64,
    },
    /// A pending modification request already exists for the entry.
    PendingRequestExists {
        /// The entry identifier.
        entry_id: i64,
    },
    /// A requested reference code is no longer an active option.
    StaleReference {
        /// The payload field holding the reference.
        field: &'static str,
        /// The rejected code.
        value: String,
    },
    /// Conditional list does not exist.
    ListNotFound(String),
    /// Conditional list name is already taken.
    DuplicateListName(String),
    /// Conditional list name is empty or invalid.
    InvalidListName(String),
    /// Conditional list item failed validation.
    InvalidListItem {
        /// The zero-based index of the item in its batch.
        index: usize,
        /// Description of the validation failure.
        reason: &'static str,
    },
    /// List item index is out of range.
    ItemIndexOutOfRange {
        /// The list name.
        list: String,
        /// The rejected index.
        index: usize,
    },
    /// No conditional list is currently active.
    NoActiveList,
    /// User does not exist.
    UserNotFound(String),
    /// User identifier is already taken.
    DuplicateUser(String),
    /// User role string is not one of the known values.
    InvalidUserRole(String),
    /// User status string is not one of the known values.
    InvalidUserStatus(String),
    /// A collaborator is missing its responsible back-reference.
    MissingResponsible {
        /// The collaborator's user identifier.
        user_id: String,
    },
    /// A responsible or admin carries a responsible back-reference.
    UnexpectedResponsible {
        /// The user identifier.
        user_id: String,
    },
    /// The referenced responsible does not exist or cannot manage users.
    ResponsibleNotFound(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "Required field '{field}' is missing"),
            Self::InvalidHours { field, value } => {
                write!(
                    f,
                    "Invalid hours value '{value}' for field '{field}'. Must be a non-negative number"
                )
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::EntryNotFound(id) => write!(f, "Pointage entry {id} not found"),
            Self::EntryLocked { entry_id, status } => {
                write!(
                    f,
                    "Cannot update entry {entry_id}: it is {} and locked",
                    status.as_str()
                )
            }
            Self::InvalidTransition { entry_id, from, to } => {
                write!(
                    f,
                    "Entry {entry_id} cannot transition from {} to {}",
                    from.as_str(),
                    to.as_str()
                )
            }
            Self::InvalidEntryStatus(value) => write!(f, "Invalid entry status: {value}"),
            Self::RequestNotFound(id) => write!(f, "Modification request {id} not found"),
            Self::AlreadyReviewed { request_id, status } => {
                write!(
                    f,
                    "Modification request {request_id} was already {}",
                    status.as_str()
                )
            }
            Self::InvalidRequestStatus(value) => write!(f, "Invalid request status: {value}"),
            Self::DraftEntryPrecondition { entry_id } => {
                write!(
                    f,
                    "Entry {entry_id} is still a draft and must be edited directly"
                )
            }
            Self::PendingRequestExists { entry_id } => {
                write!(
                    f,
                    "A pending modification request already exists for entry {entry_id}"
                )
            }
            Self::StaleReference { field, value } => {
                write!(f, "Reference '{value}' for field '{field}' is not active")
            }
            Self::ListNotFound(name) => write!(f, "Conditional list '{name}' not found"),
            Self::DuplicateListName(name) => {
                write!(f, "Conditional list '{name}' already exists")
            }
            Self::InvalidListName(msg) => write!(f, "Invalid list name: {msg}"),
            Self::InvalidListItem { index, reason } => {
                write!(f, "Invalid list item at index {index}: {reason}")
            }
            Self::ItemIndexOutOfRange { list, index } => {
                write!(f, "Item index {index} is out of range for list '{list}'")
            }
            Self::NoActiveList => write!(f, "No conditional list is currently active"),
            Self::UserNotFound(id) => write!(f, "User '{id}' not found"),
            Self::DuplicateUser(id) => write!(f, "User '{id}' already exists"),
            Self::InvalidUserRole(value) => write!(f, "Invalid user role: {value}"),
            Self::InvalidUserStatus(value) => write!(f, "Invalid user status: {value}"),
            Self::MissingResponsible { user_id } => {
                write!(f, "Collaborator '{user_id}' must reference a responsible")
            }
            Self::UnexpectedResponsible { user_id } => {
                write!(
                    f,
                    "User '{user_id}' cannot carry a responsible back-reference"
                )
            }
            Self::ResponsibleNotFound(id) => {
                write!(f, "Responsible '{id}' not found or cannot manage users")
            }
        }
    }
}

impl std::error::Error for DomainError {}
