// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pointage::CoreError;
use pointage_domain::DomainError;
use pointage_persistence::PersistenceError;

/// Errors that can occur during authentication or authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The caller could not be identified.
    AuthenticationFailed {
        /// Why authentication failed.
        reason: String,
    },
    /// The caller is identified but lacks the required role.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for the action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(
                    f,
                    "Unauthorized: action '{action}' requires role '{required_role}'"
                )
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Errors surfaced to API callers.
///
/// Every lower-layer error is translated into one of these variants so the
/// outer surface can map them to transport-level responses uniformly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The caller could not be identified.
    AuthenticationFailed {
        /// Why authentication failed.
        reason: String,
    },
    /// The caller lacks the required role for the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for the action.
        required_role: String,
    },
    /// A domain rule refused the operation.
    DomainRuleViolation {
        /// A stable identifier for the violated rule.
        rule: String,
        /// Human-readable detail.
        message: String,
    },
    /// A request field is missing or malformed.
    InvalidInput {
        /// The offending field.
        field: String,
        /// Human-readable detail.
        message: String,
    },
    /// The addressed record does not exist.
    ResourceNotFound {
        /// The kind of record addressed.
        resource_type: String,
        /// Human-readable detail.
        message: String,
    },
    /// The operation lost a race or collided with existing state.
    Conflict {
        /// Human-readable detail.
        message: String,
    },
    /// An unexpected internal failure.
    Internal {
        /// Human-readable detail.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(
                    f,
                    "Unauthorized: action '{action}' requires role '{required_role}'"
                )
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule '{rule}' violated: {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into the API error vocabulary.
///
/// The match is exhaustive on purpose: adding a domain error without
/// deciding its API classification must not compile.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::MissingField { field } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        DomainError::InvalidHours { field, .. } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        DomainError::DateParseError { .. } => ApiError::InvalidInput {
            field: String::from("date_pointage"),
            message,
        },
        DomainError::EntryNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("entry"),
            message,
        },
        DomainError::EntryLocked { .. } => ApiError::DomainRuleViolation {
            rule: String::from("entry_locked"),
            message,
        },
        DomainError::InvalidTransition { .. } => ApiError::DomainRuleViolation {
            rule: String::from("entry_lifecycle"),
            message,
        },
        DomainError::InvalidEntryStatus(_) => ApiError::InvalidInput {
            field: String::from("status"),
            message,
        },
        DomainError::RequestNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("modification_request"),
            message,
        },
        DomainError::AlreadyReviewed { .. } | DomainError::PendingRequestExists { .. } => {
            ApiError::Conflict { message }
        }
        DomainError::InvalidRequestStatus(_) => ApiError::InvalidInput {
            field: String::from("decision"),
            message,
        },
        DomainError::DraftEntryPrecondition { .. } => ApiError::DomainRuleViolation {
            rule: String::from("request_precondition"),
            message,
        },
        DomainError::StaleReference { .. } => ApiError::DomainRuleViolation {
            rule: String::from("active_reference"),
            message,
        },
        DomainError::ListNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("conditional_list"),
            message,
        },
        DomainError::DuplicateListName(_) | DomainError::DuplicateUser(_) => {
            ApiError::Conflict { message }
        }
        DomainError::InvalidListName(_) => ApiError::InvalidInput {
            field: String::from("name"),
            message,
        },
        DomainError::InvalidListItem { .. } => ApiError::InvalidInput {
            field: String::from("items"),
            message,
        },
        DomainError::ItemIndexOutOfRange { .. } => ApiError::InvalidInput {
            field: String::from("index"),
            message,
        },
        DomainError::NoActiveList => ApiError::DomainRuleViolation {
            rule: String::from("active_list_required"),
            message,
        },
        DomainError::UserNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("user"),
            message,
        },
        DomainError::InvalidUserRole(_) => ApiError::InvalidInput {
            field: String::from("role"),
            message,
        },
        DomainError::InvalidUserStatus(_) => ApiError::InvalidInput {
            field: String::from("status"),
            message,
        },
        DomainError::MissingResponsible { .. } | DomainError::UnexpectedResponsible { .. } => {
            ApiError::DomainRuleViolation {
                rule: String::from("responsible_reference"),
                message,
            }
        }
        DomainError::ResponsibleNotFound(_) => ApiError::InvalidInput {
            field: String::from("responsible_id"),
            message,
        },
    }
}

/// Translates a transition engine error into the API error vocabulary.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(message) => ApiError::Internal { message },
    }
}

/// Translates a persistence error into the API error vocabulary.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("record"),
            message,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
