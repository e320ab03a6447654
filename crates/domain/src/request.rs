// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Modification request types and their single-decision lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::{EntryFields, EntryPatch};
use crate::error::DomainError;

/// Lifecycle status of a modification request.
///
/// A request receives exactly one decision. `Approved` and `Rejected` are
/// terminal and never revocable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting a reviewer decision.
    Pending,
    /// Approved; the requested changes were applied to the entry.
    Approved,
    /// Rejected; the entry was left untouched.
    Rejected,
}

impl RequestStatus {
    /// Returns true once a decision has been recorded.
    #[must_use]
    pub const fn is_decided(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns the canonical string form of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(DomainError::InvalidRequestStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reviewer's decision on a pending modification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    /// Apply the requested changes to the target entry.
    Approved,
    /// Discard the proposal; the entry is untouched.
    Rejected,
}

impl ReviewDecision {
    /// Returns the request status this decision resolves to.
    #[must_use]
    pub const fn as_status(self) -> RequestStatus {
        match self {
            Self::Approved => RequestStatus::Approved,
            Self::Rejected => RequestStatus::Rejected,
        }
    }

    /// Returns the canonical string form of this decision.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for ReviewDecision {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(DomainError::InvalidRequestStatus(other.to_string())),
        }
    }
}

/// A proposed edit to a locked pointage entry, subject to review.
///
/// Requests are never deleted; a decided request remains as an audit record
/// of what was asked and what the entry held at the time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModificationRequest {
    /// Store-assigned identifier. `None` until first persisted.
    pub id: Option<i64>,
    /// The target entry.
    pub entry_id: i64,
    /// The requesting user.
    pub user_id: String,
    /// The proposed new values. Absent fields are left untouched on apply.
    pub requested_data: EntryPatch,
    /// Snapshot of the entry's payload at request time, for diffing.
    pub current_data: EntryFields,
    /// Optional free-text comment from the requester.
    pub comment: Option<String>,
    /// Lifecycle status.
    pub status: RequestStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Set once, when the decision is recorded.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// The reviewer's user identifier.
    pub reviewed_by: Option<String>,
    /// Optional free-text comment from the reviewer.
    pub review_comment: Option<String>,
}

impl ModificationRequest {
    /// Creates a new pending request, not yet persisted.
    ///
    /// # Arguments
    ///
    /// * `entry_id` - The target entry
    /// * `user_id` - The requesting user
    /// * `requested_data` - The proposed new values
    /// * `current_data` - The entry's payload at request time
    /// * `comment` - Optional requester comment
    /// * `now` - The creation timestamp
    #[must_use]
    pub const fn new(
        entry_id: i64,
        user_id: String,
        requested_data: EntryPatch,
        current_data: EntryFields,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            entry_id,
            user_id,
            requested_data,
            current_data,
            comment,
            status: RequestStatus::Pending,
            created_at: now,
            reviewed_at: None,
            reviewed_by: None,
            review_comment: None,
        }
    }

    /// Returns the same request with the store-assigned identifier attached.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}
