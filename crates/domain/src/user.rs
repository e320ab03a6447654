// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User types and role classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Role classification for users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Creates and submits pointage entries.
    Collaborator,
    /// Validates entries and curates reference data for a team.
    Responsible,
    /// Full access, including status overrides.
    Admin,
}

impl UserRole {
    /// Returns true for roles allowed to review entries and requests.
    #[must_use]
    pub const fn can_review(self) -> bool {
        matches!(self, Self::Responsible | Self::Admin)
    }

    /// Returns true for roles that manage a team of collaborators.
    #[must_use]
    pub const fn manages_team(self) -> bool {
        matches!(self, Self::Responsible | Self::Admin)
    }

    /// Returns the canonical string form of this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Collaborator => "collaborator",
            Self::Responsible => "responsible",
            Self::Admin => "admin",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "collaborator" => Ok(Self::Collaborator),
            "responsible" => Ok(Self::Responsible),
            "admin" => Ok(Self::Admin),
            other => Err(DomainError::InvalidUserRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Activation status for users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// The user may act and appears in team listings.
    Active,
    /// Deactivated; excluded from team listings.
    Inactive,
}

impl UserStatus {
    /// Returns the canonical string form of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(DomainError::InvalidUserStatus(other.to_string())),
        }
    }
}

/// A user known to the system.
///
/// Identity is assigned externally; the store does not generate user ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The externally-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Role classification.
    pub role: UserRole,
    /// Activation status.
    pub status: UserStatus,
    /// The managing responsible. Required for collaborators, absent
    /// otherwise.
    pub responsible_id: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active user.
    ///
    /// # Arguments
    ///
    /// * `id` - The externally-assigned identifier
    /// * `name` - Display name
    /// * `email` - Contact email
    /// * `role` - Role classification
    /// * `responsible_id` - The managing responsible, for collaborators
    /// * `now` - The creation timestamp
    #[must_use]
    pub const fn new(
        id: String,
        name: String,
        email: String,
        role: UserRole,
        responsible_id: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            role,
            status: UserStatus::Active,
            responsible_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validates the role / responsible-reference invariant.
    ///
    /// A collaborator must reference a responsible; elevated roles must not.
    ///
    /// # Errors
    ///
    /// Returns an error when the invariant is violated.
    pub fn validate_responsible_reference(&self) -> Result<(), DomainError> {
        match (self.role, &self.responsible_id) {
            (UserRole::Collaborator, None) => Err(DomainError::MissingResponsible {
                user_id: self.id.clone(),
            }),
            (UserRole::Responsible | UserRole::Admin, Some(_)) => {
                Err(DomainError::UnexpectedResponsible {
                    user_id: self.id.clone(),
                })
            }
            _ => Ok(()),
        }
    }
}
