// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity and per-action authorization checks.

use pointage_audit::Actor;
use pointage_domain::{PointageEntry, User, UserRole};

use crate::error::AuthError;

/// An identified caller with a resolved role.
///
/// Authentication happens at the outer surface; handlers receive the
/// already-identified caller and only decide what it may do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The caller's user identifier.
    pub id: String,
    /// The caller's role classification.
    pub role: UserRole,
}

impl AuthenticatedActor {
    /// Creates an authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The caller's user identifier
    /// * `role` - The caller's role classification
    #[must_use]
    pub const fn new(id: String, role: UserRole) -> Self {
        Self { id, role }
    }

    /// Converts this caller into an audit actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), self.role.as_str().to_string())
    }
}

/// Static authorization checks, one per gated action.
///
/// Checks are pure functions of the caller and the addressed records; they
/// never touch the store.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Authorizes creating an entry for `owner_id`.
    ///
    /// Users create their own entries; admins may create entries on behalf
    /// of anyone.
    ///
    /// # Errors
    ///
    /// Returns an error when the caller is neither the owner nor an admin.
    pub fn authorize_entry_creation(
        actor: &AuthenticatedActor,
        owner_id: &str,
    ) -> Result<(), AuthError> {
        if actor.id == owner_id || actor.role == UserRole::Admin {
            return Ok(());
        }
        Err(unauthorized("create entry for another user", UserRole::Admin))
    }

    /// Authorizes editing, submitting, or soft-flagging an entry.
    ///
    /// # Errors
    ///
    /// Returns an error when the caller is neither the entry's owner nor an
    /// admin.
    pub fn authorize_entry_mutation(
        actor: &AuthenticatedActor,
        entry: &PointageEntry,
    ) -> Result<(), AuthError> {
        if actor.id == entry.user_id || actor.role == UserRole::Admin {
            return Ok(());
        }
        Err(unauthorized("modify another user's entry", UserRole::Admin))
    }

    /// Authorizes reading records belonging to `owner`.
    ///
    /// Owners see their own records, a responsible sees their direct
    /// reports, admins see everything.
    ///
    /// # Errors
    ///
    /// Returns an error when none of those relationships hold.
    pub fn authorize_record_view(
        actor: &AuthenticatedActor,
        owner: &User,
    ) -> Result<(), AuthError> {
        if actor.id == owner.id || actor.role == UserRole::Admin {
            return Ok(());
        }
        if actor.role == UserRole::Responsible
            && owner.responsible_id.as_deref() == Some(actor.id.as_str())
        {
            return Ok(());
        }
        Err(unauthorized(
            "view another user's records",
            UserRole::Responsible,
        ))
    }

    /// Authorizes reviewing records owned by `owner`: entry status
    /// decisions and modification request decisions.
    ///
    /// A responsible reviews their direct reports; admins review anyone.
    ///
    /// # Errors
    ///
    /// Returns an error when the caller does not manage the owner.
    pub fn authorize_review(actor: &AuthenticatedActor, owner: &User) -> Result<(), AuthError> {
        if actor.role == UserRole::Admin {
            return Ok(());
        }
        if actor.role == UserRole::Responsible
            && owner.responsible_id.as_deref() == Some(actor.id.as_str())
        {
            return Ok(());
        }
        Err(unauthorized("review records", UserRole::Responsible))
    }

    /// Authorizes curating conditional lists.
    ///
    /// # Errors
    ///
    /// Returns an error when the caller cannot manage reference data.
    pub fn authorize_list_management(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role.manages_team() {
            return Ok(());
        }
        Err(unauthorized(
            "manage conditional lists",
            UserRole::Responsible,
        ))
    }

    /// Authorizes updating the profile of `user_id`.
    ///
    /// Users edit their own profile; admins edit anyone's.
    ///
    /// # Errors
    ///
    /// Returns an error when the caller is neither the user nor an admin.
    pub fn authorize_profile_update(
        actor: &AuthenticatedActor,
        user_id: &str,
    ) -> Result<(), AuthError> {
        if actor.id == user_id || actor.role == UserRole::Admin {
            return Ok(());
        }
        Err(unauthorized("update another user's profile", UserRole::Admin))
    }

    /// Authorizes registering and administering users.
    ///
    /// # Errors
    ///
    /// Returns an error when the caller is not an admin.
    pub fn authorize_user_management(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role == UserRole::Admin {
            return Ok(());
        }
        Err(unauthorized("manage users", UserRole::Admin))
    }

    /// Authorizes team-wide listings.
    ///
    /// # Errors
    ///
    /// Returns an error when the caller does not manage a team.
    pub fn authorize_team_view(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role.manages_team() {
            return Ok(());
        }
        Err(unauthorized("view team records", UserRole::Responsible))
    }

    /// Authorizes the organization-wide modification request listing.
    ///
    /// # Errors
    ///
    /// Returns an error when the caller is not an admin.
    pub fn authorize_request_overview(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role == UserRole::Admin {
            return Ok(());
        }
        Err(unauthorized("list all modification requests", UserRole::Admin))
    }

    /// Authorizes reading the audit trail.
    ///
    /// # Errors
    ///
    /// Returns an error when the caller is not an admin.
    pub fn authorize_audit_access(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role == UserRole::Admin {
            return Ok(());
        }
        Err(unauthorized("read the audit trail", UserRole::Admin))
    }
}

fn unauthorized(action: &str, required_role: UserRole) -> AuthError {
    AuthError::Unauthorized {
        action: action.to_string(),
        required_role: required_role.as_str().to_string(),
    }
}
