// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pointage_audit::{AuditEvent, StateSnapshot};
use pointage_domain::{ConditionalList, ModificationRequest, PointageEntry, User};
use serde::Serialize;

use crate::error::CoreError;

/// The records a command operates on, loaded by the caller.
///
/// The engine is pure: the caller assembles the state a command needs from
/// the store, and the engine validates and transforms it without touching
/// the store itself. Fields a command does not use may stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    /// The target pointage entry, if the command addresses one.
    pub entry: Option<PointageEntry>,
    /// The target modification request, if the command addresses one.
    pub request: Option<ModificationRequest>,
    /// Whether a pending modification request already exists for the entry.
    pub has_pending_request: bool,
    /// The named conditional list a command targets.
    pub list: Option<ConditionalList>,
    /// All existing list names, for duplicate checks.
    pub list_names: Vec<String>,
    /// The currently active conditional list, for reference re-validation.
    pub active_list: Option<ConditionalList>,
    /// The target user, if the command addresses one.
    pub user: Option<User>,
    /// The referenced responsible, for collaborator registration.
    pub responsible: Option<User>,
}

impl State {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the target entry.
    #[must_use]
    pub fn with_entry(mut self, entry: PointageEntry) -> Self {
        self.entry = Some(entry);
        self
    }

    /// Attaches the target modification request.
    #[must_use]
    pub fn with_request(mut self, request: ModificationRequest) -> Self {
        self.request = Some(request);
        self
    }

    /// Records whether the entry already has a pending request.
    #[must_use]
    pub const fn with_pending_request(mut self, has_pending: bool) -> Self {
        self.has_pending_request = has_pending;
        self
    }

    /// Attaches the named target list.
    #[must_use]
    pub fn with_list(mut self, list: ConditionalList) -> Self {
        self.list = Some(list);
        self
    }

    /// Attaches the set of existing list names.
    #[must_use]
    pub fn with_list_names(mut self, names: Vec<String>) -> Self {
        self.list_names = names;
        self
    }

    /// Attaches the currently active list.
    #[must_use]
    pub fn with_active_list(mut self, list: ConditionalList) -> Self {
        self.active_list = Some(list);
        self
    }

    /// Attaches the target user.
    #[must_use]
    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    /// Attaches the referenced responsible.
    #[must_use]
    pub fn with_responsible(mut self, user: User) -> Self {
        self.responsible = Some(user);
        self
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// Serializes a record into an audit snapshot.
///
/// An absent record snapshots as `null`, which marks creation (before) and
/// deletion (after) boundaries in the audit trail.
pub(crate) fn snapshot_of<T: Serialize>(value: Option<&T>) -> Result<StateSnapshot, CoreError> {
    let data: String = match value {
        Some(v) => serde_json::to_string(v).map_err(|e| CoreError::Internal(e.to_string()))?,
        None => String::from("null"),
    };
    Ok(StateSnapshot::new(data))
}
