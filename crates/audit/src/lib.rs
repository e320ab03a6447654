// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change.
/// This could be a user, a system process, or an automated trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "collaborator", "responsible", "admin",
    /// "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the reason or trigger for an action.
///
/// A cause describes why a state change was initiated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID, event ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
///
/// An action describes what state change occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`SubmitEntry`", "`ReviewRequest`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A snapshot of the affected record at a point in time.
///
/// The snapshot body is a serialized representation produced by the
/// transition engine; the audit layer treats it as opaque text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// A string representation of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    ///
    /// # Arguments
    ///
    /// * `data` - A string representation of the state
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful state change must produce exactly one audit event.
/// Audit events are immutable once created and capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The record before the transition (before)
/// - The record after the transition (after)
/// - Which record was touched (`resource_type`, `resource_id`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
    /// The kind of record touched (e.g., "entry", "modification_request",
    /// "conditional_list", "user").
    pub resource_type: String,
    /// The identifier of the touched record.
    pub resource_id: String,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    /// * `resource_type` - The kind of record touched
    /// * `resource_id` - The identifier of the touched record
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        resource_type: String,
        resource_id: String,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            before,
            after,
            resource_type,
            resource_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_event() -> AuditEvent {
        let actor: Actor = Actor::new(String::from("u1"), String::from("collaborator"));
        let cause: Cause = Cause::new(String::from("req-456"), String::from("User request"));
        let action: Action = Action::new(String::from("SubmitEntry"), None);
        let before: StateSnapshot = StateSnapshot::new(String::from("before-state"));
        let after: StateSnapshot = StateSnapshot::new(String::from("after-state"));

        AuditEvent::new(
            actor,
            cause,
            action,
            before,
            after,
            String::from("entry"),
            String::from("12"),
        )
    }

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("u1"), String::from("collaborator"));

        assert_eq!(actor.id, "u1");
        assert_eq!(actor.actor_type, "collaborator");
    }

    #[test]
    fn test_cause_creation_requires_all_fields() {
        let cause: Cause = Cause::new(String::from("req-456"), String::from("User request"));

        assert_eq!(cause.id, "req-456");
        assert_eq!(cause.description, "User request");
    }

    #[test]
    fn test_action_creation_requires_name() {
        let action: Action = Action::new(String::from("SubmitEntry"), None);

        assert_eq!(action.name, "SubmitEntry");
        assert_eq!(action.details, None);
    }

    #[test]
    fn test_action_creation_with_details() {
        let action: Action = Action::new(
            String::from("ReviewRequest"),
            Some(String::from("Approved request 3")),
        );

        assert_eq!(action.name, "ReviewRequest");
        assert_eq!(action.details, Some(String::from("Approved request 3")));
    }

    #[test]
    fn test_state_snapshot_creation() {
        let snapshot: StateSnapshot = StateSnapshot::new(String::from("state-data"));

        assert_eq!(snapshot.data, "state-data");
    }

    #[test]
    fn test_audit_event_creation_requires_all_fields() {
        let event: AuditEvent = create_test_event();

        assert_eq!(event.actor.id, "u1");
        assert_eq!(event.cause.id, "req-456");
        assert_eq!(event.action.name, "SubmitEntry");
        assert_eq!(event.before.data, "before-state");
        assert_eq!(event.after.data, "after-state");
        assert_eq!(event.resource_type, "entry");
        assert_eq!(event.resource_id, "12");
    }

    #[test]
    fn test_audit_event_is_immutable_once_created() {
        let event: AuditEvent = create_test_event();

        // Clone the event to verify it can be cloned but not mutated
        let cloned_event: AuditEvent = event.clone();
        assert_eq!(event, cloned_event);
    }

    #[test]
    fn test_actor_equality() {
        let actor1: Actor = Actor::new(String::from("u1"), String::from("collaborator"));
        let actor2: Actor = Actor::new(String::from("u1"), String::from("collaborator"));
        let actor3: Actor = Actor::new(String::from("u2"), String::from("collaborator"));

        assert_eq!(actor1, actor2);
        assert_ne!(actor1, actor3);
    }

    #[test]
    fn test_audit_event_equality() {
        let event1: AuditEvent = create_test_event();
        let event2: AuditEvent = create_test_event();

        assert_eq!(event1, event2);
    }
}
