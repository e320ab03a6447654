// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event query operations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use pointage_audit::AuditEvent;

use crate::data_models::AuditEventRow;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Retrieve an audit event by ID.
///
/// # Errors
///
/// Returns an error if the event is not found or cannot be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventRow = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .first::<AuditEventRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_audit_event: {e}")))?
        .ok_or_else(|| PersistenceError::NotFound(format!("audit event {event_id}")))?;
    row.into_domain()
}

/// List the audit events recorded for a resource, in insertion order.
///
/// # Errors
///
/// Returns an error if events cannot be retrieved or deserialized.
pub fn list_audit_events_for(
    conn: &mut SqliteConnection,
    resource_type: &str,
    resource_id: &str,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::resource_type.eq(resource_type))
        .filter(audit_events::resource_id.eq(resource_id))
        .order(audit_events::event_id.asc())
        .load::<AuditEventRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_audit_events_for: {e}")))?;
    rows.into_iter().map(AuditEventRow::into_domain).collect()
}
