// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event mutation operations.
//!
//! Audit events are append-only. There are no update or delete
//! operations on the audit log.

use diesel::prelude::*;
use diesel::SqliteConnection;
use pointage_audit::AuditEvent;

use crate::backend;
use crate::data_models::NewAuditEvent;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Persist an audit event and return its assigned event ID.
///
/// # Errors
///
/// Returns an error if serialization or the database insert fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let record: NewAuditEvent = NewAuditEvent::from_domain(event)?;
    diesel::insert_into(audit_events::table)
        .values(&record)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("persist_audit_event: {e}")))?;
    backend::sqlite::get_last_insert_rowid(conn)
}
