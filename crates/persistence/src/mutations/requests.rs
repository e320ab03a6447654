// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Modification request mutation operations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use pointage_domain::{ModificationRequest, RequestStatus};

use crate::backend;
use crate::data_models::{NewRequest, format_timestamp};
use crate::diesel_schema::modification_requests;
use crate::error::PersistenceError;

/// Insert a new modification request and return its assigned row ID.
///
/// # Errors
///
/// Returns an error if serialization or the database insert fails.
pub fn insert_request(
    conn: &mut SqliteConnection,
    request: &ModificationRequest,
) -> Result<i64, PersistenceError> {
    let record: NewRequest = NewRequest::from_domain(request)?;
    diesel::insert_into(modification_requests::table)
        .values(&record)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("insert_request: {e}")))?;
    backend::sqlite::get_last_insert_rowid(conn)
}

/// Record the review decision on a pending request.
///
/// The update is conditional on the stored status still being `pending`,
/// so a concurrent second review affects zero rows. Returns the affected
/// row count.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn decide_request(
    conn: &mut SqliteConnection,
    request_id: i64,
    request: &ModificationRequest,
) -> Result<usize, PersistenceError> {
    diesel::update(
        modification_requests::table
            .filter(modification_requests::id.eq(request_id))
            .filter(modification_requests::status.eq(RequestStatus::Pending.as_str())),
    )
    .set((
        modification_requests::status.eq(request.status.as_str()),
        modification_requests::reviewed_at.eq(request.reviewed_at.map(format_timestamp)),
        modification_requests::reviewed_by.eq(&request.reviewed_by),
        modification_requests::review_comment.eq(&request.review_comment),
    ))
    .execute(conn)
    .map_err(|e| PersistenceError::QueryFailed(format!("decide_request: {e}")))
}
