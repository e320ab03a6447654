// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Modification request query operations.

use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::SqliteConnection;
use pointage_domain::{ModificationRequest, RequestStatus};

use crate::data_models::RequestRow;
use crate::diesel_schema::modification_requests;
use crate::error::PersistenceError;

/// Retrieve a modification request by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is corrupt.
pub fn get_request(
    conn: &mut SqliteConnection,
    request_id: i64,
) -> Result<Option<ModificationRequest>, PersistenceError> {
    modification_requests::table
        .filter(modification_requests::id.eq(request_id))
        .first::<RequestRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_request: {e}")))?
        .map(RequestRow::into_domain)
        .transpose()
}

/// Check whether an entry has a pending modification request.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn has_pending_request(
    conn: &mut SqliteConnection,
    entry_id: i64,
) -> Result<bool, PersistenceError> {
    let pending: i64 = modification_requests::table
        .filter(modification_requests::entry_id.eq(entry_id))
        .filter(modification_requests::status.eq(RequestStatus::Pending.as_str()))
        .select(count_star())
        .first(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("has_pending_request: {e}")))?;
    Ok(pending > 0)
}

/// List every modification request, optionally narrowed to one status,
/// newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_requests(
    conn: &mut SqliteConnection,
    filter_status: Option<RequestStatus>,
) -> Result<Vec<ModificationRequest>, PersistenceError> {
    let mut query = modification_requests::table.into_boxed();
    if let Some(status) = filter_status {
        query = query.filter(modification_requests::status.eq(status.as_str()));
    }
    let rows: Vec<RequestRow> = query
        .order(modification_requests::created_at.desc())
        .load::<RequestRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_requests: {e}")))?;
    rows.into_iter().map(RequestRow::into_domain).collect()
}

/// List the modification requests filed by a single user, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_requests_for_user(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Vec<ModificationRequest>, PersistenceError> {
    let rows: Vec<RequestRow> = modification_requests::table
        .filter(modification_requests::user_id.eq(user_id))
        .order(modification_requests::created_at.desc())
        .load::<RequestRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_requests_for_user: {e}")))?;
    rows.into_iter().map(RequestRow::into_domain).collect()
}

/// List the pending requests filed by a set of users, oldest first.
///
/// Used to build a responsible's review queue.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_pending_requests_for_users(
    conn: &mut SqliteConnection,
    user_ids: &[String],
) -> Result<Vec<ModificationRequest>, PersistenceError> {
    let rows: Vec<RequestRow> = modification_requests::table
        .filter(modification_requests::user_id.eq_any(user_ids))
        .filter(modification_requests::status.eq(RequestStatus::Pending.as_str()))
        .order(modification_requests::created_at.asc())
        .load::<RequestRow>(conn)
        .map_err(|e| {
            PersistenceError::QueryFailed(format!("list_pending_requests_for_users: {e}"))
        })?;
    rows.into_iter().map(RequestRow::into_domain).collect()
}
