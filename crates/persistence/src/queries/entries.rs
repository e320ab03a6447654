// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pointage entry query operations.
//!
//! Listings exclude soft-deleted entries; `get_entry` returns them so
//! that restore operations can see the stored row.

use diesel::prelude::*;
use diesel::SqliteConnection;
use pointage_domain::PointageEntry;

use crate::data_models::EntryRow;
use crate::diesel_schema::pointage_entries;
use crate::error::PersistenceError;

/// Retrieve an entry by ID, including soft-deleted rows.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is corrupt.
pub fn get_entry(
    conn: &mut SqliteConnection,
    entry_id: i64,
) -> Result<Option<PointageEntry>, PersistenceError> {
    pointage_entries::table
        .filter(pointage_entries::id.eq(entry_id))
        .first::<EntryRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_entry: {e}")))?
        .map(EntryRow::into_domain)
        .transpose()
}

/// List the entries of a single user, newest pointage date first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_entries_for_user(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Vec<PointageEntry>, PersistenceError> {
    let rows: Vec<EntryRow> = pointage_entries::table
        .filter(pointage_entries::user_id.eq(user_id))
        .filter(pointage_entries::is_deleted.eq(0))
        .order((
            pointage_entries::date_pointage.desc(),
            pointage_entries::created_at.desc(),
        ))
        .load::<EntryRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_entries_for_user: {e}")))?;
    rows.into_iter().map(EntryRow::into_domain).collect()
}

/// List one user's entries for a single ISO week, newest pointage date
/// first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_entries_for_user_week(
    conn: &mut SqliteConnection,
    user_id: &str,
    week_label: &str,
) -> Result<Vec<PointageEntry>, PersistenceError> {
    let rows: Vec<EntryRow> = pointage_entries::table
        .filter(pointage_entries::user_id.eq(user_id))
        .filter(pointage_entries::week_label.eq(week_label))
        .filter(pointage_entries::is_deleted.eq(0))
        .order((
            pointage_entries::date_pointage.desc(),
            pointage_entries::created_at.desc(),
        ))
        .load::<EntryRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_entries_for_user_week: {e}")))?;
    rows.into_iter().map(EntryRow::into_domain).collect()
}

/// List the entries of a set of users, newest pointage date first.
///
/// Used to build a responsible's team view.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_entries_for_users(
    conn: &mut SqliteConnection,
    user_ids: &[String],
) -> Result<Vec<PointageEntry>, PersistenceError> {
    let rows: Vec<EntryRow> = pointage_entries::table
        .filter(pointage_entries::user_id.eq_any(user_ids))
        .filter(pointage_entries::is_deleted.eq(0))
        .order((
            pointage_entries::date_pointage.desc(),
            pointage_entries::created_at.desc(),
        ))
        .load::<EntryRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_entries_for_users: {e}")))?;
    rows.into_iter().map(EntryRow::into_domain).collect()
}
