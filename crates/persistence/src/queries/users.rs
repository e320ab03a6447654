// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User query operations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use pointage_domain::User;

use crate::data_models::UserRow;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Retrieve a user by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is corrupt.
pub fn get_user(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Option<User>, PersistenceError> {
    users::table
        .filter(users::id.eq(user_id))
        .first::<UserRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_user: {e}")))?
        .map(UserRow::into_domain)
        .transpose()
}

/// List all users, ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_users(conn: &mut SqliteConnection) -> Result<Vec<User>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .order(users::id.asc())
        .load::<UserRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_users: {e}")))?;
    rows.into_iter().map(UserRow::into_domain).collect()
}

/// List the active collaborators reporting to a responsible, ordered by
/// ID. Deactivated users are excluded.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_team(
    conn: &mut SqliteConnection,
    responsible_id: &str,
) -> Result<Vec<User>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .filter(users::responsible_id.eq(responsible_id))
        .filter(users::status.eq("active"))
        .order(users::id.asc())
        .load::<UserRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_team: {e}")))?;
    rows.into_iter().map(UserRow::into_domain).collect()
}
