// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User mutation operations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use pointage_domain::User;

use crate::data_models::{NewUser, format_timestamp};
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Insert a new user.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn insert_user(conn: &mut SqliteConnection, user: &User) -> Result<(), PersistenceError> {
    let record: NewUser = NewUser::from_domain(user);
    diesel::insert_into(users::table)
        .values(&record)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("insert_user: {e}")))?;
    Ok(())
}

/// Update a user's name and email.
///
/// Returns the affected row count.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_user_profile(
    conn: &mut SqliteConnection,
    user: &User,
) -> Result<usize, PersistenceError> {
    diesel::update(users::table.filter(users::id.eq(&user.id)))
        .set((
            users::name.eq(&user.name),
            users::email.eq(&user.email),
            users::updated_at.eq(format_timestamp(user.updated_at)),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("update_user_profile: {e}")))
}

/// Overwrite a user's mutable columns, including status.
///
/// Returns the affected row count.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_user(conn: &mut SqliteConnection, user: &User) -> Result<usize, PersistenceError> {
    diesel::update(users::table.filter(users::id.eq(&user.id)))
        .set((
            users::name.eq(&user.name),
            users::email.eq(&user.email),
            users::status.eq(user.status.as_str()),
            users::updated_at.eq(format_timestamp(user.updated_at)),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("update_user: {e}")))
}
