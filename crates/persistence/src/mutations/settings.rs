// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Settings table mutations.
//!
//! The settings table is a small key/value store. Its only current use
//! is the active conditional list pointer.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::diesel_schema::settings;
use crate::error::PersistenceError;

/// Set a settings key, replacing any existing value.
///
/// # Errors
///
/// Returns an error if the database write fails.
pub fn set_setting(
    conn: &mut SqliteConnection,
    key: &str,
    value: &str,
) -> Result<(), PersistenceError> {
    diesel::replace_into(settings::table)
        .values((
            settings::setting_key.eq(key),
            settings::setting_value.eq(value),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("set_setting: {e}")))?;
    Ok(())
}
