// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Settings table queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::diesel_schema::settings;
use crate::error::PersistenceError;

/// Retrieve a settings value by key.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_setting(
    conn: &mut SqliteConnection,
    key: &str,
) -> Result<Option<String>, PersistenceError> {
    settings::table
        .filter(settings::setting_key.eq(key))
        .select(settings::setting_value)
        .first::<String>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_setting: {e}")))
}
