// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conditional list query operations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use pointage_domain::{ConditionalList, ConditionalListItem};

use crate::data_models::{ListItemRow, ListRow};
use crate::diesel_schema::{conditional_list_items, conditional_lists};
use crate::error::PersistenceError;

/// Retrieve a conditional list by name, with its items in stored order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn get_list_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<ConditionalList>, PersistenceError> {
    let row: Option<ListRow> = conditional_lists::table
        .filter(conditional_lists::name.eq(name))
        .first::<ListRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_list_by_name: {e}")))?;
    let Some(row) = row else {
        return Ok(None);
    };

    let items: Vec<ConditionalListItem> = conditional_list_items::table
        .filter(conditional_list_items::list_id.eq(row.id))
        .order(conditional_list_items::position.asc())
        .load::<ListItemRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("get_list_by_name: {e}")))?
        .into_iter()
        .map(ListItemRow::into_domain)
        .collect();

    Ok(Some(row.into_domain(items)?))
}

/// List the names of all conditional lists, alphabetically.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_names(conn: &mut SqliteConnection) -> Result<Vec<String>, PersistenceError> {
    conditional_lists::table
        .select(conditional_lists::name)
        .order(conditional_lists::name.asc())
        .load::<String>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_names: {e}")))
}
