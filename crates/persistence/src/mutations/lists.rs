// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conditional list mutation operations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use pointage_domain::ConditionalList;

use crate::backend;
use crate::data_models::{NewList, NewListItem, format_timestamp};
use crate::diesel_schema::{conditional_list_items, conditional_lists};
use crate::error::PersistenceError;

/// Insert a new conditional list with its items and return the list's
/// assigned row ID.
///
/// # Errors
///
/// Returns an error if any database insert fails.
pub fn insert_list(
    conn: &mut SqliteConnection,
    list: &ConditionalList,
) -> Result<i64, PersistenceError> {
    let record: NewList = NewList::from_domain(list);
    diesel::insert_into(conditional_lists::table)
        .values(&record)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("insert_list: {e}")))?;
    let list_id: i64 = backend::sqlite::get_last_insert_rowid(conn)?;
    insert_items(conn, list_id, list)?;
    Ok(list_id)
}

/// Replace the stored items of a list with the items of the given
/// domain list, and bump the list's `updated_at`.
///
/// Items are written back in full because merges and deactivations both
/// produce a complete item set in the domain model.
///
/// # Errors
///
/// Returns an error if any database statement fails.
pub fn replace_list_items(
    conn: &mut SqliteConnection,
    list_id: i64,
    list: &ConditionalList,
) -> Result<(), PersistenceError> {
    diesel::delete(
        conditional_list_items::table.filter(conditional_list_items::list_id.eq(list_id)),
    )
    .execute(conn)
    .map_err(|e| PersistenceError::QueryFailed(format!("replace_list_items: {e}")))?;
    insert_items(conn, list_id, list)?;
    diesel::update(conditional_lists::table.filter(conditional_lists::id.eq(list_id)))
        .set(conditional_lists::updated_at.eq(format_timestamp(list.updated_at)))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("replace_list_items: {e}")))?;
    Ok(())
}

fn insert_items(
    conn: &mut SqliteConnection,
    list_id: i64,
    list: &ConditionalList,
) -> Result<(), PersistenceError> {
    let records: Vec<NewListItem> = list
        .items
        .iter()
        .enumerate()
        .map(|(position, item)| {
            let position = i32::try_from(position).map_err(|_| {
                PersistenceError::QueryFailed(format!(
                    "insert_items: item position overflow in list {list_id}"
                ))
            })?;
            Ok(NewListItem::from_domain(list_id, position, item))
        })
        .collect::<Result<Vec<NewListItem>, PersistenceError>>()?;
    diesel::insert_into(conditional_list_items::table)
        .values(&records)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("insert_items: {e}")))?;
    Ok(())
}
