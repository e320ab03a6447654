// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pointage entry mutation operations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use pointage_domain::{EntryStatus, PointageEntry};

use crate::backend;
use crate::data_models::{NewEntry, format_timestamp};
use crate::diesel_schema::pointage_entries;
use crate::error::PersistenceError;

/// Insert a new entry and return its assigned row ID.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn insert_entry(
    conn: &mut SqliteConnection,
    entry: &PointageEntry,
) -> Result<i64, PersistenceError> {
    let record: NewEntry = NewEntry::from_domain(entry);
    diesel::insert_into(pointage_entries::table)
        .values(&record)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("insert_entry: {e}")))?;
    backend::sqlite::get_last_insert_rowid(conn)
}

/// Update the payload of a draft entry.
///
/// The update is conditional on the stored status still being `draft`,
/// so a concurrent submission makes this a no-op. Returns the affected
/// row count.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_draft_entry(
    conn: &mut SqliteConnection,
    entry_id: i64,
    entry: &PointageEntry,
) -> Result<usize, PersistenceError> {
    diesel::update(
        pointage_entries::table
            .filter(pointage_entries::id.eq(entry_id))
            .filter(pointage_entries::status.eq(EntryStatus::Draft.as_str())),
    )
    .set((
        pointage_entries::clef_imputation.eq(&entry.fields.clef_imputation),
        pointage_entries::libelle.eq(&entry.fields.libelle),
        pointage_entries::fonction.eq(&entry.fields.fonction),
        pointage_entries::date_besoin.eq(&entry.fields.date_besoin),
        pointage_entries::heures_theoriques.eq(&entry.fields.heures_theoriques),
        pointage_entries::heures_passees.eq(&entry.fields.heures_passees),
        pointage_entries::commentaires.eq(&entry.fields.commentaires),
        pointage_entries::updated_at.eq(format_timestamp(entry.updated_at)),
    ))
    .execute(conn)
    .map_err(|e| PersistenceError::QueryFailed(format!("update_draft_entry: {e}")))
}

/// Mark a draft entry as submitted.
///
/// Conditional on the stored status still being `draft`; a double submit
/// affects zero rows. Returns the affected row count.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn submit_entry(
    conn: &mut SqliteConnection,
    entry_id: i64,
    entry: &PointageEntry,
) -> Result<usize, PersistenceError> {
    diesel::update(
        pointage_entries::table
            .filter(pointage_entries::id.eq(entry_id))
            .filter(pointage_entries::status.eq(EntryStatus::Draft.as_str())),
    )
    .set((
        pointage_entries::status.eq(entry.status.as_str()),
        pointage_entries::submitted_at.eq(entry.submitted_at.map(format_timestamp)),
        pointage_entries::updated_at.eq(format_timestamp(entry.updated_at)),
    ))
    .execute(conn)
    .map_err(|e| PersistenceError::QueryFailed(format!("submit_entry: {e}")))
}

/// Overwrite the full stored row of an entry.
///
/// Used for status overrides and approved modification requests, where
/// the caller has already decided the outcome. Returns the affected
/// row count.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn overwrite_entry(
    conn: &mut SqliteConnection,
    entry_id: i64,
    entry: &PointageEntry,
) -> Result<usize, PersistenceError> {
    diesel::update(pointage_entries::table.filter(pointage_entries::id.eq(entry_id)))
        .set((
            pointage_entries::clef_imputation.eq(&entry.fields.clef_imputation),
            pointage_entries::libelle.eq(&entry.fields.libelle),
            pointage_entries::fonction.eq(&entry.fields.fonction),
            pointage_entries::date_besoin.eq(&entry.fields.date_besoin),
            pointage_entries::heures_theoriques.eq(&entry.fields.heures_theoriques),
            pointage_entries::heures_passees.eq(&entry.fields.heures_passees),
            pointage_entries::commentaires.eq(&entry.fields.commentaires),
            pointage_entries::status.eq(entry.status.as_str()),
            pointage_entries::submitted_at.eq(entry.submitted_at.map(format_timestamp)),
            pointage_entries::validated_at.eq(entry.validated_at.map(format_timestamp)),
            pointage_entries::validated_by.eq(&entry.validated_by),
            pointage_entries::updated_at.eq(format_timestamp(entry.updated_at)),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("overwrite_entry: {e}")))
}

/// Update the soft-delete and archive flags of an entry.
///
/// Returns the affected row count.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn set_entry_flags(
    conn: &mut SqliteConnection,
    entry_id: i64,
    entry: &PointageEntry,
) -> Result<usize, PersistenceError> {
    diesel::update(pointage_entries::table.filter(pointage_entries::id.eq(entry_id)))
        .set((
            pointage_entries::is_deleted.eq(i32::from(entry.is_deleted)),
            pointage_entries::is_archived.eq(i32::from(entry.is_archived)),
            pointage_entries::updated_at.eq(format_timestamp(entry.updated_at)),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("set_entry_flags: {e}")))
}
