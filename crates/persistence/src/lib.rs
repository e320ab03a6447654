// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the pointage management backend.
//!
//! This crate stores pointage entries, modification requests, conditional
//! lists, users, and the audit log. It is built on Diesel over `SQLite`.
//!
//! ## Concurrency
//!
//! Lifecycle-sensitive writes are conditional updates: submitting an
//! entry requires the stored status to still be `draft`, and deciding a
//! modification request requires the stored status to still be `pending`.
//! Those methods return the affected row count; a count of zero means a
//! concurrent writer won the race and the caller should re-read.
//!
//! ## Testing
//!
//! Unit tests run against unique shared in-memory databases, one per
//! test, created via an atomic counter so tests are isolated without
//! time-based collisions.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::prelude::*;
use diesel::SqliteConnection;
use pointage_audit::AuditEvent;
use pointage_domain::{ConditionalList, ModificationRequest, PointageEntry, RequestStatus, User};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Settings key holding the name of the active conditional list.
pub const ACTIVE_LIST_KEY: &str = "active_conditional_list";

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the pointage store and audit log.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // WAL mode for better read concurrency on file databases.
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Entries
    // ========================================================================

    /// Persists a new entry together with its audit event.
    ///
    /// # Returns
    ///
    /// The entry with its store-assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn create_entry(
        &mut self,
        entry: &PointageEntry,
        event: &AuditEvent,
    ) -> Result<PointageEntry, PersistenceError> {
        self.conn.transaction(|conn| {
            let entry_id: i64 = mutations::insert_entry(conn, entry)?;
            mutations::persist_audit_event(conn, event)?;
            Ok(entry.clone().with_id(entry_id))
        })
    }

    /// Retrieves an entry by ID, including soft-deleted rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_entry(&mut self, entry_id: i64) -> Result<Option<PointageEntry>, PersistenceError> {
        queries::get_entry(&mut self.conn, entry_id)
    }

    /// Persists an updated draft payload together with its audit event.
    ///
    /// The write is conditional on the stored status still being `draft`.
    ///
    /// # Returns
    ///
    /// The affected row count; zero means the entry was submitted
    /// concurrently and nothing was written.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn update_draft_entry(
        &mut self,
        entry_id: i64,
        entry: &PointageEntry,
        event: &AuditEvent,
    ) -> Result<usize, PersistenceError> {
        self.conn.transaction(|conn| {
            let rows: usize = mutations::update_draft_entry(conn, entry_id, entry)?;
            if rows > 0 {
                mutations::persist_audit_event(conn, event)?;
            }
            Ok(rows)
        })
    }

    /// Persists an entry submission together with its audit event.
    ///
    /// The write is conditional on the stored status still being `draft`.
    ///
    /// # Returns
    ///
    /// The affected row count; zero means a concurrent submission won.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn submit_entry(
        &mut self,
        entry_id: i64,
        entry: &PointageEntry,
        event: &AuditEvent,
    ) -> Result<usize, PersistenceError> {
        self.conn.transaction(|conn| {
            let rows: usize = mutations::submit_entry(conn, entry_id, entry)?;
            if rows > 0 {
                mutations::persist_audit_event(conn, event)?;
            }
            Ok(rows)
        })
    }

    /// Overwrites the stored row of an entry together with its audit event.
    ///
    /// Used for unconditional status overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn overwrite_entry(
        &mut self,
        entry_id: i64,
        entry: &PointageEntry,
        event: &AuditEvent,
    ) -> Result<usize, PersistenceError> {
        self.conn.transaction(|conn| {
            let rows: usize = mutations::overwrite_entry(conn, entry_id, entry)?;
            if rows > 0 {
                mutations::persist_audit_event(conn, event)?;
            }
            Ok(rows)
        })
    }

    /// Persists updated soft-delete and archive flags together with the
    /// audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn set_entry_flags(
        &mut self,
        entry_id: i64,
        entry: &PointageEntry,
        event: &AuditEvent,
    ) -> Result<usize, PersistenceError> {
        self.conn.transaction(|conn| {
            let rows: usize = mutations::set_entry_flags(conn, entry_id, entry)?;
            if rows > 0 {
                mutations::persist_audit_event(conn, event)?;
            }
            Ok(rows)
        })
    }

    /// Lists the entries of a single user, newest pointage date first.
    ///
    /// Soft-deleted entries are excluded.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_entries_for_user(
        &mut self,
        user_id: &str,
    ) -> Result<Vec<PointageEntry>, PersistenceError> {
        queries::list_entries_for_user(&mut self.conn, user_id)
    }

    /// Lists one user's entries for a single ISO week, newest pointage
    /// date first.
    ///
    /// Soft-deleted entries are excluded.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_entries_for_user_week(
        &mut self,
        user_id: &str,
        week_label: &str,
    ) -> Result<Vec<PointageEntry>, PersistenceError> {
        queries::list_entries_for_user_week(&mut self.conn, user_id, week_label)
    }

    /// Lists the entries of a set of users, newest pointage date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_entries_for_users(
        &mut self,
        user_ids: &[String],
    ) -> Result<Vec<PointageEntry>, PersistenceError> {
        queries::list_entries_for_users(&mut self.conn, user_ids)
    }

    // ========================================================================
    // Modification requests
    // ========================================================================

    /// Persists a new modification request together with its audit event.
    ///
    /// # Returns
    ///
    /// The request with its store-assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn create_request(
        &mut self,
        request: &ModificationRequest,
        event: &AuditEvent,
    ) -> Result<ModificationRequest, PersistenceError> {
        self.conn.transaction(|conn| {
            let request_id: i64 = mutations::insert_request(conn, request)?;
            mutations::persist_audit_event(conn, event)?;
            Ok(request.clone().with_id(request_id))
        })
    }

    /// Retrieves a modification request by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_request(
        &mut self,
        request_id: i64,
    ) -> Result<Option<ModificationRequest>, PersistenceError> {
        queries::get_request(&mut self.conn, request_id)
    }

    /// Checks whether an entry has a pending modification request.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn has_pending_request(&mut self, entry_id: i64) -> Result<bool, PersistenceError> {
        queries::has_pending_request(&mut self.conn, entry_id)
    }

    /// Persists a review decision, the patched entry (on approval), and
    /// the audit event in one transaction.
    ///
    /// The decision write is conditional on the stored request status
    /// still being `pending`. When it affects zero rows the entry is
    /// left untouched and no audit event is recorded.
    ///
    /// # Returns
    ///
    /// The affected row count of the decision write; zero means a
    /// concurrent review won.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_review(
        &mut self,
        request_id: i64,
        request: &ModificationRequest,
        patched_entry: Option<&PointageEntry>,
        event: &AuditEvent,
    ) -> Result<usize, PersistenceError> {
        self.conn.transaction(|conn| {
            let rows: usize = mutations::decide_request(conn, request_id, request)?;
            if rows == 0 {
                return Ok(0);
            }
            if let Some(entry) = patched_entry {
                mutations::overwrite_entry(conn, request.entry_id, entry)?;
            }
            mutations::persist_audit_event(conn, event)?;
            Ok(rows)
        })
    }

    /// Lists every modification request, optionally narrowed to one
    /// status, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_requests(
        &mut self,
        filter_status: Option<RequestStatus>,
    ) -> Result<Vec<ModificationRequest>, PersistenceError> {
        queries::list_requests(&mut self.conn, filter_status)
    }

    /// Lists the modification requests filed by a single user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_requests_for_user(
        &mut self,
        user_id: &str,
    ) -> Result<Vec<ModificationRequest>, PersistenceError> {
        queries::list_requests_for_user(&mut self.conn, user_id)
    }

    /// Lists the pending requests filed by a set of users, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_pending_requests_for_users(
        &mut self,
        user_ids: &[String],
    ) -> Result<Vec<ModificationRequest>, PersistenceError> {
        queries::list_pending_requests_for_users(&mut self.conn, user_ids)
    }

    // ========================================================================
    // Conditional lists
    // ========================================================================

    /// Persists a new conditional list with its items together with the
    /// audit event.
    ///
    /// # Returns
    ///
    /// The list with its store-assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn create_list(
        &mut self,
        list: &ConditionalList,
        event: &AuditEvent,
    ) -> Result<ConditionalList, PersistenceError> {
        self.conn.transaction(|conn| {
            let list_id: i64 = mutations::insert_list(conn, list)?;
            mutations::persist_audit_event(conn, event)?;
            Ok(list.clone().with_id(list_id))
        })
    }

    /// Retrieves a conditional list by name, with its items in stored order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_list_by_name(
        &mut self,
        name: &str,
    ) -> Result<Option<ConditionalList>, PersistenceError> {
        queries::get_list_by_name(&mut self.conn, name)
    }

    /// Lists the names of all conditional lists, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_names(&mut self) -> Result<Vec<String>, PersistenceError> {
        queries::list_names(&mut self.conn)
    }

    /// Replaces the stored items of a list together with the audit event.
    ///
    /// Used after merges and item deactivations, which both produce a
    /// complete item set in the domain model.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn update_list_items(
        &mut self,
        list_id: i64,
        list: &ConditionalList,
        event: &AuditEvent,
    ) -> Result<(), PersistenceError> {
        self.conn.transaction(|conn| {
            mutations::replace_list_items(conn, list_id, list)?;
            mutations::persist_audit_event(conn, event)?;
            Ok(())
        })
    }

    /// Sets the active conditional list pointer together with the audit
    /// event.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn set_active_list_name(
        &mut self,
        name: &str,
        event: &AuditEvent,
    ) -> Result<(), PersistenceError> {
        self.conn.transaction(|conn| {
            mutations::set_setting(conn, ACTIVE_LIST_KEY, name)?;
            mutations::persist_audit_event(conn, event)?;
            Ok(())
        })
    }

    /// Retrieves the name of the active conditional list, if one is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_active_list_name(&mut self) -> Result<Option<String>, PersistenceError> {
        queries::get_setting(&mut self.conn, ACTIVE_LIST_KEY)
    }

    /// Retrieves the active conditional list, if one is set.
    ///
    /// A dangling pointer (the named list was removed) is reported as
    /// data corruption.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the pointer is dangling.
    pub fn get_active_list(&mut self) -> Result<Option<ConditionalList>, PersistenceError> {
        let Some(name) = self.get_active_list_name()? else {
            return Ok(None);
        };
        self.get_list_by_name(&name)?.map_or_else(
            || {
                Err(PersistenceError::DataCorruption(format!(
                    "active list pointer references unknown list '{name}'"
                )))
            },
            |list| Ok(Some(list)),
        )
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Persists a new user together with the audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn create_user(
        &mut self,
        user: &User,
        event: &AuditEvent,
    ) -> Result<(), PersistenceError> {
        self.conn.transaction(|conn| {
            mutations::insert_user(conn, user)?;
            mutations::persist_audit_event(conn, event)?;
            Ok(())
        })
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user(&mut self, user_id: &str) -> Result<Option<User>, PersistenceError> {
        queries::get_user(&mut self.conn, user_id)
    }

    /// Persists updated profile fields (name and email) together with the
    /// audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn update_user_profile(
        &mut self,
        user: &User,
        event: &AuditEvent,
    ) -> Result<usize, PersistenceError> {
        self.conn.transaction(|conn| {
            let rows: usize = mutations::update_user_profile(conn, user)?;
            if rows > 0 {
                mutations::persist_audit_event(conn, event)?;
            }
            Ok(rows)
        })
    }

    /// Persists a user's mutable columns, including status, together with
    /// the audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn update_user(
        &mut self,
        user: &User,
        event: &AuditEvent,
    ) -> Result<usize, PersistenceError> {
        self.conn.transaction(|conn| {
            let rows: usize = mutations::update_user(conn, user)?;
            if rows > 0 {
                mutations::persist_audit_event(conn, event)?;
            }
            Ok(rows)
        })
    }

    /// Lists all users, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_users(&mut self) -> Result<Vec<User>, PersistenceError> {
        queries::list_users(&mut self.conn)
    }

    /// Lists the collaborators reporting to a responsible, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_team(&mut self, responsible_id: &str) -> Result<Vec<User>, PersistenceError> {
        queries::list_team(&mut self.conn, responsible_id)
    }

    // ========================================================================
    // Audit log
    // ========================================================================

    /// Persists a standalone audit event.
    ///
    /// # Returns
    ///
    /// The event ID assigned to the persisted audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::persist_audit_event(&mut self.conn, event)
    }

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found or cannot be deserialized.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves the audit trail of a resource, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if events cannot be retrieved or deserialized.
    pub fn list_audit_events_for(
        &mut self,
        resource_type: &str,
        resource_id: &str,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::list_audit_events_for(&mut self.conn, resource_type, resource_id)
    }
}
