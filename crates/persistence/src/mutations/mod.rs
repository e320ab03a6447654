// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation operations, organized by table.
//!
//! Lifecycle-sensitive updates are conditional on the current stored
//! status (`WHERE status = 'draft'`, `WHERE status = 'pending'`) and
//! return the affected row count so callers can detect lost races.

pub mod audit;
pub mod entries;
pub mod lists;
pub mod requests;
pub mod settings;
pub mod users;

pub use audit::persist_audit_event;
pub use entries::{
    insert_entry, overwrite_entry, set_entry_flags, submit_entry, update_draft_entry,
};
pub use lists::{insert_list, replace_list_items};
pub use requests::{decide_request, insert_request};
pub use settings::set_setting;
pub use users::{insert_user, update_user, update_user_profile};
