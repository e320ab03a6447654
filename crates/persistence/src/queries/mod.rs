// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only query operations, organized by table.

pub mod audit;
pub mod entries;
pub mod lists;
pub mod requests;
pub mod settings;
pub mod users;

pub use audit::{get_audit_event, list_audit_events_for};
pub use entries::{
    get_entry, list_entries_for_user, list_entries_for_user_week, list_entries_for_users,
};
pub use lists::{get_list_by_name, list_names};
pub use requests::{
    get_request, has_pending_request, list_pending_requests_for_users, list_requests,
    list_requests_for_user,
};
pub use settings::get_setting;
pub use users::{get_user, list_team, list_users};
