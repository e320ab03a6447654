// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod entry;
mod error;
mod lc;
mod request;
mod user;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use entry::{EntryFields, EntryPatch, EntryStatus, PointageEntry, week_label};
pub use error::DomainError;
pub use lc::{ConditionalList, ConditionalListItem, LcOption, LcOptions};
pub use request::{ModificationRequest, RequestStatus, ReviewDecision};
pub use user::{User, UserRole, UserStatus};
pub use validation::{
    parse_pointage_date, validate_entry_fields, validate_entry_patch, validate_hours,
};
