// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pointage entry types and the entry lifecycle state machine.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Lifecycle status of a pointage entry.
///
/// The only self-service transition is `Draft` → `Submitted`. Moving to
/// `Validated` or `Rejected` requires an elevated role, and a role-gated
/// override may force any transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Freshly created, editable by its owner.
    Draft,
    /// Submitted for validation. Locked against direct edits.
    Submitted,
    /// Accepted by a responsible or admin.
    Validated,
    /// Refused by a responsible or admin.
    Rejected,
}

impl EntryStatus {
    /// Checks whether the normal workflow permits a transition to `target`.
    ///
    /// The admin override does not go through this check.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Submitted)
                | (Self::Submitted, Self::Validated)
                | (Self::Submitted, Self::Rejected)
        )
    }

    /// Returns true once the entry is locked against direct payload edits.
    #[must_use]
    pub const fn is_locked(self) -> bool {
        !matches!(self, Self::Draft)
    }

    /// Returns the canonical string form of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Validated => "validated",
            Self::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for EntryStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            "validated" => Ok(Self::Validated),
            "rejected" => Ok(Self::Rejected),
            other => Err(DomainError::InvalidEntryStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The payload fields of a pointage entry.
///
/// Hours are carried as strings per the wire contract; validation parses
/// them without changing the stored representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFields {
    /// Imputation key from the conditional list.
    pub clef_imputation: String,
    /// Label from the conditional list.
    pub libelle: String,
    /// Function code from the conditional list.
    pub fonction: String,
    /// Free-form need date.
    pub date_besoin: String,
    /// Theoretical hours, numeric-as-string.
    pub heures_theoriques: String,
    /// Spent hours, numeric-as-string.
    pub heures_passees: String,
    /// Free-text comments.
    pub commentaires: String,
}

/// A partial edit to [`EntryFields`].
///
/// Every field is optional; `None` means "leave the current value alone".
/// This makes partial-merge semantics explicit instead of hiding them in an
/// open key/value map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPatch {
    /// Replacement imputation key, if any.
    pub clef_imputation: Option<String>,
    /// Replacement label, if any.
    pub libelle: Option<String>,
    /// Replacement function code, if any.
    pub fonction: Option<String>,
    /// Replacement need date, if any.
    pub date_besoin: Option<String>,
    /// Replacement theoretical hours, if any.
    pub heures_theoriques: Option<String>,
    /// Replacement spent hours, if any.
    pub heures_passees: Option<String>,
    /// Replacement comments, if any.
    pub commentaires: Option<String>,
}

impl EntryPatch {
    /// Returns true when the patch carries no changes at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.clef_imputation.is_none()
            && self.libelle.is_none()
            && self.fonction.is_none()
            && self.date_besoin.is_none()
            && self.heures_theoriques.is_none()
            && self.heures_passees.is_none()
            && self.commentaires.is_none()
    }

    /// Merges this patch onto `fields`, returning the merged payload.
    ///
    /// Only populated patch fields overwrite; absent fields keep the prior
    /// value.
    #[must_use]
    pub fn apply_to(&self, fields: &EntryFields) -> EntryFields {
        let mut merged: EntryFields = fields.clone();
        if let Some(v) = &self.clef_imputation {
            merged.clef_imputation = v.clone();
        }
        if let Some(v) = &self.libelle {
            merged.libelle = v.clone();
        }
        if let Some(v) = &self.fonction {
            merged.fonction = v.clone();
        }
        if let Some(v) = &self.date_besoin {
            merged.date_besoin = v.clone();
        }
        if let Some(v) = &self.heures_theoriques {
            merged.heures_theoriques = v.clone();
        }
        if let Some(v) = &self.heures_passees {
            merged.heures_passees = v.clone();
        }
        if let Some(v) = &self.commentaires {
            merged.commentaires = v.clone();
        }
        merged
    }
}

/// Computes the week label for a pointage date.
///
/// The label is derived from the Monday of the date's week and formatted as
/// `YYYY-Www` (calendar year of the Monday, ISO week number).
#[must_use]
pub fn week_label(date: NaiveDate) -> String {
    let offset: u64 = u64::from(date.weekday().num_days_from_monday());
    let monday: NaiveDate = date.checked_sub_days(Days::new(offset)).unwrap_or(date);
    monday.format("%Y-W%V").to_string()
}

/// A single time-tracking entry for one calendar day.
///
/// Multiple entries may exist for the same (user, date) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointageEntry {
    /// Store-assigned identifier. `None` until first persisted.
    pub id: Option<i64>,
    /// The owning user.
    pub user_id: String,
    /// The calendar day this entry tracks.
    pub date_pointage: NaiveDate,
    /// Week label derived from `date_pointage`.
    pub week_label: String,
    /// The payload fields.
    pub fields: EntryFields,
    /// Lifecycle status.
    pub status: EntryStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Set exactly once, on the draft → submitted transition.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Set when the entry is validated.
    pub validated_at: Option<DateTime<Utc>>,
    /// The validator's user identifier.
    pub validated_by: Option<String>,
    /// Soft-delete flag. Deleted entries are excluded from listings.
    pub is_deleted: bool,
    /// Soft-archive flag.
    pub is_archived: bool,
}

impl PointageEntry {
    /// Creates a new draft entry, not yet persisted.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The owning user
    /// * `date_pointage` - The tracked calendar day
    /// * `fields` - The payload fields
    /// * `now` - The creation timestamp
    #[must_use]
    pub fn new(
        user_id: String,
        date_pointage: NaiveDate,
        fields: EntryFields,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            user_id,
            date_pointage,
            week_label: week_label(date_pointage),
            fields,
            status: EntryStatus::Draft,
            created_at: now,
            updated_at: now,
            submitted_at: None,
            validated_at: None,
            validated_by: None,
            is_deleted: false,
            is_archived: false,
        }
    }

    /// Returns the same entry with the store-assigned identifier attached.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}
