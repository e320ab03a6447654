// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conditional list (LC) reference data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// One reference triple in a conditional list.
///
/// Items are soft-deactivated rather than removed; inactive items stay in
/// the list but are excluded from option resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalListItem {
    /// Imputation key. Never empty.
    pub clef_imputation: String,
    /// Label. Never empty.
    pub libelle: String,
    /// Function code. May be empty.
    pub fonction: String,
    /// Whether the item participates in option resolution.
    pub is_active: bool,
}

impl ConditionalListItem {
    /// Creates a new active item, validating the required fields.
    ///
    /// # Arguments
    ///
    /// * `clef_imputation` - The imputation key (non-empty)
    /// * `libelle` - The label (non-empty)
    /// * `fonction` - The function code
    ///
    /// # Errors
    ///
    /// Returns an error if `clef_imputation` or `libelle` is empty.
    pub fn new(
        clef_imputation: String,
        libelle: String,
        fonction: String,
    ) -> Result<Self, DomainError> {
        if clef_imputation.trim().is_empty() {
            return Err(DomainError::InvalidListItem {
                index: 0,
                reason: "clef_imputation must not be empty",
            });
        }
        if libelle.trim().is_empty() {
            return Err(DomainError::InvalidListItem {
                index: 0,
                reason: "libelle must not be empty",
            });
        }
        Ok(Self {
            clef_imputation,
            libelle,
            fonction,
            is_active: true,
        })
    }

    /// Checks whether another item matches on all three reference fields.
    ///
    /// Comparison is case-sensitive and exact; the active flag is ignored.
    #[must_use]
    pub fn same_triple(&self, other: &Self) -> bool {
        self.clef_imputation == other.clef_imputation
            && self.libelle == other.libelle
            && self.fonction == other.fonction
    }
}

/// A named collection of reference items.
///
/// The list name is the natural key; exactly one list is active
/// process-wide at a time, tracked by a store-level pointer rather than a
/// flag on the list itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalList {
    /// Store-assigned identifier. `None` until first persisted.
    pub id: Option<i64>,
    /// The unique list name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// The reference items, in insertion order.
    pub items: Vec<ConditionalListItem>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ConditionalList {
    /// Creates a new list, validating the name.
    ///
    /// # Arguments
    ///
    /// * `name` - The unique list name (non-empty)
    /// * `description` - Optional description
    /// * `items` - The initial items
    /// * `now` - The creation timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty.
    pub fn new(
        name: String,
        description: Option<String>,
        items: Vec<ConditionalListItem>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::InvalidListName(String::from(
                "name must not be empty",
            )));
        }
        Ok(Self {
            id: None,
            name,
            description,
            items,
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns the same list with the store-assigned identifier attached.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Checks whether an item matching `candidate` on all three fields
    /// already exists in the list.
    #[must_use]
    pub fn contains_triple(&self, candidate: &ConditionalListItem) -> bool {
        self.items.iter().any(|item| item.same_triple(candidate))
    }
}

/// One autocomplete option resolved from the active list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcOption {
    /// The raw field value.
    pub value: String,
    /// The display label. Identical to the value for reference fields.
    pub label: String,
    /// Always true for resolved options; carried for the wire contract.
    pub active: bool,
}

impl LcOption {
    /// Creates an option whose label mirrors its value.
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            label: value.to_string(),
            active: true,
        }
    }
}

/// De-duplicated option sequences for the three reference fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcOptions {
    /// Distinct imputation keys, insertion order preserved.
    pub clef_imputation: Vec<LcOption>,
    /// Distinct labels, insertion order preserved.
    pub libelle: Vec<LcOption>,
    /// Distinct function codes, insertion order preserved.
    pub fonction: Vec<LcOption>,
}
