// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Option resolution over the active conditional list.

use pointage_domain::{ConditionalList, LcOption, LcOptions};

/// Resolves the autocomplete options exposed by a conditional list.
///
/// Only active items contribute. Each field sequence holds the distinct
/// values for that field, insertion order preserved; empty values are
/// skipped.
///
/// # Arguments
///
/// * `list` - The list to resolve, normally the active one
#[must_use]
pub fn resolve_options(list: &ConditionalList) -> LcOptions {
    let mut options: LcOptions = LcOptions::default();
    for item in list.items.iter().filter(|item| item.is_active) {
        push_unique(&mut options.clef_imputation, &item.clef_imputation);
        push_unique(&mut options.libelle, &item.libelle);
        push_unique(&mut options.fonction, &item.fonction);
    }
    options
}

/// Checks whether a `clef_imputation` code is an active option of the list.
#[must_use]
pub fn has_active_code(list: &ConditionalList, code: &str) -> bool {
    list.items
        .iter()
        .any(|item| item.is_active && item.clef_imputation == code)
}

fn push_unique(options: &mut Vec<LcOption>, value: &str) {
    if value.is_empty() {
        return;
    }
    if options.iter().any(|option| option.value == value) {
        return;
    }
    options.push(LcOption::from_value(value));
}
