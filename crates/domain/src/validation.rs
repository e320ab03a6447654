// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;

use crate::entry::{EntryFields, EntryPatch};
use crate::error::DomainError;

/// Validates that an entry payload carries every required field.
///
/// The required fields are `clef_imputation`, `libelle`, `fonction`,
/// `date_besoin`, `heures_theoriques` and `heures_passees`; `commentaires`
/// is optional. Hours must parse as non-negative numbers.
///
/// # Arguments
///
/// * `fields` - The payload to validate
///
/// # Returns
///
/// * `Ok(())` if the payload is complete
/// * `Err(DomainError)` for the first missing or malformed field
///
/// # Errors
///
/// Returns an error if a required field is empty or an hours field does not
/// parse as a non-negative number.
pub fn validate_entry_fields(fields: &EntryFields) -> Result<(), DomainError> {
    require_non_empty("clef_imputation", &fields.clef_imputation)?;
    require_non_empty("libelle", &fields.libelle)?;
    require_non_empty("fonction", &fields.fonction)?;
    require_non_empty("date_besoin", &fields.date_besoin)?;
    validate_hours("heures_theoriques", &fields.heures_theoriques)?;
    validate_hours("heures_passees", &fields.heures_passees)?;
    Ok(())
}

/// Validates the populated fields of a partial patch.
///
/// Absent fields are skipped; present fields follow the same rules as
/// [`validate_entry_fields`], except that `commentaires` stays free-form.
///
/// # Arguments
///
/// * `patch` - The patch to validate
///
/// # Errors
///
/// Returns an error if a populated field is empty or a populated hours
/// field does not parse as a non-negative number.
pub fn validate_entry_patch(patch: &EntryPatch) -> Result<(), DomainError> {
    if let Some(v) = &patch.clef_imputation {
        require_non_empty("clef_imputation", v)?;
    }
    if let Some(v) = &patch.libelle {
        require_non_empty("libelle", v)?;
    }
    if let Some(v) = &patch.fonction {
        require_non_empty("fonction", v)?;
    }
    if let Some(v) = &patch.date_besoin {
        require_non_empty("date_besoin", v)?;
    }
    if let Some(v) = &patch.heures_theoriques {
        validate_hours("heures_theoriques", v)?;
    }
    if let Some(v) = &patch.heures_passees {
        validate_hours("heures_passees", v)?;
    }
    Ok(())
}

/// Validates that an hours value parses as a non-negative number.
///
/// The stored representation stays a string; only the shape is checked.
///
/// # Arguments
///
/// * `field` - The field name, for error reporting
/// * `value` - The raw value
///
/// # Errors
///
/// Returns an error if the value is empty, not a number, or negative.
pub fn validate_hours(field: &'static str, value: &str) -> Result<(), DomainError> {
    require_non_empty(field, value)?;
    match value.trim().parse::<f64>() {
        Ok(hours) if hours >= 0.0 && hours.is_finite() => Ok(()),
        _ => Err(DomainError::InvalidHours {
            field,
            value: value.to_string(),
        }),
    }
}

/// Parses an ISO-8601 calendar date (`YYYY-MM-DD`).
///
/// # Arguments
///
/// * `date_string` - The raw date string
///
/// # Errors
///
/// Returns an error if the string is not a valid calendar date.
pub fn parse_pointage_date(date_string: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(date_string, "%Y-%m-%d").map_err(|e| DomainError::DateParseError {
        date_string: date_string.to_string(),
        error: e.to_string(),
    })
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::MissingField { field });
    }
    Ok(())
}
