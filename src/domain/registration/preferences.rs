//! Preference list validation.
//!
//! A preference list is accepted when it has no repeated values and
//! contains at least one even and at least one odd value. Checks run in
//! that order, so a list that breaks both rules reports the duplicate.

use std::collections::HashSet;

use thiserror::Error;

/// Reasons a preference list is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreferenceError {
    /// The same value appears more than once.
    #[error("Duplicated preferences")]
    DuplicatePreference,

    /// The list lacks an even value, an odd value, or both.
    #[error("Invalid preferences")]
    MissingParity,
}

/// Validates the structure of a preference list.
///
/// Parity uses the Euclidean remainder, so `-3` is odd and `-2` is even.
///
/// # Errors
///
/// - `DuplicatePreference` if any value repeats
/// - `MissingParity` if there is no even or no odd value (including the empty list)
pub fn validate_preferences(preferences: &[i64]) -> Result<(), PreferenceError> {
    let distinct: HashSet<i64> = preferences.iter().copied().collect();
    if distinct.len() != preferences.len() {
        return Err(PreferenceError::DuplicatePreference);
    }

    let has_even = preferences.iter().any(|p| p.rem_euclid(2) == 0);
    let has_odd = preferences.iter().any(|p| p.rem_euclid(2) == 1);
    if !has_even || !has_odd {
        return Err(PreferenceError::MissingParity);
    }

    Ok(())
}
