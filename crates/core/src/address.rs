//! Address type constants and validation.
//!
//! Addresses are temporally versioned: a user may hold several addresses of
//! the same type, distinguished by `valid_from`. The constants here must match
//! the check constraint on `users_addresses`.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Address types
// ---------------------------------------------------------------------------

pub const ADDRESS_TYPE_HOME: &str = "HOME";
pub const ADDRESS_TYPE_INVOICE: &str = "INVOICE";
pub const ADDRESS_TYPE_POST: &str = "POST";
pub const ADDRESS_TYPE_WORK: &str = "WORK";

/// All valid address types.
pub const VALID_ADDRESS_TYPES: &[&str] = &[
    ADDRESS_TYPE_HOME,
    ADDRESS_TYPE_INVOICE,
    ADDRESS_TYPE_POST,
    ADDRESS_TYPE_WORK,
];

/// ISO 3166-1 alpha-3 codes are exactly three letters.
pub const COUNTRY_CODE_LEN: usize = 3;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that an address type is one of the known types.
///
/// Matching is exact; the stored values are upper case.
pub fn validate_address_type(address_type: &str) -> Result<(), CoreError> {
    if VALID_ADDRESS_TYPES.contains(&address_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown address type: '{address_type}'. Valid types: {}",
            VALID_ADDRESS_TYPES.join(", ")
        )))
    }
}

/// Validate an ISO 3166-1 alpha-3 country code and return it upper-cased.
///
/// Surrounding whitespace is ignored. The code must be exactly three ASCII
/// letters in any case.
pub fn normalize_country_code(code: &str) -> Result<String, CoreError> {
    let code = code.trim();
    if code.chars().count() != COUNTRY_CODE_LEN {
        return Err(CoreError::Validation(format!(
            "Invalid country code '{code}'. Must have length {COUNTRY_CODE_LEN} (ISO3166-1 alpha-3)."
        )));
    }
    if !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CoreError::Validation(format!(
            "Invalid country code '{code}'. Must contain letters only."
        )));
    }
    Ok(code.to_ascii_uppercase())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
