//! # Validation Utilities
//!
//! Input validation helpers.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate an EVM account or contract address: `0x` followed by 40 hex digits.
///
/// Checksum casing is accepted but not verified.
pub fn validate_evm_address(address: &str) -> Result<(), String> {
    let hex = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| "Address must start with 0x".to_string())?;

    if hex.len() != 40 {
        return Err(format!("Address must have 40 hex digits, got {}", hex.len()));
    }

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err("Address contains non-hex characters".to_string());
    }

    Ok(())
}

/// Validate a collection slug: non-empty and at most 96 characters.
///
/// The characters are left to the content backend; the slug only ever travels
/// as a query parameter.
pub fn validate_slug(slug: &str) -> Result<(), String> {
    validate_not_empty(slug, "Slug")?;

    if slug.chars().count() > 96 {
        return Err("Slug must be at most 96 characters".to_string());
    }

    Ok(())
}
