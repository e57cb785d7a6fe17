//! Private key loading, validation, and masking.
//!
//! # Responsibilities
//! - Read the deployer key from the environment
//! - Check format conventions (0x prefix, hex digits, length)
//! - Produce a display-safe masked form
//!
//! # Security
//! - The key is never logged in full; only the masked form is displayed
//! - Unconventional formats are warnings, never fatal; only a missing or
//!   empty key aborts

use thiserror::Error;

/// Environment variable holding the deployer private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// Hex character count of a 32-byte private key.
const KEY_HEX_LEN: usize = 64;

/// Errors from key loading and validation.
#[derive(Debug, Error)]
pub enum KeyError {
    /// Key entirely absent from the environment.
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    /// Key present but empty after trimming.
    #[error("environment variable {0} is empty")]
    Empty(&'static str),
}

/// Read the private key from the environment.
pub fn load_from_env() -> Result<String, KeyError> {
    match std::env::var(PRIVATE_KEY_ENV_VAR) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Ok(_) => Err(KeyError::Empty(PRIVATE_KEY_ENV_VAR)),
        Err(_) => Err(KeyError::Missing(PRIVATE_KEY_ENV_VAR)),
    }
}

/// Outcome of format validation for a private key.
#[derive(Debug, Clone)]
pub struct KeyReport {
    trimmed: String,
    /// Display-safe form of the key.
    pub masked: String,
    /// Key begins with the conventional `0x` prefix.
    pub has_0x_prefix: bool,
    /// Key is exactly 64 hex characters after prefix stripping.
    pub looks_like_hex: bool,
    /// Key contains whitespace between its first and last characters.
    pub has_inner_whitespace: bool,
}

impl KeyReport {
    /// The trimmed key material, suitable for signer construction.
    pub fn trimmed(&self) -> &str {
        &self.trimmed
    }
}

/// Validate format conventions of a raw key string.
///
/// Fails only when the key is absent or empty. A missing `0x` prefix or
/// embedded whitespace produces a warning and a flag in the report, but
/// does not alter control flow.
pub fn validate(raw: &str) -> Result<KeyReport, KeyError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(KeyError::Empty(PRIVATE_KEY_ENV_VAR));
    }

    let has_0x_prefix = trimmed.starts_with("0x");
    let hex_part = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let looks_like_hex =
        hex_part.len() == KEY_HEX_LEN && hex_part.chars().all(|c| c.is_ascii_hexdigit());
    let has_inner_whitespace = trimmed.contains(char::is_whitespace);

    if !has_0x_prefix {
        tracing::warn!("private key does not begin with '0x'");
    }
    if has_inner_whitespace {
        tracing::warn!("private key contains whitespace");
    }

    Ok(KeyReport {
        masked: mask(trimmed),
        trimmed: trimmed.to_string(),
        has_0x_prefix,
        looks_like_hex,
        has_inner_whitespace,
    })
}

/// Mask a secret for display: the first 6 and last 4 characters joined by
/// an ellipsis. Empty input renders as `<undefined>`.
pub fn mask(secret: &str) -> String {
    if secret.is_empty() {
        return "<undefined>".to_string();
    }
    let chars: Vec<char> = secret.chars().collect();
    let start: String = chars[..chars.len().min(6)].iter().collect();
    let end: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{start}…{end}")
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_valid_key_with_prefix() {
        let report = validate(TEST_PRIVATE_KEY).unwrap();
        assert!(report.has_0x_prefix);
        assert!(report.looks_like_hex);
        assert!(!report.has_inner_whitespace);
    }

    #[test]
    fn test_valid_key_without_prefix() {
        let report = validate(&TEST_PRIVATE_KEY[2..]).unwrap();
        assert!(!report.has_0x_prefix);
        assert!(report.looks_like_hex);
    }

    #[test]
    fn test_wrong_length_is_not_hex() {
        // 63 characters
        let short = &TEST_PRIVATE_KEY[..TEST_PRIVATE_KEY.len() - 1];
        assert!(!validate(short).unwrap().looks_like_hex);

        // 65 characters
        let long = format!("{TEST_PRIVATE_KEY}0");
        assert!(!validate(&long).unwrap().looks_like_hex);
    }

    #[test]
    fn test_non_hex_characters() {
        let bad = format!("0x{}", "zz".repeat(32));
        assert!(!validate(&bad).unwrap().looks_like_hex);
    }

    #[test]
    fn test_inner_whitespace_flagged() {
        let spaced = format!("0xac09 {}", &TEST_PRIVATE_KEY[7..]);
        let report = validate(&spaced).unwrap();
        assert!(report.has_inner_whitespace);
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let padded = format!("  {TEST_PRIVATE_KEY}\n");
        let report = validate(&padded).unwrap();
        assert!(report.looks_like_hex);
        assert!(!report.has_inner_whitespace);
        assert_eq!(report.trimmed(), TEST_PRIVATE_KEY);
    }

    #[test]
    fn test_empty_key_is_fatal() {
        assert!(matches!(validate(""), Err(KeyError::Empty(_))));
        assert!(matches!(validate("   "), Err(KeyError::Empty(_))));
    }

    #[test]
    fn test_mask_shows_first_six_and_last_four() {
        let masked = mask(TEST_PRIVATE_KEY);
        assert_eq!(masked, "0xac09…ff80");
    }

    #[test]
    fn test_mask_arbitrary_length() {
        assert_eq!(mask("0123456789"), "012345…6789");
        assert_eq!(mask(""), "<undefined>");
    }
}
