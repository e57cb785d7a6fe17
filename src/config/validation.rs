//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0) and URL shape
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: HarnessConfig → Result<(), Vec<ValidationError>>

use crate::config::schema::HarnessConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A duration field is zero.
    ZeroTimeout { field: &'static str },
    /// The explicit RPC URL does not parse.
    InvalidRpcUrl { url: String, reason: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::ZeroTimeout { field } => {
                write!(f, "{field} must be greater than zero")
            }
            ValidationError::InvalidRpcUrl { url, reason } => {
                write!(f, "rpc_url '{url}' is not a valid URL: {reason}")
            }
        }
    }
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &HarnessConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.rpc_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "rpc_timeout_secs",
        });
    }
    if config.confirmation_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "confirmation_timeout_secs",
        });
    }
    if let Some(url) = &config.rpc_url {
        if let Err(e) = url.trim().parse::<url::Url>() {
            errors.push(ValidationError::InvalidRpcUrl {
                url: url.clone(),
                reason: e.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
