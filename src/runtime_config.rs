//! # Runtime Configuration Module
//!
//! Environment variable based configuration for the parameter validator.
//!
//! ## Environment Variables
//!
//! ### `BRRTR_STRICT_VALIDATION`
//!
//! When `true` (or `1`), requests carrying query parameters that no descriptor
//! declares are rejected with `Extra query parameter(s) ... not in spec`.
//!
//! Default: `false`
//!
//! ### `BRRTR_PROBLEM_STATUS`
//!
//! Status code used for validation problem responses. Must be a 4xx code;
//! anything else falls back to the default.
//!
//! Default: `400`
//!
//! ## Usage
//!
//! ```rust
//! use brrtguard::runtime_config::ValidatorConfig;
//!
//! let config = ValidatorConfig::from_env();
//! println!("strict: {}", config.strict_validation);
//! ```

use std::env;

pub const DEFAULT_PROBLEM_STATUS: u16 = 400;

/// Validator behaviour loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Reject undeclared query parameters
    pub strict_validation: bool,
    /// Status code of problem responses (default: 400)
    pub problem_status: u16,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            strict_validation: false,
            problem_status: DEFAULT_PROBLEM_STATUS,
        }
    }
}

fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn parse_problem_status(val: &str) -> Option<u16> {
    val.trim()
        .parse::<u16>()
        .ok()
        .filter(|s| (400..500).contains(s))
}

impl ValidatorConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let strict_validation = env::var("BRRTR_STRICT_VALIDATION")
            .ok()
            .and_then(|v| parse_flag(&v))
            .unwrap_or(false);
        let problem_status = env::var("BRRTR_PROBLEM_STATUS")
            .ok()
            .and_then(|v| parse_problem_status(&v))
            .unwrap_or(DEFAULT_PROBLEM_STATUS);
        ValidatorConfig {
            strict_validation,
            problem_status,
        }
    }

    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_validation = strict;
        self
    }
}
