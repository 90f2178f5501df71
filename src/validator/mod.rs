//! # Validator Module
//!
//! Per-parameter request validation driven by declarative descriptors.
//!
//! - [`rules`] - one pure checker per constraint keyword
//! - [`coerce`] - typed conversion of raw request strings
//! - [`ParameterValidator`] - composes presence, coercion and checks over a
//!   descriptor list, and wraps handlers
//!
//! Validation stops at the first violation: descriptors are visited in
//! declaration order, array elements in element order, and checkers in the
//! fixed order pattern, minimum, maximum, minLength, maxLength, enum.

pub mod coerce;
mod error;
mod parameter;
pub mod rules;

pub use coerce::ParamValue;
pub use error::ValidationError;
pub use parameter::{ParameterValidator, ValidatedParams};
pub use rules::{
    validate_enum, validate_max_length, validate_maximum, validate_min_length, validate_minimum,
    validate_pattern,
};
