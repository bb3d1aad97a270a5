//! Typed failures for metric derivation
//!
//! Every derivation returns one of these instead of letting NaN or Infinity
//! leak into display strings. Callers decide how to render a failure.

use thiserror::Error;

/// Failure produced by a derivation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// Operation needs at least one record
    #[error("{operation} requires at least one record")]
    EmptyCollection { operation: &'static str },

    /// Denominator evaluated to zero
    #[error("{operation} divides by zero")]
    DivideByZero { operation: &'static str },

    /// Selector names a field the record does not carry
    #[error("record has no numeric field '{field}'")]
    MissingField { field: String },

    /// Loaded value is negative or not finite
    #[error("record '{key}' has an invalid value for '{field}'")]
    InvalidValue { key: String, field: String },
}

impl MetricsError {
    pub fn empty(operation: &'static str) -> Self {
        Self::EmptyCollection { operation }
    }

    pub fn divide_by_zero(operation: &'static str) -> Self {
        Self::DivideByZero { operation }
    }

    pub fn missing_field(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MetricsError>;
