//! Error types for field construction and arithmetic.

use num_bigint::BigUint;
use thiserror::Error;

/// Errors raised by the field providers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// An element without a multiplicative inverse was inverted.
    #[error("division by zero")]
    DivisionByZero,

    /// The characteristic handed to a field constructor is not prime.
    #[error("modulus {0} is not prime")]
    NonPrimeModulus(BigUint),

    /// The chosen quadratic factors over the base field, so the quotient is not a field.
    #[error("{poly} is reducible over F_{p}")]
    ReducibleModulus { p: BigUint, poly: &'static str },

    /// `from_components` received the wrong number of coefficients.
    #[error("expected {expected} components, got {got}")]
    ComponentCount { expected: usize, got: usize },
}
