//! Error types for curve and point operations.

use pairing_field::FieldError;
use thiserror::Error;

use crate::root::RootError;

/// Errors that can occur while building curves and points or querying them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// The coordinates do not satisfy `y^2 z = x^3 + a x z^2 + b z^3` and are
    /// not the point at infinity.
    #[error("invalid point: ({x} : {y} : {z})")]
    InvalidPoint { x: String, y: String, z: String },

    /// The operation is only defined over the quadratic extension field.
    #[error("{0} requires a quadratic extension field")]
    RequiresExtensionField(&'static str),

    /// A line coefficient was requested for a point with `z != 1`.
    #[error("point is not normalized")]
    NotNormalized,

    /// `embedding_degree` was asked about a zero subgroup order.
    #[error("embedding degree is undefined for a zero modulus")]
    ZeroModulus,

    /// A bounded search ran out of steps.
    #[error("{what} did not finish within {limit} steps")]
    SearchExhausted { what: &'static str, limit: u64 },

    #[error(transparent)]
    Root(#[from] RootError),

    #[error(transparent)]
    Field(#[from] FieldError),
}
