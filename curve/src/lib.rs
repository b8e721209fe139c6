//! Elliptic curve groups over prime fields and their quadratic extensions.
//!
//! A [`Curve`] is a short Weierstrass curve `y^2 = x^3 + ax + b` over any
//! [`Field`](pairing_field::Field). Its [`Point`]s borrow the curve and carry
//! projective coordinates; the group law itself is a [`PointArithmetic`]
//! strategy picked when the curve is built ([`ProjectiveArithmetic`] unless
//! replaced with [`Curve::with_arithmetic`]).
//!
//! The [`root`] module extracts square and cube roots modulo integers and over
//! the supported fields. Curves use it to find rational points.
//!
//! Randomized searches take the caller's RNG and stop after the limits in
//! [`SearchBounds`].

mod config;
mod curve;
mod error;
mod group;
mod point;
mod projective;
pub mod root;
mod windowed;

#[cfg(test)]
mod tests;

pub use config::SearchBounds;
pub use curve::Curve;
pub use error::CurveError;
pub use group::{Coordinates, PointArithmetic};
pub use point::Point;
pub use projective::ProjectiveArithmetic;
pub use root::{RootError, SquareRoot};
pub use windowed::WindowedArithmetic;
