//! Finite fields consumed by the curve engine.
//!
//! Two providers implement the [`Field`] capability: the prime field [`PrimeField`]
//! for any runtime prime, and the quadratic extension [`QuadraticField`] defined
//! by `x^2 + 1` or `x^2 + x + 1`. Curve code is generic over the trait and only
//! asks for the extension shape through [`Field::extension`].

mod arith;
mod error;
mod prime;
mod quadratic;
mod random;
mod traits;

pub use arith::{is_prime, modinv, reduce};
pub use error::FieldError;
pub use prime::{Fp, PrimeField};
pub use quadratic::{Fp2, Irreducible, QuadraticField};
pub use random::{random_below, random_nonzero_below};
pub use traits::{Field, FieldElement};
