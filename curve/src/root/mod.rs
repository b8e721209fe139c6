//! Modular root engine: square roots modulo integers and over the quadratic
//! extension, and cube roots over any supported field.
//!
//! Every routine is a pure function of its inputs plus the injected RNG. A
//! missing root is an empty result, never an error; errors are reserved for
//! field shapes the engine does not handle and for searches that exceed their
//! [`SearchBounds`](crate::SearchBounds).

mod cubic;
mod extended;
mod modular;

pub use cubic::cube_root;
pub use extended::{extended_legendre_symbol, square_root_extended};
pub use modular::{legendre_symbol, modular_square_root};

use pairing_field::{Field, FieldElement, FieldError, Fp, Fp2};
use rand::Rng;
use thiserror::Error;

use crate::SearchBounds;

/// Failures of the root engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RootError {
    /// The algorithm for this field shape is not implemented.
    #[error("{0} is not supported")]
    Unsupported(&'static str),

    /// A randomized search drew more samples than allowed.
    #[error("{what} did not finish within {attempts} attempts")]
    SearchExhausted { what: &'static str, attempts: u64 },

    #[error("modulus must be non-zero")]
    InvalidModulus,

    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Field elements whose square roots the engine can extract.
pub trait SquareRoot: FieldElement {
    /// All square roots of `self`: empty for a non-residue, `[0]` for zero,
    /// otherwise `[r, -r]`.
    fn square_roots<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        bounds: &SearchBounds,
    ) -> Result<Vec<Self>, RootError>;
}

impl SquareRoot for Fp {
    fn square_roots<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        bounds: &SearchBounds,
    ) -> Result<Vec<Self>, RootError> {
        let field = self.field();
        let roots = modular_square_root(self.value(), field.modulus(), rng, bounds)?;
        Ok(roots.into_iter().map(|r| field.element(r)).collect())
    }
}

impl SquareRoot for Fp2 {
    fn square_roots<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        bounds: &SearchBounds,
    ) -> Result<Vec<Self>, RootError> {
        square_root_extended(self.field(), self, rng, bounds)
    }
}

/// Draws nonzero elements until `accept` holds, up to `bounds.max_attempts` draws.
pub(crate) fn sample_until<F, R, P>(
    field: &F,
    rng: &mut R,
    bounds: &SearchBounds,
    what: &'static str,
    mut accept: P,
) -> Result<F::Elem, RootError>
where
    F: Field,
    R: Rng + ?Sized,
    P: FnMut(&F::Elem) -> bool,
{
    for attempt in 0..bounds.max_attempts {
        let candidate = field.random_element(rng);
        if !candidate.is_zero() && accept(&candidate) {
            tracing::trace!(attempt, what, "search succeeded");
            return Ok(candidate);
        }
    }
    Err(RootError::SearchExhausted {
        what,
        attempts: bounds.max_attempts,
    })
}
