//! Square roots over even-degree extensions `F_{q^2}`, `q = p^(m/2)`.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};
use pairing_field::{Field, FieldElement};
use rand::Rng;

use super::{legendre_symbol, modular_square_root, sample_until, RootError};
use crate::SearchBounds;

/// Quadratic character over the extension: the base-field Legendre symbol of
/// the norm `x^(1 + p + ... + p^(m-1))`.
pub fn extended_legendre_symbol<F: Field>(field: &F, x: &F::Elem) -> i8 {
    let p = field.characteristic();
    let exponent = (0..field.degree()).fold(BigUint::zero(), |acc, i| acc + p.pow(i));
    let norm = x.pow(&exponent);
    debug_assert!(norm.is_in_prime_subfield());
    let base = norm.components().into_iter().next().unwrap_or_default();
    legendre_symbol(&base, p)
}

/// Square roots of `x` in an even-degree extension with `q^(m/2) ≡ 1 (mod 4)`.
///
/// Reduces to one square root in `F_q` after scaling by `x^((q-1)/4)` and, when
/// that scaled value is a non-residue in `F_q`, by the norm of a fixed
/// non-residue of the extension. Odd degrees and `q^(m/2) ≡ 3 (mod 4)` are
/// reported as [`RootError::Unsupported`].
pub fn square_root_extended<F: Field, R: Rng + ?Sized>(
    field: &F,
    x: &F::Elem,
    rng: &mut R,
    bounds: &SearchBounds,
) -> Result<Vec<F::Elem>, RootError> {
    let m = field.degree();
    if m % 2 != 0 {
        return Err(RootError::Unsupported("square root over an odd-degree extension"));
    }
    let q = field.characteristic().pow(m / 2);
    if !(&q % 4u32).is_one() {
        return Err(RootError::Unsupported(
            "square root over F_{q^2} with q ≡ 3 (mod 4)",
        ));
    }
    if x.is_zero() {
        return Ok(vec![x.clone()]);
    }
    if extended_legendre_symbol(field, x) != 1 {
        return Ok(Vec::new());
    }

    let c = sample_until(field, rng, bounds, "extension non-residue search", |c| {
        extended_legendre_symbol(field, c) == -1
    })?;
    let d = c.pow(&((&q - 1u32) >> 1u32));
    let cd = c * &d;
    let e = cd.inverse()?;
    let f = cd.square();

    let b = x.pow(&((&q - 1u32) >> 2u32));
    let b2 = b.square();
    let a0 = b2.pow(&q) * &b2;
    if a0.is_minus_one() {
        return Ok(Vec::new());
    }

    let mut scaled = b2 * x;
    let mut lift = b.pow(&q);
    if !b.pow(&(&q + 1u32)).is_one() {
        lift = lift * &e;
        scaled = scaled * &f;
    }
    debug_assert!(scaled.is_in_prime_subfield());

    let base_value = scaled.components().into_iter().next().unwrap_or_default();
    let base_roots = modular_square_root(&base_value, &q, rng, bounds)?;
    let Some(x0) = base_roots.into_iter().next() else {
        return Ok(Vec::new());
    };

    let root = field.from_int(&BigInt::from_biguint(Sign::Plus, x0)) * &lift;
    debug_assert_eq!(root.square(), *x);
    let negated = -root.clone();
    if negated == root {
        Ok(vec![root])
    } else {
        Ok(vec![root, negated])
    }
}
