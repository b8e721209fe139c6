use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use pairing_field::{modinv, Field, FieldElement};
use rand::Rng;

use super::{sample_until, RootError};
use crate::SearchBounds;

/// All cube roots of `x` in `field`.
///
/// With `N = |F| - 1 = 3^s * t`, `3 ∤ t`: when `s = 0` cubing is a bijection and
/// the single root is `x^(3^-1 mod N)`. Otherwise `x^l` with `3l ≡ 1 (mod t)` is
/// corrected by an element of the 3-Sylow subgroup, solved one base-3 digit at
/// a time against a cubic non-residue. The three roots differ by the cube
/// roots of unity.
pub fn cube_root<F: Field, R: Rng + ?Sized>(
    field: &F,
    x: &F::Elem,
    rng: &mut R,
    bounds: &SearchBounds,
) -> Result<Vec<F::Elem>, RootError> {
    if x.is_zero() {
        return Ok(vec![x.clone()]);
    }

    let n = field.order() - 1u32;
    let three = BigUint::from(3u32);
    if n.is_one() {
        return Ok(vec![x.clone()]);
    }

    let mut s = 0u32;
    let mut t = n.clone();
    while (&t % 3u32).is_zero() {
        t /= 3u32;
        s += 1;
    }

    if s == 0 {
        let l = modinv(&three, &n).ok_or(RootError::Unsupported("cube root exponent"))?;
        return Ok(vec![x.pow(&l)]);
    }

    let third = &n / 3u32;
    if !x.pow(&third).is_one() {
        return Ok(Vec::new());
    }

    let rho = sample_until(field, rng, bounds, "cubic non-residue search", |c| {
        !c.pow(&third).is_one()
    })?;
    // generator of the 3-Sylow subgroup and a primitive cube root of unity
    let z = rho.pow(&t);
    let omega = z.pow(&three.pow(s - 1));

    let l = if t.is_one() {
        BigUint::zero()
    } else {
        modinv(&(&three % &t), &t).ok_or(RootError::Unsupported("cube root exponent"))?
    };
    let r0 = x.pow(&l);
    // r0^3 = x * w with w in the 3-Sylow subgroup; solve h^3 = w^-1
    let target = x.clone() * &r0.pow(&three).inverse()?;

    let z_inv = z.inverse()?;
    let mut exponent = BigUint::zero();
    let mut digit_weight = BigUint::one();
    for i in 0..s {
        let residual = target.clone() * &z_inv.pow(&exponent);
        let probe = residual.pow(&three.pow(s - 1 - i));
        if probe == omega {
            exponent += &digit_weight;
        } else if !probe.is_one() {
            exponent += &digit_weight * 2u32;
        }
        digit_weight *= 3u32;
    }
    debug_assert!(exponent.is_multiple_of(&three));

    let root = r0 * &z.pow(&(exponent / 3u32));
    debug_assert_eq!(root.pow(&three), *x);
    let second = root.clone() * &omega;
    let third_root = second.clone() * &omega;
    Ok(vec![root, second, third_root])
}
